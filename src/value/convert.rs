//! Boundary adapters from external representations into [`Value`].
//!
//! These conversions only change representation. Keys keep their casing here;
//! folding happens in the normalizer when a value enters the store.

use super::{Params, Value};
use crate::error::StoreError;
use std::collections::{BTreeMap, HashMap};

macro_rules! from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(v: $t) -> Self {
                    Value::Int(i64::from(v))
                }
            }
        )*
    };
}

from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        i64::try_from(v)
            .map(Value::Int)
            .unwrap_or(Value::Float(v as f64))
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(f64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<&String> for Value {
    fn from(v: &String) -> Self {
        Value::String(v.clone())
    }
}

impl From<Params> for Value {
    fn from(v: Params) -> Self {
        Value::Map(v)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Value::List(v.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::Null)
    }
}

impl<K, V, S> From<HashMap<K, V, S>> for Value
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from(v: HashMap<K, V, S>) -> Self {
        Value::Map(v.into_iter().collect())
    }
}

impl<K, V> From<BTreeMap<K, V>> for Value
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from(v: BTreeMap<K, V>) -> Self {
        Value::Map(v.into_iter().collect())
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Int(i)
                } else {
                    // u64 beyond i64::MAX or a real float
                    Value::Float(n.as_f64().unwrap_or_default())
                }
            }
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::List(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => Value::Map(map.into_iter().collect()),
        }
    }
}

impl From<toml::Value> for Value {
    fn from(v: toml::Value) -> Self {
        match v {
            toml::Value::String(s) => Value::String(s),
            toml::Value::Integer(i) => Value::Int(i),
            toml::Value::Float(f) => Value::Float(f),
            toml::Value::Boolean(b) => Value::Bool(b),
            toml::Value::Datetime(dt) => Value::String(dt.to_string()),
            toml::Value::Array(items) => Value::List(items.into_iter().map(Value::from).collect()),
            toml::Value::Table(table) => Value::Map(table.into_iter().collect()),
        }
    }
}

impl From<config::Value> for Value {
    fn from(v: config::Value) -> Self {
        use config::ValueKind;

        match v.kind {
            ValueKind::Nil => Value::Null,
            ValueKind::Boolean(b) => Value::Bool(b),
            ValueKind::I64(i) => Value::Int(i),
            ValueKind::I128(i) => i64::try_from(i)
                .map(Value::Int)
                .unwrap_or(Value::Float(i as f64)),
            ValueKind::U64(u) => Value::from(u),
            ValueKind::U128(u) => i64::try_from(u)
                .map(Value::Int)
                .unwrap_or(Value::Float(u as f64)),
            ValueKind::Float(f) => Value::Float(f),
            ValueKind::String(s) => Value::String(s),
            ValueKind::Table(table) => Value::Map(table.into_iter().collect()),
            ValueKind::Array(items) => Value::List(items.into_iter().map(Value::from).collect()),
        }
    }
}

/// Collect a built `config::Config` into a single map value.
impl TryFrom<config::Config> for Value {
    type Error = StoreError;

    fn try_from(cfg: config::Config) -> Result<Self, Self::Error> {
        let table: HashMap<String, config::Value> = cfg.try_deserialize()?;
        Ok(Value::from(table))
    }
}
