//! Any-keyed external values.
//!
//! Some sources (YAML in particular) produce maps whose keys are not strings.
//! `RawValue` carries such data unchanged until the normalizer decides whether
//! each key can be folded into a string.

use serde::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
use std::fmt;

/// An externally supplied value whose map keys may be of any kind.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum RawValue {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    List(Vec<RawValue>),
    /// Entries in source order.
    Map(Vec<(RawValue, RawValue)>),
}

impl RawValue {
    /// Build a map from key/value pairs.
    pub fn map<K, V, I>(entries: I) -> Self
    where
        K: Into<RawValue>,
        V: Into<RawValue>,
        I: IntoIterator<Item = (K, V)>,
    {
        RawValue::Map(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    pub fn kind(&self) -> &'static str {
        match self {
            RawValue::Null => "null",
            RawValue::Bool(_) => "bool",
            RawValue::Int(_) => "int",
            RawValue::Float(_) => "float",
            RawValue::String(_) => "string",
            RawValue::List(_) => "list",
            RawValue::Map(_) => "map",
        }
    }
}

impl From<&str> for RawValue {
    fn from(v: &str) -> Self {
        RawValue::String(v.to_string())
    }
}

impl From<String> for RawValue {
    fn from(v: String) -> Self {
        RawValue::String(v)
    }
}

impl From<i64> for RawValue {
    fn from(v: i64) -> Self {
        RawValue::Int(v)
    }
}

impl From<i32> for RawValue {
    fn from(v: i32) -> Self {
        RawValue::Int(i64::from(v))
    }
}

impl From<f64> for RawValue {
    fn from(v: f64) -> Self {
        RawValue::Float(v)
    }
}

impl From<bool> for RawValue {
    fn from(v: bool) -> Self {
        RawValue::Bool(v)
    }
}

impl<T: Into<RawValue>> From<Vec<T>> for RawValue {
    fn from(v: Vec<T>) -> Self {
        RawValue::List(v.into_iter().map(Into::into).collect())
    }
}

impl<'de> Deserialize<'de> for RawValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(RawValueVisitor)
    }
}

struct RawValueVisitor;

impl<'de> Visitor<'de> for RawValueVisitor {
    type Value = RawValue;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("any configuration value")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<RawValue, E> {
        Ok(RawValue::Bool(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<RawValue, E> {
        Ok(RawValue::Int(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<RawValue, E> {
        Ok(i64::try_from(v)
            .map(RawValue::Int)
            .unwrap_or(RawValue::Float(v as f64)))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<RawValue, E> {
        Ok(RawValue::Float(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<RawValue, E> {
        Ok(RawValue::String(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<RawValue, E> {
        Ok(RawValue::String(v))
    }

    fn visit_unit<E: de::Error>(self) -> Result<RawValue, E> {
        Ok(RawValue::Null)
    }

    fn visit_none<E: de::Error>(self) -> Result<RawValue, E> {
        Ok(RawValue::Null)
    }

    fn visit_some<D>(self, deserializer: D) -> Result<RawValue, D::Error>
    where
        D: Deserializer<'de>,
    {
        RawValue::deserialize(deserializer)
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<RawValue, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element()? {
            items.push(item);
        }
        Ok(RawValue::List(items))
    }

    fn visit_map<A>(self, mut map: A) -> Result<RawValue, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
        while let Some(entry) = map.next_entry::<RawValue, RawValue>()? {
            entries.push(entry);
        }
        Ok(RawValue::Map(entries))
    }
}
