//! Normalizer
//!
//! Brings any incoming value into canonical shape: every map key, at every
//! depth, folded to lower case. Maps nested in lists are folded too. Original
//! casing is not recoverable afterwards.
//!
//! When two keys fold to the same string the entry visited last wins.

use crate::error::NormalizeError;
use crate::path::fold_key;
use crate::value::{Params, RawValue, Value};

/// Fold every map key in `value`. Scalars pass through unchanged.
pub fn normalize(value: Value) -> Value {
    match value {
        Value::Map(params) => Value::Map(normalize_params(params)),
        Value::List(items) => Value::List(items.into_iter().map(normalize).collect()),
        other => other,
    }
}

/// Fold every key of a map node, recursively.
pub fn normalize_params(params: Params) -> Params {
    let mut folded = Params::new();
    for (key, value) in params {
        folded.insert(fold_key(&key), normalize(value));
    }
    folded
}

/// Convert an any-keyed value into canonical shape.
///
/// String, integer, boolean and finite float keys are stringified and folded.
/// Any other key rejects the whole value.
pub fn normalize_raw(raw: RawValue) -> Result<Value, NormalizeError> {
    normalize_raw_at(raw, "")
}

fn normalize_raw_at(raw: RawValue, at: &str) -> Result<Value, NormalizeError> {
    Ok(match raw {
        RawValue::Null => Value::Null,
        RawValue::Bool(b) => Value::Bool(b),
        RawValue::Int(i) => Value::Int(i),
        RawValue::Float(f) => Value::Float(f),
        RawValue::String(s) => Value::String(s),
        RawValue::List(items) => Value::List(
            items
                .into_iter()
                .map(|item| normalize_raw_at(item, at))
                .collect::<Result<_, _>>()?,
        ),
        RawValue::Map(entries) => {
            let mut params = Params::new();
            for (key, value) in entries {
                let key = fold_key(&stringify_key(&key, at)?);
                let child_at = if at.is_empty() {
                    key.clone()
                } else {
                    format!("{}.{}", at, key)
                };
                let value = normalize_raw_at(value, &child_at)?;
                params.insert(key, value);
            }
            Value::Map(params)
        }
    })
}

fn stringify_key(key: &RawValue, at: &str) -> Result<String, NormalizeError> {
    match key {
        RawValue::String(s) => Ok(s.clone()),
        RawValue::Int(i) => Ok(i.to_string()),
        RawValue::Bool(b) => Ok(b.to_string()),
        RawValue::Float(f) if f.is_finite() => Ok(f.to_string()),
        other => Err(NormalizeError::UnsupportedKey {
            path: at.to_string(),
            kind: other.kind(),
        }),
    }
}

impl TryFrom<RawValue> for Value {
    type Error = NormalizeError;

    fn try_from(raw: RawValue) -> Result<Self, Self::Error> {
        normalize_raw(raw)
    }
}
