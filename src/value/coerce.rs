//! Typed coercions
//!
//! Each coercion pattern-matches on the variant and returns `None` when the
//! value cannot be represented in the target type. The store's typed accessors
//! turn `None` into the target's zero value.

use super::{Params, Value};
use std::collections::BTreeMap;

impl Value {
    /// Stringify a scalar. Null, lists and maps have no string form.
    pub fn coerce_string(&self) -> Option<String> {
        match self {
            Value::String(s) => Some(s.clone()),
            Value::Int(i) => Some(i.to_string()),
            Value::Float(f) => Some(f.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            Value::Null | Value::List(_) | Value::Map(_) => None,
        }
    }

    /// Integers as-is, floats truncated, bools as 1/0, numeric strings parsed.
    pub fn coerce_i64(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            Value::Float(f) if f.is_finite() => Some(f.trunc() as i64),
            Value::Bool(b) => Some(i64::from(*b)),
            Value::String(s) => parse_i64(s),
            _ => None,
        }
    }

    pub fn coerce_f64(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Int(i) => Some(*i as f64),
            Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn coerce_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            Value::Int(i) => Some(*i != 0),
            Value::Float(f) => Some(*f != 0.0),
            Value::String(s) => parse_bool(s.trim()),
            _ => None,
        }
    }

    /// Lists of scalars, or a whitespace separated string.
    pub fn coerce_string_slice(&self) -> Option<Vec<String>> {
        match self {
            Value::List(items) => Some(items.iter().filter_map(Value::coerce_string).collect()),
            Value::String(s) => Some(s.split_whitespace().map(str::to_string).collect()),
            _ => None,
        }
    }

    pub fn coerce_string_map(&self) -> Option<Params> {
        self.as_map().cloned()
    }

    /// Map entries stringified. Nested maps and lists become empty strings.
    pub fn coerce_string_map_string(&self) -> Option<BTreeMap<String, String>> {
        let params = self.as_map()?;
        Some(
            params
                .iter()
                .map(|(k, v)| (k.clone(), v.coerce_string().unwrap_or_default()))
                .collect(),
        )
    }
}

fn parse_i64(s: &str) -> Option<i64> {
    let s = s.trim();
    if let Ok(i) = s.parse::<i64>() {
        return Some(i);
    }
    // "42.0" is an integer written as a float
    match s.parse::<f64>() {
        Ok(f) if f.is_finite() && f.fract() == 0.0 => Some(f as i64),
        _ => None,
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    match s {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}
