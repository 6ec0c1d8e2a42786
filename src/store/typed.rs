//! Typed accessors. A missing key or a value that does not coerce yields the
//! target type's zero value.

use super::Store;
use crate::value::{Params, Value};
use std::collections::BTreeMap;

impl Store {
    pub fn get_string(&self, key: &str) -> String {
        self.with_value(key, |v| v.and_then(Value::coerce_string))
            .unwrap_or_default()
    }

    pub fn get_int(&self, key: &str) -> i64 {
        self.with_value(key, |v| v.and_then(Value::coerce_i64))
            .unwrap_or_default()
    }

    pub fn get_float(&self, key: &str) -> f64 {
        self.with_value(key, |v| v.and_then(Value::coerce_f64))
            .unwrap_or_default()
    }

    pub fn get_bool(&self, key: &str) -> bool {
        self.with_value(key, |v| v.and_then(Value::coerce_bool))
            .unwrap_or_default()
    }

    pub fn get_string_slice(&self, key: &str) -> Vec<String> {
        self.with_value(key, |v| v.and_then(Value::coerce_string_slice))
            .unwrap_or_default()
    }

    /// The map at `key`, or an empty map.
    pub fn get_string_map(&self, key: &str) -> Params {
        self.with_value(key, |v| v.and_then(Value::coerce_string_map))
            .unwrap_or_default()
    }

    /// The map at `key` with every entry stringified, or an empty map.
    pub fn get_string_map_string(&self, key: &str) -> BTreeMap<String, String> {
        self.with_value(key, |v| v.and_then(Value::coerce_string_map_string))
            .unwrap_or_default()
    }
}
