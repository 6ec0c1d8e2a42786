//! Integration tests for Merge and the `_merge` strategy marker

use cfgtree::{MergeStrategy, Params, RawValue, Store, Value, MERGE_STRATEGY_KEY};
use serde_json::json;
use std::collections::HashMap;

fn value(v: serde_json::Value) -> Value {
    Value::from(v)
}

/// The three shapes a loader may hand over for `{c: "cv1"}`-like content
fn representations(pairs: &[(&str, &str)]) -> Vec<Value> {
    let string_string: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    let string_any: HashMap<String, Value> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), Value::from(*v)))
        .collect();
    let any_any = RawValue::map(pairs.iter().map(|(k, v)| (*k, *v)));

    vec![
        Value::from(string_string),
        Value::from(string_any),
        Value::try_from(any_any).unwrap(),
    ]
}

/// Default merge keeps existing leaves and adds missing keys
#[test]
fn test_merge_default_strategy() {
    let store = Store::new();
    store.set("a", json!({"B": "bv"}));
    store.merge("a", json!({"B": "bv2", "c": "cv2"}));
    assert_eq!(store.get("a"), Some(value(json!({"b": "bv", "c": "cv2"}))));

    let store = Store::new();
    store.set("a", "av");
    store.merge("", json!({"a": "av2", "b": "bv2"}));
    assert_eq!(store.get(""), Some(value(json!({"a": "av", "b": "bv2"}))));
}

/// Set and Merge resolve conflicts in opposite directions
#[test]
fn test_set_and_merge_precedence_differ() {
    let set_store = Store::new();
    set_store.set("a", json!({"b": "old"}));
    set_store.set("a", json!({"b": "new"}));

    let merge_store = Store::new();
    merge_store.set("a", json!({"b": "old"}));
    merge_store.merge("a", json!({"b": "new"}));

    assert_eq!(set_store.get_string("a.b"), "new");
    assert_eq!(merge_store.get_string("a.b"), "old");
}

/// A shallow node keeps shared keys untouched even when both sides are maps
#[test]
fn test_merge_shallow() {
    let store = Store::new();
    store.set(
        "a",
        json!({"_merge": "shallow", "B": "bv", "c": {"b": "bv"}}),
    );
    store.merge("a", json!({"c": {"d": "dv2"}, "e": "ev2"}));

    assert_eq!(
        store.get("a"),
        Some(value(json!({
            "e": "ev2",
            "_merge": "shallow",
            "b": "bv",
            "c": {"b": "bv"}
        })))
    );
}

/// The marker is read at merge time, so setting it later switches strategy
#[test]
fn test_marker_set_later_switches_strategy() {
    let store = Store::new();
    store.set("a", json!({"c": {"x": 1}}));

    store.merge("a", json!({"c": {"y": 2}}));
    assert_eq!(store.get("a.c"), Some(value(json!({"x": 1, "y": 2}))));

    store.set(&format!("a.{}", MERGE_STRATEGY_KEY), MergeStrategy::Shallow.as_str());
    store.merge("a", json!({"c": {"z": 3}, "d": 4}));
    assert_eq!(store.get("a.c"), Some(value(json!({"x": 1, "y": 2}))));
    assert_eq!(store.get_int("a.d"), 4);
}

/// The marker binds only its own node
#[test]
fn test_marker_not_inherited_by_children() {
    let store = Store::new();
    store.set("a", json!({"_merge": "shallow", "c": {"x": 1}}));

    // Merging directly into the child uses the child's (default) strategy.
    store.merge("a.c", json!({"y": 2}));
    assert_eq!(store.get("a.c"), Some(value(json!({"x": 1, "y": 2}))));
}

/// Loader map shapes merge identically
#[test]
fn test_merge_typed_maps() {
    for left in representations(&[("c", "cv1")]) {
        let store = Store::new();
        let mut root = Params::new();
        root.insert("b", left);
        store.set("", root);

        store.merge("", json!({"b": {"c": "cv2", "d": "dv2"}}));

        assert_eq!(
            store.get(""),
            Some(value(json!({"b": {"c": "cv1", "d": "dv2"}})))
        );
    }

    for left in representations(&[("b", "bv1")]) {
        for right in representations(&[("b", "bv2"), ("c", "cv2")]) {
            let store = Store::new();
            store.set("a", left.clone());
            store.merge("a", right);

            assert_eq!(
                store.get(""),
                Some(value(json!({"a": {"b": "bv1", "c": "cv2"}})))
            );
        }
    }
}

/// Any-keyed input merges after key folding
#[test]
fn test_merge_raw_with_scalar_keys() {
    let store = Store::new();
    store.set("ports", json!({"80": "http"}));
    store
        .merge_raw(
            "ports",
            RawValue::map([
                (RawValue::Int(80), RawValue::from("ignored")),
                (RawValue::Int(443), RawValue::from("https")),
            ]),
        )
        .unwrap();

    assert_eq!(
        store.get("ports"),
        Some(value(json!({"80": "http", "443": "https"})))
    );
}

/// Keys that cannot be folded fail the operation and leave the tree alone
#[test]
fn test_unsupported_keys_rejected() {
    let store = Store::new();
    store.set("a", 1);

    let bad = RawValue::map([(
        RawValue::from("Nested"),
        RawValue::map([(RawValue::map([("k", "v")]), RawValue::Int(1))]),
    )]);

    let err = store.set_raw("x", bad.clone()).unwrap_err();
    assert!(err.to_string().contains("nested"));
    assert!(store.merge_raw("", bad).is_err());

    assert_eq!(store.get(""), Some(value(json!({"a": 1}))));
}

/// Defaults never override configured values
#[test]
fn test_set_defaults_after_config() {
    let store = Store::new();
    store.set("", json!({"_merge": "none", "title": "mine"}));
    store.set_defaults(json!({"title": "default", "baseurl": "/"}));

    assert_eq!(store.get_string("title"), "mine");
    assert_eq!(store.get_string("baseurl"), "/");

    // A root tagged "none" ignores regular merges.
    store.merge("", json!({"extra": 1}));
    assert!(!store.is_set("extra"));
}
