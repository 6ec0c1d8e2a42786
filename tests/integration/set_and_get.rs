//! Integration tests for Set, Get and IsSet

use cfgtree::{Params, Store, Value};
use serde_json::json;
use std::collections::{BTreeMap, HashMap};

fn value(v: serde_json::Value) -> Value {
    Value::from(v)
}

/// Scalars round-trip through any casing of the key
#[test]
fn test_set_and_get_scalar() {
    let store = Store::new();

    store.set("foo", "bar");
    assert_eq!(store.get("foo"), Some(Value::from("bar")));
    assert_eq!(store.get("FOO"), Some(Value::from("bar")));
    assert_eq!(store.get_string("foo"), "bar");

    store.set("foo", 42);
    assert_eq!(store.get("foo"), Some(Value::from(42)));
    assert_eq!(store.get_int("foo"), 42);

    assert_eq!(store.get(""), Some(value(json!({"foo": 42}))));
}

/// Maps come back as canonical maps and through both map accessors
#[test]
fn test_set_and_get_map() {
    let store = Store::new();

    let mut map = HashMap::new();
    map.insert("bar", "baz");
    store.set("foo", map);

    assert_eq!(store.get("foo"), Some(value(json!({"bar": "baz"}))));

    let expected: Params = [("bar", "baz")].into_iter().collect();
    assert_eq!(store.get_string_map("foo"), expected);

    let mut expected = BTreeMap::new();
    expected.insert("bar".to_string(), "baz".to_string());
    assert_eq!(store.get_string_map_string("foo"), expected);
}

/// Dotted keys and map values address the same nodes
#[test]
fn test_set_and_get_nested() {
    let store = Store::new();

    store.set("a", json!({"B": "bv"}));
    store.set("a.c", "cv");

    assert_eq!(store.get("a"), Some(value(json!({"b": "bv", "c": "cv"}))));
    assert_eq!(store.get("a.c"), Some(Value::from("cv")));

    store.set("b.a", "av");
    assert_eq!(store.get("b"), Some(value(json!({"a": "av"}))));

    store.set("b", json!({"b": "bv"}));
    assert_eq!(store.get("b"), Some(value(json!({"a": "av", "b": "bv"}))));
}

/// Setting a map at the root overwrites conflicting keys and keeps the rest
#[test]
fn test_root_set_upserts() {
    let store = Store::new();
    store.set("a", "av");
    store.set("", json!({"a": "av2", "b": "bv2"}));
    assert_eq!(store.get(""), Some(value(json!({"a": "av2", "b": "bv2"}))));

    let store = Store::new();
    store.set("a", "av");
    store.set("", json!({"b": "bv2"}));
    assert_eq!(store.get(""), Some(value(json!({"a": "av", "b": "bv2"}))));

    let store = Store::new();
    store.set("", json!({"foo": {"a": "av"}}));
    store.set("", json!({"foo": {"b": "bv2"}}));
    assert_eq!(store.get("foo"), Some(value(json!({"a": "av", "b": "bv2"}))));
}

/// Keys differing only in case share one slot
#[test]
fn test_case_variants_share_a_slot() {
    let store = Store::new();
    store.set("Title", "first");
    store.set("TITLE", "second");
    store.set("params.Color", "red");
    store.set("PARAMS.color", "blue");

    assert_eq!(store.get(""), Some(value(json!({
        "title": "second",
        "params": {"color": "blue"}
    }))));
}

#[test]
fn test_is_set() {
    let store = Store::new();
    store.set("a", json!({"B": "bv"}));

    assert!(store.is_set("A"));
    assert!(store.is_set("a.b"));
    assert!(!store.is_set("z"));
    assert!(!store.is_set("a.b.c"));
}

/// Nested maps from the benchmark shape are reachable at every depth
#[test]
fn test_deep_map_access() {
    let store = Store::new();
    store.set(
        "mymap",
        json!({"a": {"b": {"c": 32, "d": 43}}, "b": 62}),
    );
    store.set("num", 32);

    assert!(store.is_set("mymap"));
    assert!(store.is_set("mymap.a"));
    assert!(store.is_set("mymap.a.b"));
    assert!(store.is_set("mymap.a.b.c"));
    assert_eq!(store.get("num"), Some(Value::from(32)));
    assert_eq!(store.get("mymap.a.b.c"), Some(Value::from(32)));
}

/// Values returned by get are detached from the tree
#[test]
fn test_get_returns_owned_copy() {
    let store = Store::new();
    store.set("a", json!({"b": 1}));

    let mut copy = store.get("a").and_then(Value::into_map).unwrap();
    copy.insert("c", 2);

    assert_eq!(store.get("a"), Some(value(json!({"b": 1}))));
}
