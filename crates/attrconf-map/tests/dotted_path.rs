//! Dotted-path access tests.

use attrconf_map::{AttrMapError, AttributeMap, PlainMap, Value};
use pretty_assertions::assert_eq;
use serde_json::json;

fn map(value: serde_json::Value) -> AttributeMap {
    AttributeMap::from_plain(PlainMap::from_json(value).expect("object"))
}

/// Keys with characters that are not identifiers work through dotted paths.
#[test]
fn set_and_get_hyphenated_keys() {
    let root = AttributeMap::new();
    root.set_path("db.host-name", "localhost").expect("set");
    assert_eq!(root.get_path("db.host-name"), Some(Value::from("localhost")));
    assert_eq!(root.get_path_or("db.missing", "D"), Value::from("D"));
    assert_eq!(
        root.child("db").expect("db").get("host-name"),
        Some(Value::from("localhost"))
    );
}

/// A path without dots is a plain lookup.
#[test]
fn single_segment_path_is_plain_get() {
    let root = map(json!({"key-with-dash": 1}));
    assert_eq!(root.get_path("key-with-dash"), Some(Value::Int(1)));
    assert_eq!(root.get_path_or("not-exist", "default"), Value::from("default"));
    root.set_path("new-key", 100).expect("set");
    assert_eq!(root.get("new-key"), Some(Value::Int(100)));
}

/// Reads never create anything.
#[test]
fn get_path_does_not_vivify() {
    let root = AttributeMap::new();
    assert_eq!(root.get_path("a.b.c"), None);
    assert!(root.is_empty());
}

/// Walking through a scalar yields the default.
#[test]
fn get_path_through_scalar_returns_default() {
    let root = map(json!({"a": {"b": 1}}));
    assert_eq!(root.get_path_or("a.b.c", 0), Value::Int(0));
    assert_eq!(root.get_path("a.b"), Some(Value::Int(1)));
}

/// A stored null is returned as null, not as the default.
#[test]
fn get_path_returns_stored_null() {
    let root = map(json!({"a": {"b": null}}));
    assert_eq!(root.get_path_or("a.b", 5), Value::Null);
}

/// Sequences are not traversed.
#[test]
fn get_path_does_not_index_sequences() {
    let root = map(json!({"list": [{"a": 1}]}));
    assert_eq!(root.get_path("list.0.a"), None);
}

/// Intermediate maps are created and existing ones reused.
#[test]
fn set_path_reuses_existing_levels() {
    let root = map(json!({"service": {"name": "api"}}));
    root.set_path("service.endpoint-url", "https://api.example.com")
        .expect("set");
    root.set_path("service.retry.count", 3).expect("set");
    assert_eq!(root.get_path("service.name"), Some(Value::from("api")));
    assert_eq!(root.get_path("service.retry.count"), Some(Value::Int(3)));
}

/// A scalar in the middle of the path blocks nested creation.
#[test]
fn set_path_through_scalar_fails() {
    let root = map(json!({"a": 1}));
    let err = root.set_path("a.b", 2).unwrap_err();
    assert_eq!(
        err,
        AttrMapError::NestedPath {
            path: "a.b".to_string(),
            segment: "a".to_string(),
            found: "int",
        }
    );
    assert_eq!(root.get("a"), Some(Value::Int(1)));
}

/// Missing intermediate levels cannot be added to a frozen map.
#[test]
fn set_path_on_frozen_map() {
    let root = map(json!({"a": {"b": 1}}));
    root.freeze();
    root.set_path("a.b", 2).expect("replace existing");
    assert!(matches!(
        root.set_path("x.y", 1),
        Err(AttrMapError::KeyNotFound(_))
    ));
    assert!(matches!(
        root.set_path("a.c", 1),
        Err(AttrMapError::KeyNotFound(_))
    ));
}

/// Written mappings are normalized like construction input.
#[test]
fn set_path_normalizes_plain_mappings() {
    let root = AttributeMap::new();
    let value = PlainMap::from_json(json!({"inner": {"k": "v"}})).expect("object");
    root.set_path("outer", value).expect("set");
    assert_eq!(root.get_path("outer.inner.k"), Some(Value::from("v")));
}
