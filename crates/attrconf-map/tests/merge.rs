//! Recursive merge and combination operator tests.

use attrconf_map::{AttrMapError, AttributeMap, PlainMap, Value};
use pretty_assertions::assert_eq;
use serde_json::json;

fn map(value: serde_json::Value) -> AttributeMap {
    AttributeMap::from_plain(PlainMap::from_json(value).expect("object"))
}

fn plain(value: serde_json::Value) -> PlainMap {
    PlainMap::from_json(value).expect("object")
}

/// Two mappings under the same key are merged, not replaced.
#[test]
fn update_merges_nested_mappings() {
    let base = map(json!({"a": {"x": 1}}));
    base.update(&map(json!({"a": {"y": 2}}))).expect("update");
    assert_eq!(base.to_plain(), plain(json!({"a": {"x": 1, "y": 2}})));
}

/// A non-mapping incoming value replaces a mapping wholesale.
#[test]
fn update_overwrites_when_incoming_is_scalar() {
    let base = map(json!({"a": {"x": 1}}));
    base.update(&map(json!({"a": 5}))).expect("update");
    assert_eq!(base.to_plain(), plain(json!({"a": 5})));
}

/// A mapping replaces a scalar wholesale as well.
#[test]
fn update_overwrites_scalar_with_mapping() {
    let base = map(json!({"a": 5}));
    base.update(&map(json!({"a": {"x": 1}}))).expect("update");
    assert_eq!(base.to_plain(), plain(json!({"a": {"x": 1}})));
}

/// Sequences are replaced, never concatenated, and their mappings are normalized.
#[test]
fn update_replaces_sequences() {
    let base = map(json!({"hosts": [{"name": "a"}, {"name": "b"}]}));
    base.update_plain(plain(json!({"hosts": [{"name": "c"}]})))
        .expect("update");
    assert_eq!(base.to_plain(), plain(json!({"hosts": [{"name": "c"}]})));
    let hosts = base.get("hosts").expect("hosts");
    assert!(hosts.as_slice().expect("list")[0].as_map().is_some());
}

/// Layering several sources keeps the deepest untouched values.
#[test]
fn layered_updates_apply_in_order() {
    let config = AttributeMap::new();
    config
        .update_plain(plain(json!({"db": {"host": "localhost", "port": 5432}, "debug": false})))
        .expect("defaults");
    config
        .update_plain(plain(json!({"db": {"host": "db.internal"}})))
        .expect("site");
    config
        .update_pairs([("debug", Value::Bool(true))])
        .expect("runtime");
    assert_eq!(
        config.to_plain(),
        plain(json!({"db": {"host": "db.internal", "port": 5432}, "debug": true}))
    );
}

/// Merged children are copies; later edits to the source do not leak in.
#[test]
fn update_does_not_share_children_with_source() {
    let base = AttributeMap::new();
    let source = map(json!({"nested": {"a": 1}}));
    base.update(&source).expect("update");
    source.child("nested").expect("nested").set_item("a", 2).expect("edit");
    assert_eq!(base.get_path("nested.a"), Some(Value::Int(1)));
}

/// Merging new keys into a frozen map fails; replacing existing ones works.
#[test]
fn update_respects_freeze() {
    let base = map(json!({"a": {"x": 1}}));
    base.freeze();
    base.update(&map(json!({"a": {"x": 2}}))).expect("replace");
    assert_eq!(base.get_path("a.x"), Some(Value::Int(2)));
    let err = base.update(&map(json!({"a": {"y": 2}}))).unwrap_err();
    assert!(matches!(err, AttrMapError::KeyNotFound(_)));
}

/// `|` builds a new map and leaves both operands untouched.
#[test]
fn union_returns_new_map() {
    let left = map(json!({"a": {"x": 1}, "b": 1}));
    let right = map(json!({"a": {"y": 2}}));
    let merged = left.union(&right).expect("union");
    assert_eq!(merged.to_plain(), plain(json!({"a": {"x": 1, "y": 2}, "b": 1})));
    assert_eq!(left.to_plain(), plain(json!({"a": {"x": 1}, "b": 1})));
    assert_eq!(right.to_plain(), plain(json!({"a": {"y": 2}})));
}

/// `|` works even when the left side is frozen, since it writes into a copy.
#[test]
fn union_of_frozen_map_succeeds() {
    let left = map(json!({"a": 1}));
    left.freeze();
    let merged = left.union(&map(json!({"b": 2}))).expect("union");
    assert!(!merged.is_frozen());
    assert_eq!(merged.len(), 2);
}

/// `|=` updates in place and returns the same map.
#[test]
fn union_assign_updates_in_place() {
    let left = map(json!({"a": 1}));
    let returned = left.union_assign(&map(json!({"b": 2}))).expect("union");
    assert!(returned.ptr_eq(&left));
    assert_eq!(left.to_plain(), plain(json!({"a": 1, "b": 2})));
}

/// Only mappings can be combined with `|`.
#[test]
fn union_with_non_mapping_is_unsupported() {
    let left = map(json!({"a": 1}));
    let err = left.union_value(&Value::Int(3)).unwrap_err();
    assert_eq!(
        err,
        AttrMapError::UnsupportedOperand {
            op: "|",
            lhs: "AttributeMap",
            rhs: "int",
        }
    );
    assert!(left.union_value(&Value::Map(map(json!({"b": 2})))).is_ok());
}

/// `+` treats an empty map as identity and rejects everything else.
#[test]
fn add_is_identity_only() {
    let empty = AttributeMap::new();
    assert_eq!(empty.try_add(&Value::Int(7)).expect("identity"), Value::Int(7));

    let full = map(json!({"a": 1}));
    let err = full.try_add(&Value::Map(map(json!({"b": 2})))).unwrap_err();
    assert!(err.is_type_mismatch());
    assert_eq!(
        err.to_string(),
        "unsupported operand type(s) for +: 'AttributeMap' and 'AttributeMap'"
    );
}
