//! Values stored in an `AttributeMap`.

use crate::{AttributeMap, PlainMap, PlainValue};
use serde::{Serialize, Serializer};

/// A config value held by an `AttributeMap`.
///
/// Nested mappings are always `AttributeMap` handles: every conversion into
/// `Value` normalizes plain mappings, including mappings inside sequences.
/// Cloning a `Value::Map` aliases the same map; use [`Value::deep_copy`] for an
/// independent tree.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    /// Mutable ordered sequence.
    List(Vec<Value>),
    /// Fixed-size sequence.
    Tuple(Box<[Value]>),
    Map(AttributeMap),
}

impl Value {
    /// Short name of the value kind, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "str",
            Value::List(_) => "list",
            Value::Tuple(_) => "tuple",
            Value::Map(_) => "AttributeMap",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_map(&self) -> Option<&AttributeMap> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn into_map(self) -> Option<AttributeMap> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(value) => Some(*value),
            _ => None,
        }
    }

    /// Numeric value as a float; integers are widened.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(value) => Some(*value),
            Value::Int(value) => Some(*value as f64),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(value) => Some(*value),
            _ => None,
        }
    }

    /// Sequence elements, for both lists and tuples.
    pub fn as_slice(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            Value::Tuple(items) => Some(items),
            _ => None,
        }
    }

    /// Export to a plain value, recursively converting nested maps.
    pub fn to_plain(&self) -> PlainValue {
        match self {
            Value::Null => PlainValue::Null,
            Value::Bool(value) => PlainValue::Bool(*value),
            Value::Int(value) => PlainValue::Int(*value),
            Value::Float(value) => PlainValue::Float(*value),
            Value::Str(value) => PlainValue::Str(value.clone()),
            Value::List(items) => PlainValue::List(items.iter().map(Value::to_plain).collect()),
            Value::Tuple(items) => PlainValue::Tuple(items.iter().map(Value::to_plain).collect()),
            Value::Map(map) => PlainValue::Map(map.to_plain()),
        }
    }

    /// Recursively duplicate the value so no nested map is shared with `self`.
    pub fn deep_copy(&self) -> Value {
        match self {
            Value::List(items) => Value::List(items.iter().map(Value::deep_copy).collect()),
            Value::Tuple(items) => Value::Tuple(items.iter().map(Value::deep_copy).collect()),
            Value::Map(map) => Value::Map(map.deep_copy()),
            scalar => scalar.clone(),
        }
    }
}

impl From<PlainValue> for Value {
    fn from(value: PlainValue) -> Self {
        match value {
            PlainValue::Null => Value::Null,
            PlainValue::Bool(value) => Value::Bool(value),
            PlainValue::Int(value) => Value::Int(value),
            PlainValue::Float(value) => Value::Float(value),
            PlainValue::Str(value) => Value::Str(value),
            PlainValue::List(items) => Value::List(items.into_iter().map(Value::from).collect()),
            PlainValue::Tuple(items) => {
                Value::Tuple(items.into_vec().into_iter().map(Value::from).collect())
            }
            PlainValue::Map(map) => Value::Map(AttributeMap::from_plain(map)),
        }
    }
}

impl From<PlainMap> for Value {
    fn from(map: PlainMap) -> Self {
        Value::Map(AttributeMap::from_plain(map))
    }
}

impl From<AttributeMap> for Value {
    fn from(map: AttributeMap) -> Self {
        Value::Map(map)
    }
}

impl From<&AttributeMap> for Value {
    fn from(map: &AttributeMap) -> Self {
        Value::Map(map.clone())
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        Value::from(PlainValue::from(value))
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(i64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Str(value)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(value) => serializer.serialize_bool(*value),
            Value::Int(value) => serializer.serialize_i64(*value),
            Value::Float(value) => serializer.serialize_f64(*value),
            Value::Str(value) => serializer.serialize_str(value),
            Value::List(items) => serializer.collect_seq(items),
            Value::Tuple(items) => serializer.collect_seq(items.iter()),
            Value::Map(map) => map.serialize(serializer),
        }
    }
}
