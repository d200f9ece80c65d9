//! Plain nested mappings exchanged with loaders and produced by export.
//!
//! `PlainValue` mirrors `Value` but holds `PlainMap` instead of live
//! `AttributeMap` handles, so it can cross threads and be handed to any serde
//! format.

use crate::Key;
use serde::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Unexpected, Visitor};
use serde::{Serialize, Serializer};
use std::fmt;

/// A plain config value.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum PlainValue {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    /// Mutable ordered sequence.
    List(Vec<PlainValue>),
    /// Fixed-size sequence; kept distinct from `List` through normalization and export.
    Tuple(Box<[PlainValue]>),
    Map(PlainMap),
}

impl PlainValue {
    /// Short name of the value kind, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            PlainValue::Null => "null",
            PlainValue::Bool(_) => "bool",
            PlainValue::Int(_) => "int",
            PlainValue::Float(_) => "float",
            PlainValue::Str(_) => "str",
            PlainValue::List(_) => "list",
            PlainValue::Tuple(_) => "tuple",
            PlainValue::Map(_) => "mapping",
        }
    }

    /// Convert into a JSON value. Non-string keys are rendered as strings,
    /// tuples become arrays and non-finite floats become `null`. Keys that
    /// render to the same string collapse into the last one.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            PlainValue::Null => serde_json::Value::Null,
            PlainValue::Bool(value) => serde_json::Value::Bool(*value),
            PlainValue::Int(value) => serde_json::Value::from(*value),
            PlainValue::Float(value) => serde_json::Number::from_f64(*value)
                .map_or(serde_json::Value::Null, serde_json::Value::Number),
            PlainValue::Str(value) => serde_json::Value::String(value.clone()),
            PlainValue::List(items) => items.iter().map(PlainValue::to_json).collect(),
            PlainValue::Tuple(items) => items.iter().map(PlainValue::to_json).collect(),
            PlainValue::Map(map) => map.to_json(),
        }
    }
}

/// An insertion-ordered mapping with unique keys.
///
/// Equality ignores insertion order.
#[derive(Debug, Clone, Default)]
pub struct PlainMap {
    entries: Vec<(Key, PlainValue)>,
}

impl PlainMap {
    /// Create an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the mapping has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Insert a value, replacing and returning any previous value for the key.
    /// A replaced key keeps its original position.
    pub fn insert(
        &mut self,
        key: impl Into<Key>,
        value: impl Into<PlainValue>,
    ) -> Option<PlainValue> {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == key) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    /// Look up a value by key.
    pub fn get(&self, key: impl Into<Key>) -> Option<&PlainValue> {
        let key = key.into();
        self.entries
            .iter()
            .find(|(existing, _)| *existing == key)
            .map(|(_, value)| value)
    }

    /// Whether the key is present.
    pub fn contains_key(&self, key: impl Into<Key>) -> bool {
        self.get(key).is_some()
    }

    /// Remove a key, returning its value.
    pub fn remove(&mut self, key: impl Into<Key>) -> Option<PlainValue> {
        let key = key.into();
        let index = self.entries.iter().position(|(existing, _)| *existing == key)?;
        Some(self.entries.remove(index).1)
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&Key, &PlainValue)> {
        self.entries.iter().map(|(key, value)| (key, value))
    }

    /// Iterate keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &Key> {
        self.entries.iter().map(|(key, _)| key)
    }

    /// Convert into a JSON object, keeping entry order. See [`PlainValue::to_json`].
    pub fn to_json(&self) -> serde_json::Value {
        let object = self
            .entries
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_json()))
            .collect::<serde_json::Map<_, _>>();
        serde_json::Value::Object(object)
    }

    /// Build from a JSON value. `null` yields an empty mapping; any other
    /// non-object yields `None`.
    pub fn from_json(value: serde_json::Value) -> Option<Self> {
        match PlainValue::from(value) {
            PlainValue::Map(map) => Some(map),
            PlainValue::Null => Some(Self::new()),
            _ => None,
        }
    }
}

impl PartialEq for PlainMap {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .entries
                .iter()
                .all(|(key, value)| other.get(key) == Some(value))
    }
}

impl<K: Into<Key>, V: Into<PlainValue>> FromIterator<(K, V)> for PlainMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = PlainMap::new();
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}

impl IntoIterator for PlainMap {
    type Item = (Key, PlainValue);
    type IntoIter = std::vec::IntoIter<(Key, PlainValue)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl From<bool> for PlainValue {
    fn from(value: bool) -> Self {
        PlainValue::Bool(value)
    }
}

impl From<i64> for PlainValue {
    fn from(value: i64) -> Self {
        PlainValue::Int(value)
    }
}

impl From<i32> for PlainValue {
    fn from(value: i32) -> Self {
        PlainValue::Int(i64::from(value))
    }
}

impl From<f64> for PlainValue {
    fn from(value: f64) -> Self {
        PlainValue::Float(value)
    }
}

impl From<&str> for PlainValue {
    fn from(value: &str) -> Self {
        PlainValue::Str(value.to_string())
    }
}

impl From<String> for PlainValue {
    fn from(value: String) -> Self {
        PlainValue::Str(value)
    }
}

impl From<PlainMap> for PlainValue {
    fn from(value: PlainMap) -> Self {
        PlainValue::Map(value)
    }
}

impl<T: Into<PlainValue>> From<Vec<T>> for PlainValue {
    fn from(items: Vec<T>) -> Self {
        PlainValue::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<PlainValue>> From<Option<T>> for PlainValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(PlainValue::Null, Into::into)
    }
}

impl From<serde_json::Value> for PlainValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => PlainValue::Null,
            serde_json::Value::Bool(value) => PlainValue::Bool(value),
            serde_json::Value::Number(number) => match number.as_i64() {
                Some(value) => PlainValue::Int(value),
                None => PlainValue::Float(number.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(value) => PlainValue::Str(value),
            serde_json::Value::Array(items) => {
                PlainValue::List(items.into_iter().map(PlainValue::from).collect())
            }
            serde_json::Value::Object(object) => PlainValue::Map(
                object
                    .into_iter()
                    .map(|(key, value)| (key, PlainValue::from(value)))
                    .collect(),
            ),
        }
    }
}

impl Serialize for PlainValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            PlainValue::Null => serializer.serialize_unit(),
            PlainValue::Bool(value) => serializer.serialize_bool(*value),
            PlainValue::Int(value) => serializer.serialize_i64(*value),
            PlainValue::Float(value) => serializer.serialize_f64(*value),
            PlainValue::Str(value) => serializer.serialize_str(value),
            PlainValue::List(items) => serializer.collect_seq(items),
            PlainValue::Tuple(items) => serializer.collect_seq(items.iter()),
            PlainValue::Map(map) => map.serialize(serializer),
        }
    }
}

impl Serialize for PlainMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.entries.iter().map(|(key, value)| (key, value)))
    }
}

struct PlainValueVisitor;

impl<'de> Visitor<'de> for PlainValueVisitor {
    type Value = PlainValue;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a config value")
    }

    fn visit_bool<E: de::Error>(self, value: bool) -> Result<PlainValue, E> {
        Ok(PlainValue::Bool(value))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<PlainValue, E> {
        Ok(PlainValue::Int(value))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<PlainValue, E> {
        Ok(i64::try_from(value).map_or(PlainValue::Float(value as f64), PlainValue::Int))
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<PlainValue, E> {
        Ok(PlainValue::Float(value))
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<PlainValue, E> {
        Ok(PlainValue::Str(value.to_string()))
    }

    fn visit_string<E: de::Error>(self, value: String) -> Result<PlainValue, E> {
        Ok(PlainValue::Str(value))
    }

    fn visit_none<E: de::Error>(self) -> Result<PlainValue, E> {
        Ok(PlainValue::Null)
    }

    fn visit_unit<E: de::Error>(self) -> Result<PlainValue, E> {
        Ok(PlainValue::Null)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<PlainValue, D::Error> {
        PlainValue::deserialize(deserializer)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<PlainValue, A::Error> {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element()? {
            items.push(item);
        }
        Ok(PlainValue::List(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<PlainValue, A::Error> {
        let mut map = PlainMap::new();
        while let Some((key, value)) = access.next_entry::<Key, PlainValue>()? {
            map.insert(key, value);
        }
        Ok(PlainValue::Map(map))
    }
}

impl<'de> Deserialize<'de> for PlainValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(PlainValueVisitor)
    }
}

impl<'de> Deserialize<'de> for PlainMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match PlainValue::deserialize(deserializer)? {
            PlainValue::Map(map) => Ok(map),
            PlainValue::Null => Ok(PlainMap::new()),
            other => Err(de::Error::invalid_type(
                Unexpected::Other(other.type_name()),
                &"a mapping",
            )),
        }
    }
}
