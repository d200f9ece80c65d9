//! Recursive merge and the combination operators.

use super::AttributeMap;
use crate::{AttrMapError, Key, PlainMap, Value};

impl AttributeMap {
    /// Deep-merge `other` into `self`.
    ///
    /// When both sides hold a mapping under the same key the incoming mapping
    /// is merged into the existing one; otherwise the incoming value replaces
    /// the current one wholesale. Incoming maps are copied, so `self` never
    /// shares children with `other` afterwards.
    pub fn update(&self, other: &AttributeMap) -> Result<(), AttrMapError> {
        self.merge_from(other.deep_copy())
    }

    /// Deep-merge a plain mapping into `self`.
    pub fn update_plain(&self, plain: PlainMap) -> Result<(), AttrMapError> {
        self.merge_from(AttributeMap::from_plain(plain))
    }

    /// Deep-merge keyword-style pairs into `self`.
    pub fn update_pairs<K, V, I>(&self, pairs: I) -> Result<(), AttrMapError>
    where
        K: Into<Key>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        self.merge_from(pairs.into_iter().collect())
    }

    /// Merge an owned map whose children nobody else holds.
    fn merge_from(&self, incoming: AttributeMap) -> Result<(), AttrMapError> {
        for (key, value) in incoming.entries() {
            match (self.get(key.clone()), value) {
                (Some(Value::Map(existing)), Value::Map(nested)) => {
                    existing.merge_from(nested)?;
                }
                (_, value) => self.set_item(key, value)?,
            }
        }
        Ok(())
    }

    /// `self | other`: a new map holding a copy of `self` updated with `other`.
    pub fn union(&self, other: &AttributeMap) -> Result<AttributeMap, AttrMapError> {
        let merged = self.deep_copy();
        merged.update(other)?;
        Ok(merged)
    }

    /// `self |= other`: update `self` in place and hand it back.
    pub fn union_assign(&self, other: &AttributeMap) -> Result<&Self, AttrMapError> {
        self.update(other)?;
        Ok(self)
    }

    /// `self | other` for a dynamically typed operand; only mappings combine.
    pub fn union_value(&self, other: &Value) -> Result<AttributeMap, AttrMapError> {
        match other {
            Value::Map(map) => self.union(map),
            other => Err(AttrMapError::UnsupportedOperand {
                op: "|",
                lhs: "AttributeMap",
                rhs: other.type_name(),
            }),
        }
    }

    /// `self + other`: an empty map acts as the identity and yields `other`;
    /// any other combination is an error, never a merge.
    pub fn try_add(&self, other: &Value) -> Result<Value, AttrMapError> {
        if self.is_empty() {
            return Ok(other.clone());
        }
        Err(AttrMapError::UnsupportedOperand {
            op: "+",
            lhs: "AttributeMap",
            rhs: other.type_name(),
        })
    }
}
