//! The auto-vivifying attribute map.
//!
//! An `AttributeMap` is a handle to a reference-counted node. Reading an absent
//! key from a map that is not frozen hands out an *unbound* child: an empty map
//! that remembers its parent (weakly) and the key it was read under. The first
//! write into that child binds it into the parent, which may in turn bind the
//! parent into its own parent. That is what lets
//! `root.child("a")?.child("b")?.set_item("c", 1)?` create `a`, `a.b` and
//! `a.b.c` in one chain.
//!
//! Maps are single-threaded (`!Send`, `!Sync`). Creating a placeholder and
//! binding it are two separate steps, so interleaving them with other writers
//! to the same parent needs external coordination.

mod merge;
mod path;


use crate::{AttrMapError, Key, PlainMap, Value};
use serde::{Serialize, Serializer};
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

/// Names that cannot be written through [`AttributeMap::set_attr`] because they
/// collide with the map's own operations. Item access is unaffected.
pub const RESERVED_NAMES: &[&str] = &[
    "attr",
    "child",
    "contains_key",
    "copy",
    "deep_copy",
    "entries",
    "freeze",
    "from_plain",
    "get",
    "get_or",
    "get_path",
    "get_path_or",
    "is_bound",
    "is_empty",
    "is_frozen",
    "item",
    "keys",
    "len",
    "new",
    "ptr_eq",
    "remove",
    "set_attr",
    "set_frozen",
    "set_item",
    "set_path",
    "setdefault",
    "to_plain",
    "try_add",
    "unfreeze",
    "union",
    "union_assign",
    "union_value",
    "update",
    "update_pairs",
    "update_plain",
    "values",
];

/// Whether `name` is reserved for one of the map's operations.
pub fn is_reserved(name: &str) -> bool {
    RESERVED_NAMES.contains(&name)
}

/// Recursive key/value container with attribute-style access, freezing,
/// dotted-path access and recursive merge.
///
/// Cloning the handle aliases the same map. [`AttributeMap::copy`] duplicates
/// the top level only and [`AttributeMap::deep_copy`] duplicates everything.
#[derive(Clone, Default)]
pub struct AttributeMap {
    node: Rc<RefCell<Node>>,
}

#[derive(Default)]
struct Node {
    entries: Vec<(Key, Value)>,
    frozen: bool,
    link: Link,
}

/// Whether a node is stored in its parent yet.
#[derive(Default)]
enum Link {
    #[default]
    Bound,
    /// Placeholder handed out by a read miss; binds into `parent[key]` on first write.
    Unbound {
        parent: Weak<RefCell<Node>>,
        key: Key,
    },
}

impl Node {
    fn position(&self, key: &Key) -> Option<usize> {
        self.entries.iter().position(|(existing, _)| existing == key)
    }

    fn lookup(&self, key: &Key) -> Option<&Value> {
        self.position(key).map(|index| &self.entries[index].1)
    }

    fn insert(&mut self, key: Key, value: Value) {
        match self.position(&key) {
            Some(index) => self.entries[index].1 = value,
            None => self.entries.push((key, value)),
        }
    }
}

impl AttributeMap {
    /// Create an empty, bound, unfrozen map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a map from a plain mapping, normalizing nested mappings (also
    /// those inside sequences) into `AttributeMap`s.
    pub fn from_plain(plain: PlainMap) -> Self {
        plain.into_iter().collect()
    }

    fn placeholder(parent: &AttributeMap, key: Key) -> Self {
        let node = Node {
            link: Link::Unbound {
                parent: Rc::downgrade(&parent.node),
                key,
            },
            ..Node::default()
        };
        Self {
            node: Rc::new(RefCell::new(node)),
        }
    }

    /// Whether both handles refer to the same map.
    pub fn ptr_eq(&self, other: &AttributeMap) -> bool {
        Rc::ptr_eq(&self.node, &other.node)
    }

    pub fn len(&self) -> usize {
        self.node.borrow().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.node.borrow().entries.is_empty()
    }

    pub fn contains_key(&self, key: impl Into<Key>) -> bool {
        self.node.borrow().position(&key.into()).is_some()
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> Vec<Key> {
        self.node
            .borrow()
            .entries
            .iter()
            .map(|(key, _)| key.clone())
            .collect()
    }

    /// Values in insertion order.
    pub fn values(&self) -> Vec<Value> {
        self.node
            .borrow()
            .entries
            .iter()
            .map(|(_, value)| value.clone())
            .collect()
    }

    /// Snapshot of the entries in insertion order.
    pub fn entries(&self) -> Vec<(Key, Value)> {
        self.node.borrow().entries.clone()
    }

    /// Plain lookup. Never creates anything, even on a miss.
    pub fn get(&self, key: impl Into<Key>) -> Option<Value> {
        self.node.borrow().lookup(&key.into()).cloned()
    }

    /// Plain lookup with a fallback for absent keys.
    pub fn get_or(&self, key: impl Into<Key>, default: impl Into<Value>) -> Value {
        self.get(key).unwrap_or_else(|| default.into())
    }

    /// Index-style read.
    ///
    /// An absent key yields a fresh unbound child map on a non-frozen map and
    /// `KeyNotFound` on a frozen one. The child is not stored until written to.
    pub fn item(&self, key: impl Into<Key>) -> Result<Value, AttrMapError> {
        let key = key.into();
        let node = self.node.borrow();
        if let Some(value) = node.lookup(&key) {
            return Ok(value.clone());
        }
        if node.frozen {
            return Err(AttrMapError::KeyNotFound(key));
        }
        drop(node);
        Ok(Value::Map(AttributeMap::placeholder(self, key)))
    }

    /// Index-style read that requires a mapping, auto-vivifying like [`item`](Self::item).
    pub fn child(&self, key: impl Into<Key>) -> Result<AttributeMap, AttrMapError> {
        let key = key.into();
        match self.item(key.clone())? {
            Value::Map(map) => Ok(map),
            other => Err(AttrMapError::NotAMapping {
                key,
                found: other.type_name(),
            }),
        }
    }

    /// Index-style write.
    ///
    /// Adding a key to a frozen map fails with `KeyNotFound`; replacing an
    /// existing key always succeeds. Writing into an unbound child also binds
    /// it into its parent and drops the back-reference.
    pub fn set_item(
        &self,
        key: impl Into<Key>,
        value: impl Into<Value>,
    ) -> Result<(), AttrMapError> {
        let key = key.into();
        let value = value.into();
        {
            let mut node = self.node.borrow_mut();
            if node.frozen && node.position(&key).is_none() {
                return Err(AttrMapError::KeyNotFound(key));
            }
            node.insert(key, value);
        }
        self.bind()
    }

    /// Store an unbound map into its parent. A parent that has been dropped
    /// leaves the map standalone.
    fn bind(&self) -> Result<(), AttrMapError> {
        let pending = match &self.node.borrow().link {
            Link::Unbound { parent, key } => Some((parent.clone(), key.clone())),
            Link::Bound => None,
        };
        let Some((parent, key)) = pending else {
            return Ok(());
        };
        if let Some(node) = parent.upgrade() {
            AttributeMap { node }.set_item(key, Value::Map(self.clone()))?;
        }
        self.node.borrow_mut().link = Link::Bound;
        Ok(())
    }

    /// Whether the map is stored in its parent (always true for maps that were
    /// not handed out by a read miss).
    pub fn is_bound(&self) -> bool {
        matches!(self.node.borrow().link, Link::Bound)
    }

    /// Attribute-style read: same as [`item`](Self::item).
    pub fn attr(&self, name: &str) -> Result<Value, AttrMapError> {
        self.item(name)
    }

    /// Attribute-style write: [`set_item`](Self::set_item) guarded by the
    /// reserved-name check.
    pub fn set_attr(&self, name: &str, value: impl Into<Value>) -> Result<(), AttrMapError> {
        if is_reserved(name) {
            return Err(AttrMapError::ReadOnlyAttribute(name.to_string()));
        }
        self.set_item(name, value)
    }

    /// Remove a key, returning its value. Allowed on frozen maps.
    pub fn remove(&self, key: impl Into<Key>) -> Option<Value> {
        let mut node = self.node.borrow_mut();
        let index = node.position(&key.into())?;
        Some(node.entries.remove(index).1)
    }

    /// Store `default` under `key` when absent, then return the stored value.
    pub fn setdefault(
        &self,
        key: impl Into<Key>,
        default: impl Into<Value>,
    ) -> Result<Value, AttrMapError> {
        let key = key.into();
        if let Some(value) = self.get(key.clone()) {
            return Ok(value);
        }
        let value = default.into();
        self.set_item(key, value.clone())?;
        Ok(value)
    }

    pub fn is_frozen(&self) -> bool {
        self.node.borrow().frozen
    }

    /// Forbid new keys on this map and every child map currently stored in it.
    pub fn freeze(&self) {
        self.set_frozen(true);
    }

    pub fn unfreeze(&self) {
        self.set_frozen(false);
    }

    /// Set the frozen flag here and recursively on every stored child map.
    /// Maps nested inside sequences are left alone.
    pub fn set_frozen(&self, frozen: bool) {
        let children: Vec<AttributeMap> = {
            let mut node = self.node.borrow_mut();
            node.frozen = frozen;
            node.entries
                .iter()
                .filter_map(|(_, value)| value.as_map().cloned())
                .collect()
        };
        for child in children {
            child.set_frozen(frozen);
        }
    }

    /// Shallow copy: a new, unfrozen map whose entries alias the same child maps.
    pub fn copy(&self) -> AttributeMap {
        self.entries().into_iter().collect()
    }

    /// Deep copy: a new, unfrozen map sharing nothing with `self`.
    pub fn deep_copy(&self) -> AttributeMap {
        self.node
            .borrow()
            .entries
            .iter()
            .map(|(key, value)| (key.clone(), value.deep_copy()))
            .collect()
    }

    /// Export to a plain mapping; the inverse of [`from_plain`](Self::from_plain).
    pub fn to_plain(&self) -> PlainMap {
        self.node
            .borrow()
            .entries
            .iter()
            .map(|(key, value)| (key.clone(), value.to_plain()))
            .collect()
    }
}

impl<K: Into<Key>, V: Into<Value>> FromIterator<(K, V)> for AttributeMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut node = Node::default();
        for (key, value) in iter {
            node.insert(key.into(), value.into());
        }
        Self {
            node: Rc::new(RefCell::new(node)),
        }
    }
}

impl From<PlainMap> for AttributeMap {
    fn from(plain: PlainMap) -> Self {
        AttributeMap::from_plain(plain)
    }
}

impl PartialEq for AttributeMap {
    fn eq(&self, other: &Self) -> bool {
        if self.ptr_eq(other) {
            return true;
        }
        let left = self.node.borrow();
        let right = other.node.borrow();
        left.entries.len() == right.entries.len()
            && left
                .entries
                .iter()
                .all(|(key, value)| right.lookup(key) == Some(value))
    }
}

impl fmt::Debug for AttributeMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let node = self.node.borrow();
        f.debug_map()
            .entries(node.entries.iter().map(|(key, value)| (key, value)))
            .finish()
    }
}

impl Serialize for AttributeMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let node = self.node.borrow();
        serializer.collect_map(node.entries.iter().map(|(key, value)| (key, value)))
    }
}
