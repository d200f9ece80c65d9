//! Attribute-style access to hierarchical configuration data.
//!
//! `AttributeMap` is a recursive key/value container that auto-vivifies
//! missing nested paths on write, can be frozen against structural growth,
//! supports dotted-path access and merges recursively. `PlainMap` is the plain
//! nested mapping it is built from and exported to.

mod error;
mod key;
mod map;
mod plain;
mod value;

/// Error type for map access and merge operations.
pub use error::AttrMapError;
/// Mapping key type.
pub use key::Key;
/// The attribute map and its reserved attribute names.
pub use map::{AttributeMap, RESERVED_NAMES, is_reserved};
/// Plain interchange types.
pub use plain::{PlainMap, PlainValue};
/// Values held by an attribute map.
pub use value::Value;
