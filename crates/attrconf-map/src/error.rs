//! Error types for attribute map access.

use crate::Key;
use thiserror::Error;

/// Errors returned by `AttributeMap` reads, writes and merges.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AttrMapError {
    /// The key is absent and the map is frozen, so it cannot be read or created.
    #[error("key not found: {0}")]
    KeyNotFound(Key),
    /// The attribute name collides with one of the map's own operations.
    #[error("'AttributeMap' object attribute '{0}' is read-only")]
    ReadOnlyAttribute(String),
    /// A dotted-path write ran into a non-mapping value before the last segment.
    #[error("cannot set nested path '{path}': '{segment}' is not a mapping (got {found})")]
    NestedPath {
        path: String,
        segment: String,
        found: &'static str,
    },
    /// A mapping was required at `key` but another kind of value is stored there.
    #[error("expected a mapping at '{key}', got {found}")]
    NotAMapping { key: Key, found: &'static str },
    /// The combination operator does not accept these operands.
    #[error("unsupported operand type(s) for {op}: '{lhs}' and '{rhs}'")]
    UnsupportedOperand {
        op: &'static str,
        lhs: &'static str,
        rhs: &'static str,
    },
}

impl AttrMapError {
    /// Whether this error belongs to the type-mismatch family (bad path or operand).
    pub fn is_type_mismatch(&self) -> bool {
        matches!(
            self,
            Self::NestedPath { .. } | Self::NotAMapping { .. } | Self::UnsupportedOperand { .. }
        )
    }
}
