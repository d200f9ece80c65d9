//! Dotted-path access for keys that are not valid identifiers.

use super::AttributeMap;
use crate::{AttrMapError, Value};

impl AttributeMap {
    /// Walk `path` split on `.` without creating anything.
    ///
    /// Returns `None` as soon as a segment is missing or a non-mapping value
    /// is reached before the path is exhausted.
    pub fn get_path(&self, path: &str) -> Option<Value> {
        let mut segments = path.split('.');
        let mut current = self.get(segments.next()?)?;
        for segment in segments {
            current = match current {
                Value::Map(map) => map.get(segment)?,
                _ => return None,
            };
        }
        Some(current)
    }

    /// [`get_path`](Self::get_path) with a fallback.
    pub fn get_path_or(&self, path: &str, default: impl Into<Value>) -> Value {
        self.get_path(path).unwrap_or_else(|| default.into())
    }

    /// Set the value at `path`, creating intermediate maps as needed.
    ///
    /// Fails with `NestedPath` when an intermediate segment holds a
    /// non-mapping value, and with `KeyNotFound` when a missing segment would
    /// have to be added to a frozen map.
    pub fn set_path(&self, path: &str, value: impl Into<Value>) -> Result<(), AttrMapError> {
        let Some((parents, last)) = path.rsplit_once('.') else {
            return self.set_item(path, value);
        };
        let mut current = self.clone();
        for segment in parents.split('.') {
            current = match current.get(segment) {
                Some(Value::Map(map)) => map,
                Some(other) => {
                    return Err(AttrMapError::NestedPath {
                        path: path.to_string(),
                        segment: segment.to_string(),
                        found: other.type_name(),
                    });
                }
                None => {
                    let created = AttributeMap::new();
                    current.set_item(segment, created.clone())?;
                    created
                }
            };
        }
        current.set_item(last, value)
    }
}
