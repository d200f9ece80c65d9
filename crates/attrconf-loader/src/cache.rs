//! Process-wide cache of parsed config files.

use crate::LoaderError;
use attrconf_map::PlainMap;
use log::debug;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

type Slot = Arc<Mutex<Option<Arc<PlainMap>>>>;

/// Parsed file contents keyed by path.
///
/// Each path has its own slot lock, so concurrent loads of one file parse it
/// once while loads of different files proceed in parallel. Failed loads are
/// not cached. Entries live until invalidated or cleared; the file's
/// modification time is not consulted.
#[derive(Debug, Default)]
pub struct ConfigCache {
    slots: Mutex<HashMap<PathBuf, Slot>>,
}

impl ConfigCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached mapping for `path`, or run `load` and cache its result.
    pub fn get_or_load<F>(&self, path: &Path, load: F) -> Result<Arc<PlainMap>, LoaderError>
    where
        F: FnOnce(&Path) -> Result<PlainMap, LoaderError>,
    {
        let slot = {
            let mut slots = self.slots.lock();
            slots.entry(path.to_path_buf()).or_default().clone()
        };
        let mut guard = slot.lock();
        if let Some(cached) = guard.as_ref() {
            debug!("config cache hit (path={})", path.display());
            return Ok(Arc::clone(cached));
        }
        let loaded = Arc::new(load(path)?);
        *guard = Some(Arc::clone(&loaded));
        Ok(loaded)
    }

    /// Cached mapping for `path`, if one has been stored.
    pub fn get(&self, path: &Path) -> Option<Arc<PlainMap>> {
        let slot = self.slots.lock().get(path).cloned()?;
        let cached = slot.lock().clone();
        cached
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.get(path).is_some()
    }

    /// Drop the entry for `path`. Returns whether a parsed mapping was cached.
    pub fn invalidate(&self, path: &Path) -> bool {
        let removed = self.slots.lock().remove(path);
        removed.is_some_and(|slot| slot.lock().is_some())
    }

    pub fn clear(&self) {
        self.slots.lock().clear();
    }

    /// Number of cached mappings.
    pub fn len(&self) -> usize {
        let slots: Vec<Slot> = self.slots.lock().values().cloned().collect();
        slots.iter().filter(|slot| slot.lock().is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
