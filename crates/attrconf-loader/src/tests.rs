//! Tests for the parse cache and path helpers.

use super::*;
use crate::utils::cache_key;
use attrconf_map::{PlainMap, PlainValue};
use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use tempfile::TempDir;

fn sample() -> PlainMap {
    [("name", PlainValue::from("demo"))].into_iter().collect()
}

/// A second lookup of the same path is served from the cache.
#[test]
fn cache_loads_once() {
    let cache = ConfigCache::new();
    let calls = AtomicUsize::new(0);
    let path = Path::new("/virtual/config.yml");
    for _ in 0..3 {
        let loaded = cache
            .get_or_load(path, |_| {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(sample())
            })
            .expect("load");
        assert_eq!(*loaded, sample());
    }
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(cache.len(), 1);
    assert!(cache.contains(path));
}

/// Failed loads leave nothing behind, so the next call retries.
#[test]
fn cache_skips_failures() {
    let cache = ConfigCache::new();
    let path = Path::new("/virtual/broken.json");
    let err = cache
        .get_or_load(path, |_| Err(LoaderError::render(Format::Json, "boom")))
        .unwrap_err();
    assert!(matches!(err, LoaderError::Render { .. }));
    assert!(!cache.contains(path));
    assert!(cache.is_empty());
    let loaded = cache.get_or_load(path, |_| Ok(sample())).expect("retry");
    assert_eq!(*loaded, sample());
}

/// Invalidation forces the next lookup to load again.
#[test]
fn cache_invalidate_and_clear() {
    let cache = ConfigCache::new();
    let first = Path::new("/virtual/a.yml");
    let second = Path::new("/virtual/b.yml");
    cache.get_or_load(first, |_| Ok(sample())).expect("a");
    cache.get_or_load(second, |_| Ok(PlainMap::new())).expect("b");
    assert!(cache.invalidate(first));
    assert!(!cache.invalidate(first));
    assert_eq!(cache.get(first), None);
    assert_eq!(cache.len(), 1);
    cache.clear();
    assert!(cache.is_empty());
}

/// Concurrent loads of one path parse it exactly once.
#[test]
fn cache_parses_once_under_contention() {
    let cache = Arc::new(ConfigCache::new());
    let calls = Arc::new(AtomicUsize::new(0));
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let cache = Arc::clone(&cache);
            let calls = Arc::clone(&calls);
            thread::spawn(move || {
                cache
                    .get_or_load(Path::new("/virtual/shared.yml"), |_| {
                        calls.fetch_add(1, Ordering::SeqCst);
                        thread::sleep(std::time::Duration::from_millis(20));
                        Ok(sample())
                    })
                    .expect("load")
            })
        })
        .collect();
    for handle in handles {
        assert_eq!(*handle.join().expect("join"), sample());
    }
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

/// Directories resolve to the default file inside them; files stay as they are.
#[test]
fn resolves_config_paths() {
    let temp = TempDir::new().expect("tmp");
    let dir = temp.path();
    let file = dir.join("other.json");
    fs::write(&file, "{}").expect("write");

    assert_eq!(resolve_config_path(dir, "config.yml", None), dir.join("config.yml"));
    assert_eq!(resolve_config_path(dir, "config.yml", Some(&file)), file);
    let missing = dir.join("missing.toml");
    assert_eq!(resolve_config_path(dir, "config.yml", Some(&missing)), missing);
}

/// Cache keys are canonical for existing files and unchanged otherwise.
#[test]
fn cache_keys_canonicalize() {
    let temp = TempDir::new().expect("tmp");
    let nested = temp.path().join("nested");
    fs::create_dir_all(&nested).expect("dir");
    let file = temp.path().join("config.yml");
    fs::write(&file, "a: 1\n").expect("write");

    let indirect = nested.join("..").join("config.yml");
    assert_eq!(cache_key(&indirect), cache_key(&file));
    let missing = Path::new("/definitely/not/here.yml");
    assert_eq!(cache_key(missing), missing.to_path_buf());
}
