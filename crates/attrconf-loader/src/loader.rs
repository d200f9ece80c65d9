//! The loader seam and the file-backed implementation.

use crate::utils::cache_key;
use crate::{ConfigCache, Format, LoaderError};
use attrconf_map::PlainMap;
use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Reads and writes config content on behalf of a config facade.
///
/// Implementations must be safe to call from several threads at once; the
/// async helpers run them on the blocking pool.
pub trait ConfigLoader: Send + Sync {
    /// Formats accepted by [`load_str`](Self::load_str).
    fn supported_formats(&self) -> Vec<Format>;

    /// Load the mapping stored at `path`.
    fn load_path(&self, path: &Path) -> Result<PlainMap, LoaderError>;

    /// Parse `content` as `format`.
    fn load_str(&self, content: &str, format: Format) -> Result<PlainMap, LoaderError>;

    /// Write rendered content to `path`.
    fn store_path(&self, path: &Path, content: &str) -> Result<(), LoaderError>;
}

/// Loader for config files on disk.
///
/// The format comes from the file extension. Parsed files are cached in the
/// loader's [`ConfigCache`]; clones of a loader share it, and
/// [`with_cache`](Self::with_cache) shares one cache between unrelated loaders.
#[derive(Debug, Clone)]
pub struct FileLoader {
    cache: Arc<ConfigCache>,
}

impl Default for FileLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl FileLoader {
    /// Loader with a fresh, empty cache.
    pub fn new() -> Self {
        Self::with_cache(Arc::new(ConfigCache::new()))
    }

    /// Loader backed by a caller-provided cache.
    pub fn with_cache(cache: Arc<ConfigCache>) -> Self {
        Self { cache }
    }

    pub fn cache(&self) -> &Arc<ConfigCache> {
        &self.cache
    }
}

impl ConfigLoader for FileLoader {
    fn supported_formats(&self) -> Vec<Format> {
        Format::ALL.to_vec()
    }

    /// A missing file loads as an empty mapping.
    fn load_path(&self, path: &Path) -> Result<PlainMap, LoaderError> {
        if !path.is_file() {
            debug!("config file missing (path={})", path.display());
            return Ok(PlainMap::new());
        }
        let format = Format::from_path(path).ok_or_else(|| LoaderError::UndeterminedFormat {
            path: path.to_path_buf(),
        })?;
        let loaded = self.cache.get_or_load(&cache_key(path), |key| {
            let content = fs::read_to_string(key)?;
            let data = format.parse(&content)?;
            info!(
                "loaded config file (path={}, format={}, keys={})",
                key.display(),
                format,
                data.len()
            );
            Ok(data)
        })?;
        Ok((*loaded).clone())
    }

    fn load_str(&self, content: &str, format: Format) -> Result<PlainMap, LoaderError> {
        format.parse(content)
    }

    /// Writes the file and drops any cached parse of it.
    fn store_path(&self, path: &Path, content: &str) -> Result<(), LoaderError> {
        fs::write(path, content)?;
        self.cache.invalidate(&cache_key(path));
        info!("stored config file (path={})", path.display());
        Ok(())
    }
}

/// Run [`ConfigLoader::load_path`] on the blocking pool.
///
/// Dropping the returned future does not interrupt a load already in
/// progress; it runs to completion and, for cached loaders, still fills the
/// cache.
pub async fn load_path_async(
    loader: Arc<dyn ConfigLoader>,
    path: PathBuf,
) -> Result<PlainMap, LoaderError> {
    tokio::task::spawn_blocking(move || loader.load_path(&path)).await?
}

/// Run [`ConfigLoader::load_str`] on the blocking pool.
pub async fn load_str_async(
    loader: Arc<dyn ConfigLoader>,
    content: String,
    format: Format,
) -> Result<PlainMap, LoaderError> {
    tokio::task::spawn_blocking(move || loader.load_str(&content, format)).await?
}

/// Run [`ConfigLoader::store_path`] on the blocking pool.
pub async fn store_path_async(
    loader: Arc<dyn ConfigLoader>,
    path: PathBuf,
    content: String,
) -> Result<(), LoaderError> {
    tokio::task::spawn_blocking(move || loader.store_path(&path, &content)).await?
}
