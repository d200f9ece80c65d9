//! The config facade: one root map plus load, merge and save coordination.

use crate::ConfigError;
use attrconf_loader::{
    ConfigCache, ConfigLoader, FileLoader, Format, LoaderError, load_path_async, load_str_async,
    resolve_config_path, store_path_async,
};
use attrconf_map::{AttributeMap, Key, PlainMap, Value};
use log::{debug, info};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// File name looked up when a config path resolves to a directory.
pub const DEFAULT_FILENAME: &str = "config.yml";

/// Options for constructing a [`Config`].
pub struct ConfigOptions {
    /// Initial contents of the root map.
    pub data: PlainMap,
    /// Base location for file lookups. A file is replaced by its parent
    /// directory; `None` means the current working directory.
    pub path: Option<PathBuf>,
    /// File name used when a lookup resolves to a directory.
    pub default_filename: String,
    /// Parse cache for the default file loader. Ignored when `loader` is set.
    pub cache: Option<Arc<ConfigCache>>,
    /// Loader used instead of a [`FileLoader`].
    pub loader: Option<Arc<dyn ConfigLoader>>,
}

impl Default for ConfigOptions {
    fn default() -> Self {
        Self {
            data: PlainMap::new(),
            path: None,
            default_filename: DEFAULT_FILENAME.to_string(),
            cache: None,
            loader: None,
        }
    }
}

impl ConfigOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_data(mut self, data: PlainMap) -> Self {
        self.data = data;
        self
    }

    pub fn with_path(mut self, path: impl AsRef<Path>) -> Self {
        self.path = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn with_default_filename(mut self, name: impl Into<String>) -> Self {
        self.default_filename = name.into();
        self
    }

    /// Share a parse cache with other configs.
    pub fn with_cache(mut self, cache: Arc<ConfigCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn with_loader(mut self, loader: Arc<dyn ConfigLoader>) -> Self {
        self.loader = Some(loader);
        self
    }
}

/// Hierarchical configuration with attribute-style access.
///
/// Every load merges into the same root map, so loading several files layers
/// them in call order. The root map is single-threaded; the loader and its
/// cache may be shared freely.
pub struct Config {
    data: AttributeMap,
    path: PathBuf,
    default_filename: String,
    loader: Arc<dyn ConfigLoader>,
}

impl Config {
    pub fn new(options: ConfigOptions) -> Result<Self, ConfigError> {
        let path = match options.path {
            Some(path) if path.is_file() => path
                .parent()
                .filter(|parent| !parent.as_os_str().is_empty())
                .map_or_else(|| PathBuf::from("."), Path::to_path_buf),
            Some(path) => path,
            None => std::env::current_dir()?,
        };
        let loader: Arc<dyn ConfigLoader> = match options.loader {
            Some(loader) => loader,
            None => Arc::new(FileLoader::with_cache(options.cache.unwrap_or_default())),
        };
        debug!(
            "created config (path={}, default_filename={})",
            path.display(),
            options.default_filename
        );
        Ok(Self {
            data: AttributeMap::from_plain(options.data),
            path,
            default_filename: options.default_filename,
            loader,
        })
    }

    /// Empty config rooted at the current working directory.
    pub fn with_defaults() -> Result<Self, ConfigError> {
        Self::new(ConfigOptions::default())
    }

    /// The root map, for index and attribute access.
    pub fn data(&self) -> &AttributeMap {
        &self.data
    }

    /// Base directory for file lookups.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn default_filename(&self) -> &str {
        &self.default_filename
    }

    pub fn loader(&self) -> &Arc<dyn ConfigLoader> {
        &self.loader
    }

    /// Top-level lookup. Probing an unset key never creates it.
    pub fn get(&self, key: impl Into<Key>) -> Option<Value> {
        self.data.get(key)
    }

    pub fn get_path(&self, path: &str) -> Option<Value> {
        self.data.get_path(path)
    }

    pub fn get_path_or(&self, path: &str, default: impl Into<Value>) -> Value {
        self.data.get_path_or(path, default)
    }

    pub fn set_path(&self, path: &str, value: impl Into<Value>) -> Result<(), ConfigError> {
        Ok(self.data.set_path(path, value)?)
    }

    /// Deep-merge `other` into the root map.
    pub fn update(&self, other: &AttributeMap) -> Result<(), ConfigError> {
        Ok(self.data.update(other)?)
    }

    pub fn update_plain(&self, data: PlainMap) -> Result<(), ConfigError> {
        Ok(self.data.update_plain(data)?)
    }

    pub fn to_plain(&self) -> PlainMap {
        self.data.to_plain()
    }

    pub fn freeze(&self) {
        self.data.freeze();
    }

    pub fn unfreeze(&self) {
        self.data.unfreeze();
    }

    /// The file a load or save of `path` would touch.
    pub fn resolve(&self, path: Option<&Path>) -> PathBuf {
        resolve_config_path(&self.path, &self.default_filename, path)
    }

    /// Load a file and merge it into the root map.
    ///
    /// `path` defaults to the config's base path; directories resolve to the
    /// default file name. A missing file merges nothing.
    pub fn load_file(&self, path: Option<&Path>) -> Result<(), ConfigError> {
        let resolved = self.resolve(path);
        info!("loading config file (path={})", resolved.display());
        let data = self.loader.load_path(&resolved)?;
        self.update_plain(data)
    }

    /// Parse `content` as the format named by `format_hint` and merge it.
    pub fn load_from_content(&self, content: &str, format_hint: &str) -> Result<(), ConfigError> {
        let format = self.content_format(format_hint)?;
        debug!(
            "loading config content (format={}, len={})",
            format,
            content.len()
        );
        let data = self.loader.load_str(content, format)?;
        self.update_plain(data)
    }

    /// [`load_file`](Self::load_file) with the read and parse on the blocking pool.
    pub async fn load_file_async(&self, path: Option<&Path>) -> Result<(), ConfigError> {
        let resolved = self.resolve(path);
        info!("loading config file (path={}, async=true)", resolved.display());
        let data = load_path_async(Arc::clone(&self.loader), resolved).await?;
        self.update_plain(data)
    }

    /// [`load_from_content`](Self::load_from_content) with the parse on the blocking pool.
    pub async fn load_from_content_async(
        &self,
        content: impl Into<String>,
        format_hint: &str,
    ) -> Result<(), ConfigError> {
        let format = self.content_format(format_hint)?;
        let data = load_str_async(Arc::clone(&self.loader), content.into(), format).await?;
        self.update_plain(data)
    }

    /// Render the root map and write it through the loader.
    ///
    /// `format` defaults to the one implied by the target file's extension.
    /// Returns the path written.
    pub fn save_file(
        &self,
        path: Option<&Path>,
        format: Option<Format>,
    ) -> Result<PathBuf, ConfigError> {
        let (resolved, content) = self.render_for_save(path, format)?;
        self.loader.store_path(&resolved, &content)?;
        Ok(resolved)
    }

    /// [`save_file`](Self::save_file) with the write on the blocking pool.
    pub async fn save_file_async(
        &self,
        path: Option<&Path>,
        format: Option<Format>,
    ) -> Result<PathBuf, ConfigError> {
        let (resolved, content) = self.render_for_save(path, format)?;
        store_path_async(Arc::clone(&self.loader), resolved.clone(), content).await?;
        Ok(resolved)
    }

    fn render_for_save(
        &self,
        path: Option<&Path>,
        format: Option<Format>,
    ) -> Result<(PathBuf, String), ConfigError> {
        let resolved = self.resolve(path);
        let format = match format {
            Some(format) => format,
            None => Format::from_path(&resolved).ok_or_else(|| {
                LoaderError::UndeterminedFormat {
                    path: resolved.clone(),
                }
            })?,
        };
        info!(
            "saving config file (path={}, format={})",
            resolved.display(),
            format
        );
        let content = format.render(&self.to_plain())?;
        Ok((resolved, content))
    }

    /// Map a format name onto one the loader supports.
    fn content_format(&self, hint: &str) -> Result<Format, LoaderError> {
        let supported = self.loader.supported_formats();
        match hint.parse::<Format>() {
            Ok(format) if supported.contains(&format) => Ok(format),
            _ => Err(LoaderError::UnsupportedFormat {
                format: hint.trim().to_ascii_lowercase(),
                supported: supported
                    .iter()
                    .map(|format| format.name().to_string())
                    .collect(),
            }),
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("data", &self.data)
            .field("path", &self.path)
            .field("default_filename", &self.default_filename)
            .finish_non_exhaustive()
    }
}
