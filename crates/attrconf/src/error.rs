//! Error type for the config facade.

use attrconf_loader::LoaderError;
use attrconf_map::AttrMapError;
use thiserror::Error;

/// Errors returned by [`Config`](crate::Config) operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Reading or writing the underlying map failed.
    #[error(transparent)]
    Map(#[from] AttrMapError),
    /// The loader could not read, parse or write config content.
    #[error(transparent)]
    Loader(#[from] LoaderError),
    #[error("failed to resolve working directory: {0}")]
    Io(#[from] std::io::Error),
}

impl ConfigError {
    /// Whether the error reports an unrecognized format name.
    pub fn is_unsupported_format(&self) -> bool {
        matches!(self, Self::Loader(LoaderError::UnsupportedFormat { .. }))
    }
}
