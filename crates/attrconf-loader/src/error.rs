//! Error types for config loading.

use crate::Format;
use std::path::PathBuf;
use thiserror::Error;

/// Errors returned while reading, parsing or writing config content.
#[derive(Debug, Error)]
pub enum LoaderError {
    /// Reading or writing a config file failed.
    #[error("failed to access config: {0}")]
    Io(#[from] std::io::Error),
    /// The content is not valid for its format.
    #[error("failed to parse {format} config: {source}")]
    Parse {
        format: Format,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// The requested format name is not one the loader understands.
    #[error(
        "unsupported format '{format}'; supported formats: {}",
        .supported.join(", ")
    )]
    UnsupportedFormat {
        format: String,
        supported: Vec<String>,
    },
    /// The format could not be inferred from the file name.
    #[error("cannot determine config format of {}", .path.display())]
    UndeterminedFormat { path: PathBuf },
    /// The document parsed, but its top level is not a mapping.
    #[error("{format} config must be a mapping at the top level, got {found}")]
    NotAMapping { format: Format, found: &'static str },
    /// The mapping cannot be expressed in the target format.
    #[error("failed to render {format} config: {message}")]
    Render { format: Format, message: String },
    /// A blocking load task panicked or was aborted.
    #[error("config task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl LoaderError {
    pub(crate) fn parse(
        format: Format,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Parse {
            format,
            source: Box::new(source),
        }
    }

    pub(crate) fn render(format: Format, message: impl ToString) -> Self {
        Self::Render {
            format,
            message: message.to_string(),
        }
    }
}
