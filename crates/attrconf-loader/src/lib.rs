//! Config file formats, the loader seam used by the config facade, and the
//! shared parse cache.

mod cache;
mod error;
mod format;
mod loader;
mod utils;

#[cfg(test)]
mod tests;

pub use cache::ConfigCache;
pub use error::LoaderError;
pub use format::Format;
/// Loader trait, file-backed loader and blocking-pool helpers.
pub use loader::{ConfigLoader, FileLoader, load_path_async, load_str_async, store_path_async};
pub use utils::resolve_config_path;
