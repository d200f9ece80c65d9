//! Attribute-style access to layered configuration files.
//!
//! [`Config`] owns one root [`AttributeMap`] and merges plain mappings into it
//! from files or raw content through a [`ConfigLoader`]. Later loads layer on
//! top of earlier ones: nested mappings merge, everything else is replaced.

mod config;
mod error;

pub use attrconf_loader as loader;
pub use attrconf_map as map;

pub use attrconf_loader::{ConfigCache, ConfigLoader, FileLoader, Format, LoaderError};
pub use attrconf_map::{AttrMapError, AttributeMap, Key, PlainMap, PlainValue, Value};
/// The config facade and its construction options.
pub use config::{Config, ConfigOptions, DEFAULT_FILENAME};
pub use error::ConfigError;
