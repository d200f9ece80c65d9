//! Supported config formats: parsing into and rendering from plain mappings.

use crate::LoaderError;
use attrconf_map::{Key, PlainMap, PlainValue};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// A structured text format config content can be written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    Json,
    Json5,
    Yaml,
    Toml,
}

impl Format {
    /// Every format this crate can parse and render.
    pub const ALL: [Format; 4] = [Format::Json, Format::Json5, Format::Yaml, Format::Toml];

    /// Canonical lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            Format::Json => "json",
            Format::Json5 => "json5",
            Format::Yaml => "yaml",
            Format::Toml => "toml",
        }
    }

    /// File extensions associated with the format.
    pub fn extensions(self) -> &'static [&'static str] {
        match self {
            Format::Json => &["json"],
            Format::Json5 => &["json5"],
            Format::Yaml => &["yaml", "yml"],
            Format::Toml => &["toml"],
        }
    }

    /// Infer the format from a file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|format| format.extensions().contains(&extension.as_str()))
    }

    /// Parse `content` into a plain mapping.
    ///
    /// Blank content and a top-level `null` yield an empty mapping; any other
    /// non-mapping document is rejected.
    pub fn parse(self, content: &str) -> Result<PlainMap, LoaderError> {
        if content.trim().is_empty() {
            return Ok(PlainMap::new());
        }
        let value = match self {
            Format::Json => serde_json::from_str::<PlainValue>(content)
                .map_err(|err| LoaderError::parse(self, err))?,
            Format::Json5 => json5::from_str::<PlainValue>(content)
                .map_err(|err| LoaderError::parse(self, err))?,
            Format::Yaml => serde_yaml::from_str::<PlainValue>(content)
                .map_err(|err| LoaderError::parse(self, err))?,
            Format::Toml => content
                .parse::<toml::Table>()
                .map(|table| PlainValue::Map(table_to_plain(table)))
                .map_err(|err| LoaderError::parse(self, err))?,
        };
        match value {
            PlainValue::Map(map) => Ok(map),
            PlainValue::Null => Ok(PlainMap::new()),
            other => Err(LoaderError::NotAMapping {
                format: self,
                found: other.type_name(),
            }),
        }
    }

    /// Render a plain mapping as pretty-printed text, keeping entry order.
    /// JSON5 output is plain JSON.
    ///
    /// JSON and TOML only have string keys; a mapping whose keys collide once
    /// stringified (`1` and `"1"`) is rejected.
    pub fn render(self, data: &PlainMap) -> Result<String, LoaderError> {
        match self {
            Format::Json | Format::Json5 => {
                let data = string_keyed(data, self, "")?;
                serde_json::to_string_pretty(&data).map_err(|err| LoaderError::render(self, err))
            }
            Format::Yaml => serde_yaml::to_string(data).map_err(|err| LoaderError::render(self, err)),
            Format::Toml => {
                let table = plain_to_table(data, "")?;
                toml::to_string_pretty(&table).map_err(|err| LoaderError::render(self, err))
            }
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Format {
    type Err = LoaderError;

    /// Case-insensitive; `yml` is accepted as an alias of `yaml`.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let lowered = value.trim().to_ascii_lowercase();
        let canonical = if lowered == "yml" { "yaml" } else { lowered.as_str() };
        Format::ALL
            .into_iter()
            .find(|format| format.name() == canonical)
            .ok_or_else(|| LoaderError::UnsupportedFormat {
                format: canonical.to_string(),
                supported: Format::ALL.iter().map(|format| format.name().to_string()).collect(),
            })
    }
}

fn key_path(prefix: &str, key: &Key) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{prefix}.{key}")
    }
}

fn key_collision(format: Format, path: &str) -> LoaderError {
    LoaderError::render(
        format,
        format!("duplicate key '{path}' after converting keys to strings"),
    )
}

/// Copy of `map` with every key (also in nested maps and sequences) as a string.
fn string_keyed(map: &PlainMap, format: Format, prefix: &str) -> Result<PlainMap, LoaderError> {
    let mut keyed = PlainMap::new();
    for (key, value) in map.iter() {
        let path = key_path(prefix, key);
        let value = string_keyed_value(value, format, &path)?;
        if keyed.insert(key.to_string(), value).is_some() {
            return Err(key_collision(format, &path));
        }
    }
    Ok(keyed)
}

fn string_keyed_value(
    value: &PlainValue,
    format: Format,
    path: &str,
) -> Result<PlainValue, LoaderError> {
    let value = match value {
        PlainValue::Map(map) => PlainValue::Map(string_keyed(map, format, path)?),
        PlainValue::List(items) => PlainValue::List(
            items
                .iter()
                .map(|item| string_keyed_value(item, format, path))
                .collect::<Result<_, _>>()?,
        ),
        PlainValue::Tuple(items) => PlainValue::Tuple(
            items
                .iter()
                .map(|item| string_keyed_value(item, format, path))
                .collect::<Result<_, _>>()?,
        ),
        scalar => scalar.clone(),
    };
    Ok(value)
}

fn table_to_plain(table: toml::Table) -> PlainMap {
    table
        .into_iter()
        .map(|(key, value)| (key, toml_to_plain(value)))
        .collect()
}

fn toml_to_plain(value: toml::Value) -> PlainValue {
    match value {
        toml::Value::String(value) => PlainValue::Str(value),
        toml::Value::Integer(value) => PlainValue::Int(value),
        toml::Value::Float(value) => PlainValue::Float(value),
        toml::Value::Boolean(value) => PlainValue::Bool(value),
        toml::Value::Datetime(value) => PlainValue::Str(value.to_string()),
        toml::Value::Array(items) => PlainValue::List(items.into_iter().map(toml_to_plain).collect()),
        toml::Value::Table(table) => PlainValue::Map(table_to_plain(table)),
    }
}

fn plain_to_table(map: &PlainMap, prefix: &str) -> Result<toml::Table, LoaderError> {
    let mut table = toml::Table::new();
    for (key, value) in map.iter() {
        let path = key_path(prefix, key);
        let value = plain_to_toml(value, &path)?;
        if table.insert(key.to_string(), value).is_some() {
            return Err(key_collision(Format::Toml, &path));
        }
    }
    Ok(table)
}

fn plain_to_toml(value: &PlainValue, path: &str) -> Result<toml::Value, LoaderError> {
    let value = match value {
        PlainValue::Null => {
            return Err(LoaderError::render(
                Format::Toml,
                format!("toml has no null value (at '{path}')"),
            ));
        }
        PlainValue::Bool(value) => toml::Value::Boolean(*value),
        PlainValue::Int(value) => toml::Value::Integer(*value),
        PlainValue::Float(value) => toml::Value::Float(*value),
        PlainValue::Str(value) => toml::Value::String(value.clone()),
        PlainValue::List(items) => toml::Value::Array(
            items
                .iter()
                .map(|item| plain_to_toml(item, path))
                .collect::<Result<_, _>>()?,
        ),
        PlainValue::Tuple(items) => toml::Value::Array(
            items
                .iter()
                .map(|item| plain_to_toml(item, path))
                .collect::<Result<_, _>>()?,
        ),
        PlainValue::Map(map) => toml::Value::Table(plain_to_table(map, path)?),
    };
    Ok(value)
}
