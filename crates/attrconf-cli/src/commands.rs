//! Subcommand implementations. Each returns the text to print.

use anyhow::{Context, bail};
use attrconf::{Config, Format, Value};
use log::debug;
use std::path::Path;

/// Load the target file and return the value at `path` as pretty JSON.
pub(crate) async fn get(
    config: &Config,
    file: Option<&Path>,
    path: &str,
) -> anyhow::Result<String> {
    load(config, file).await?;
    let Some(value) = config.get_path(path) else {
        bail!("no value at '{path}'");
    };
    to_json(&value)
}

/// Set `path` to the parsed `raw` value and write the target file back.
pub(crate) async fn set(
    config: &Config,
    file: Option<&Path>,
    path: &str,
    raw: &str,
) -> anyhow::Result<String> {
    load(config, file).await?;
    config
        .set_path(path, parse_value(raw))
        .with_context(|| format!("failed to set '{path}'"))?;
    let written = config
        .save_file_async(file, None)
        .await
        .context("failed to save config")?;
    Ok(format!("updated {}", written.display()))
}

/// Load the target file and render it in `format`.
pub(crate) async fn dump(
    config: &Config,
    file: Option<&Path>,
    format: &str,
) -> anyhow::Result<String> {
    let format: Format = format.parse()?;
    load(config, file).await?;
    let rendered = format
        .render(&config.to_plain())
        .context("failed to render config")?;
    Ok(rendered.trim_end().to_string())
}

/// Formats the config's loader accepts, one per line.
pub(crate) fn formats(config: &Config) -> String {
    config
        .loader()
        .supported_formats()
        .iter()
        .map(|format| format!("{format} ({})", format.extensions().join(", ")))
        .collect::<Vec<_>>()
        .join("\n")
}

async fn load(config: &Config, file: Option<&Path>) -> anyhow::Result<()> {
    let resolved = config.resolve(file);
    debug!("loading target file (path={})", resolved.display());
    config
        .load_file_async(file)
        .await
        .with_context(|| format!("failed to load {}", resolved.display()))
}

/// Interpret a command-line value as JSON, falling back to a plain string.
fn parse_value(raw: &str) -> Value {
    serde_json::from_str::<serde_json::Value>(raw).map_or_else(|_| Value::from(raw), Value::from)
}

fn to_json(value: &Value) -> anyhow::Result<String> {
    serde_json::to_string_pretty(&value.to_plain().to_json()).context("failed to encode value")
}
