//! Command-line access to config files: read, write and convert values by dotted path.

mod commands;

use attrconf::{Config, ConfigOptions, DEFAULT_FILENAME};
use clap::{Parser, Subcommand};
use log::info;
use std::path::PathBuf;

/// Command-line options for the config tool.
#[derive(Parser)]
#[command(name = "attrconf", version)]
struct Cli {
    /// Base directory for config lookups (defaults to the current directory)
    #[arg(long, global = true)]
    dir: Option<PathBuf>,
    /// File name used when a lookup resolves to a directory
    #[arg(long, global = true, default_value = DEFAULT_FILENAME)]
    default_file: String,
    /// Config file to operate on instead of the default file
    #[arg(long, short = 'f', global = true)]
    file: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the value at a dotted path as JSON
    Get { path: String },
    /// Set the value at a dotted path and write the file back
    Set {
        path: String,
        /// JSON value; anything that is not valid JSON is stored as a string
        value: String,
    },
    /// Print the whole config
    Dump {
        /// Output format (json, json5, yaml, toml)
        #[arg(long, default_value = "yaml")]
        format: String,
    },
    /// List supported formats
    Formats,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let _ = env_logger::builder()
        .format_timestamp_millis()
        .parse_default_env()
        .try_init();

    let cli = Cli::parse();
    info!(
        "starting attrconf (dir_set={}, file_set={}, default_file={})",
        cli.dir.is_some(),
        cli.file.is_some(),
        cli.default_file
    );

    let mut options = ConfigOptions::new().with_default_filename(cli.default_file);
    if let Some(dir) = cli.dir {
        options = options.with_path(dir);
    }
    let config = Config::new(options)?;
    let file = cli.file.as_deref();

    let output = match cli.command {
        Command::Get { path } => commands::get(&config, file, &path).await?,
        Command::Set { path, value } => commands::set(&config, file, &path, &value).await?,
        Command::Dump { format } => commands::dump(&config, file, &format).await?,
        Command::Formats => commands::formats(&config),
    };
    println!("{output}");
    Ok(())
}
