mod report;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use relative_path::RelativePathBuf;
use serde::Serialize;
use std::fmt::Display;
use std::path::{Path, PathBuf};
use std::process;
use yaml_locus_config::Config;
use yaml_locus_engine::{KeyPathCodec, YamlDocument, io};

use report::NodeReport;

/// Look up YAML nodes by character offset or key address
#[derive(Parser)]
#[command(name = "yaml-locus", version)]
struct Cli {
    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// YAML document to index; relative paths fall back to the configured
    /// documents directory
    file: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Node under a character offset
    At { offset: usize },
    /// Node named by an address such as `layers:water:draw`
    Address { address: String },
    /// Every node with its span and address
    Outline,
    /// Syntax errors found while parsing
    Errors,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let config = match Config::load() {
        Ok(config) => config.unwrap_or_default(),
        Err(e) => {
            log::warn!("ignoring config file: {e}");
            Config::default()
        }
    };
    log::debug!("config: {config:?}");

    let text = read_input(&cli.file, config.documents_path.as_deref())?;
    let codec = KeyPathCodec::new(config.address_delimiter)?;
    let doc = YamlDocument::with_codec(&text, codec);

    match cli.command {
        Command::At { offset } => {
            let found = doc
                .node_at_offset(offset)
                .and_then(|id| NodeReport::new(&doc, id));
            print_lookup(found, cli.json)?;
        }
        Command::Address { address } => {
            let found = doc
                .node_at_address(&address)
                .and_then(|id| NodeReport::new(&doc, id));
            print_lookup(found, cli.json)?;
        }
        Command::Outline => print_all(&report::outline(&doc), cli.json)?,
        Command::Errors => print_all(&report::errors(&doc), cli.json)?,
    }

    Ok(())
}

/// Read `file` as given, or relative to `documents_path` when it does not
/// exist in the working directory.
fn read_input(file: &Path, documents_path: Option<&Path>) -> Result<String> {
    if file.exists() || file.is_absolute() {
        return std::fs::read_to_string(file)
            .with_context(|| format!("failed to read {}", file.display()));
    }

    let Some(root) = documents_path else {
        anyhow::bail!(
            "{} not found and no documents_path configured in {}",
            file.display(),
            Config::config_path().display()
        );
    };
    let relative = RelativePathBuf::from_path(file)?;
    log::debug!("resolving {relative} against {}", root.display());
    Ok(io::read_document(&relative, root)?)
}

fn print_lookup(found: Option<NodeReport>, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&found)?);
    } else if let Some(node) = &found {
        println!("{node}");
    }

    if found.is_none() {
        if !json {
            eprintln!("no node found");
        }
        process::exit(1);
    }
    Ok(())
}

fn print_all<T: Serialize + Display>(items: &[T], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(items)?);
    } else {
        for item in items {
            println!("{item}");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn file_comes_before_the_command() {
        let cli = Cli::try_parse_from(["yaml-locus", "--json", "scene.yaml", "at", "12"]).unwrap();
        assert!(cli.json);
        assert_eq!(cli.file, PathBuf::from("scene.yaml"));
        assert!(matches!(cli.command, Command::At { offset: 12 }));
    }

    #[test]
    fn missing_relative_file_without_root_is_an_error() {
        let err = read_input(Path::new("definitely-missing.yaml"), None).unwrap_err();
        assert!(err.to_string().contains("definitely-missing.yaml"));
    }
}
