//! Command-line interface

pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};
use commands::{
    AddModelCommand, CitationCommand, ExpandCommand, ListCommand, ShowCommand, ValidateCommand,
};

/// Local metadata registry for ML pipelines, models, and gardens
#[derive(Debug, Parser, Clone)]
#[command(name = "trellis")]
#[command(author = "Trellis Contributors")]
#[command(version = "0.1.0")]
#[command(about = "A local metadata registry for ML pipelines, models, and gardens", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to the registry file (overrides the default location)
    #[arg(short, long, global = true)]
    pub registry: Option<String>,
}

/// Available commands
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Validate registry records and referential integrity
    Validate(ValidateCommand),

    /// List records in a registry table
    List(ListCommand),

    /// Show a single record in detail
    Show(ShowCommand),

    /// Print DataCite citation metadata for a record
    Citation(CitationCommand),

    /// Print denormalized publication metadata for a garden
    Expand(ExpandCommand),

    /// Register a model record
    AddModel(AddModelCommand),
}

impl Cli {
    /// Parse CLI arguments from environment
    pub fn from_args() -> Self {
        Self::parse()
    }

    /// Parse CLI arguments from a slice
    pub fn try_parse_from<I, T>(itr: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(itr)
    }
}

use std::ffi::OsString;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_validate_command() {
        let cli = Cli::try_parse_from(["trellis", "validate", "--file", "registry.json"]).unwrap();
        match cli.command {
            Command::Validate(cmd) => assert_eq!(cmd.file.as_deref(), Some("registry.json")),
            other => panic!("expected validate, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_list_with_global_registry() {
        let cli =
            Cli::try_parse_from(["trellis", "list", "pipelines", "--registry", "/tmp/r.json"])
                .unwrap();
        assert_eq!(cli.registry.as_deref(), Some("/tmp/r.json"));
        match cli.command {
            Command::List(cmd) => assert_eq!(cmd.table, commands::TableArg::Pipelines),
            other => panic!("expected list, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_add_model() {
        let cli = Cli::try_parse_from([
            "trellis",
            "add-model",
            "--uri",
            "lab@example.org-classifier/1",
            "--flavor",
            "sklearn",
            "--connection",
            "https://example.org/dataset",
        ])
        .unwrap();
        match cli.command {
            Command::AddModel(cmd) => {
                assert_eq!(cmd.uri, "lab@example.org-classifier/1");
                assert_eq!(cmd.connections.len(), 1);
            }
            other => panic!("expected add-model, got {:?}", other),
        }
    }
}
