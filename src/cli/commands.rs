//! CLI command definitions

use clap::Args;

/// Validate a registry file
#[derive(Debug, Args, Clone)]
pub struct ValidateCommand {
    /// Path to a registry JSON file (defaults to the local registry)
    #[arg(short, long)]
    pub file: Option<String>,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Which registry table to list
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum TableArg {
    Gardens,
    Pipelines,
    Models,
}

/// List records in a registry table
#[derive(Debug, Args, Clone)]
pub struct ListCommand {
    /// Table to list
    #[arg(value_enum)]
    pub table: TableArg,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Kind of record to show
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum RecordKindArg {
    Garden,
    Pipeline,
    Model,
}

/// Show a single record in detail
#[derive(Debug, Args, Clone)]
pub struct ShowCommand {
    /// Kind of record
    #[arg(value_enum)]
    pub kind: RecordKindArg,

    /// DOI (gardens, pipelines) or model URI
    pub id: String,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Kind of record a citation can be minted for
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CitationKindArg {
    Garden,
    Pipeline,
}

/// Print DataCite citation metadata for a record
#[derive(Debug, Args, Clone)]
pub struct CitationCommand {
    /// Kind of record
    #[arg(value_enum)]
    pub kind: CitationKindArg,

    /// DOI of the record
    pub doi: String,
}

/// Print denormalized publication metadata for a garden
#[derive(Debug, Args, Clone)]
pub struct ExpandCommand {
    /// DOI of the garden
    pub doi: String,
}

/// Register a model record
#[derive(Debug, Args, Clone)]
pub struct AddModelCommand {
    /// Model URI: <owner>-<name>/<version>
    #[arg(long)]
    pub uri: String,

    /// Serialization flavor (sklearn, pytorch, tensorflow)
    #[arg(long)]
    pub flavor: String,

    /// Dataset connection URLs (repeatable)
    #[arg(long = "connection")]
    pub connections: Vec<String>,
}
