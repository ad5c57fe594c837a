mod citation;
mod cli;
mod core;
mod registry;

use anyhow::{anyhow, Context, Result};
use citation::DataciteSchema;
use cli::commands::{
    AddModelCommand, CitationCommand, CitationKindArg, ExpandCommand, ListCommand, RecordKindArg,
    ShowCommand, TableArg, ValidateCommand,
};
use cli::output::*;
use cli::{Cli, Command};
use core::{Connection, ConnectionType, ModelFlavor, ModelUri, RegisteredModel};
use registry::{JsonFileStore, LocalRegistry, RegistryBackend};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::from_args();

    // Initialize logging
    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set logging subscriber")?;

    // Execute command
    match &cli.command {
        Command::Validate(cmd) => validate_registry(cmd, &cli).await?,
        Command::List(cmd) => list_records(cmd, &cli).await?,
        Command::Show(cmd) => show_record(cmd, &cli).await?,
        Command::Citation(cmd) => print_citation(cmd, &cli).await?,
        Command::Expand(cmd) => expand_garden(cmd, &cli).await?,
        Command::AddModel(cmd) => add_model(cmd, &cli).await?,
    }

    Ok(())
}

/// Store at the path the user asked for, or the platform default
fn store_for(cli: &Cli) -> JsonFileStore {
    match &cli.registry {
        Some(path) => JsonFileStore::new(path),
        None => JsonFileStore::with_default_path(),
    }
}

async fn load_registry(cli: &Cli) -> Result<LocalRegistry> {
    store_for(cli).load().await
}

async fn validate_registry(cmd: &ValidateCommand, cli: &Cli) -> Result<()> {
    let store = match &cmd.file {
        Some(path) => JsonFileStore::new(path),
        None => store_for(cli),
    };
    println!(
        "{} Validating registry at {}",
        INFO,
        style(store.path().display()).dim()
    );

    let registry = store.load().await?;

    let record_errors = registry.validate_records();
    let violations = registry.check_references();
    let valid = record_errors.is_empty() && violations.is_empty();

    if cmd.json {
        let data = serde_json::json!({
            "valid": valid,
            "gardens": registry.gardens.len(),
            "pipelines": registry.pipelines.len(),
            "models": registry.models.len(),
            "record_errors": record_errors.iter().map(|e| e.to_string()).collect::<Vec<_>>(),
            "violations": violations.iter().map(|v| v.to_string()).collect::<Vec<_>>(),
        });
        println!("{}", serde_json::to_string_pretty(&data)?);
    } else {
        println!(
            "  Gardens: {}  Pipelines: {}  Models: {}",
            style(registry.gardens.len()).cyan(),
            style(registry.pipelines.len()).cyan(),
            style(registry.models.len()).cyan()
        );
        for error in &record_errors {
            println!("{} {}", CROSS, style(error).red());
        }
        for violation in &violations {
            println!("{}", format_violation(violation));
        }
        if valid {
            println!("{} Registry is valid!", CHECK);
        } else {
            println!(
                "{} Registry has {} problem(s)",
                CROSS,
                record_errors.len() + violations.len()
            );
        }
    }

    if !valid {
        std::process::exit(1);
    }
    Ok(())
}

async fn list_records(cmd: &ListCommand, cli: &Cli) -> Result<()> {
    let registry = load_registry(cli).await?;

    match cmd.table {
        TableArg::Gardens => {
            if cmd.json {
                println!("{}", serde_json::to_string_pretty(&registry.gardens)?);
                return Ok(());
            }
            if registry.gardens.is_empty() {
                println!("{} No gardens in registry", INFO);
            }
            for garden in registry.gardens.values() {
                println!("{}", format_garden_summary(garden));
            }
        }
        TableArg::Pipelines => {
            if cmd.json {
                println!("{}", serde_json::to_string_pretty(&registry.pipelines)?);
                return Ok(());
            }
            if registry.pipelines.is_empty() {
                println!("{} No pipelines in registry", INFO);
            }
            for pipeline in registry.pipelines.values() {
                println!("  {}", format_pipeline_summary(pipeline));
            }
        }
        TableArg::Models => {
            if cmd.json {
                println!("{}", serde_json::to_string_pretty(&registry.models)?);
                return Ok(());
            }
            if registry.models.is_empty() {
                println!("{} No models in registry", INFO);
            }
            for model in registry.models.values() {
                println!("  {}", format_model_summary(model));
            }
        }
    }

    Ok(())
}

async fn show_record(cmd: &ShowCommand, cli: &Cli) -> Result<()> {
    let registry = load_registry(cli).await?;

    match cmd.kind {
        RecordKindArg::Garden => {
            let garden = registry
                .garden(&cmd.id)
                .ok_or_else(|| anyhow!("garden '{}' not found in registry", cmd.id))?;
            if cmd.json {
                println!("{}", serde_json::to_string_pretty(garden)?);
                return Ok(());
            }
            println!("{} {}", LEAF, style(&garden.title).bold());
            println!("  DOI: {}", style(&garden.doi).cyan());
            println!("  Authors: {}", format_authors(&garden.authors));
            if let Some(desc) = &garden.description {
                println!("  {}", style(desc).dim());
            }
            println!(
                "  Published: {} ({}, v{})",
                garden.year, garden.publisher, garden.version
            );
            println!("  Pipelines:");
            for doi in &garden.pipeline_ids {
                match registry.pipeline(doi) {
                    Some(pipeline) => println!("    {}", format_pipeline_summary(pipeline)),
                    None => println!("    {} {} (no record)", WARN, style(doi).red()),
                }
            }
        }
        RecordKindArg::Pipeline => {
            let pipeline = registry
                .pipeline(&cmd.id)
                .ok_or_else(|| anyhow!("pipeline '{}' not found in registry", cmd.id))?;
            if cmd.json {
                println!("{}", serde_json::to_string_pretty(pipeline)?);
                return Ok(());
            }
            println!("{}", format_pipeline_summary(pipeline));
            println!("  Authors: {}", format_authors(&pipeline.authors));
            if !pipeline.contributors.is_empty() {
                println!("  Contributors: {}", format_authors(&pipeline.contributors));
            }
            println!("  Steps:");
            for step in &pipeline.steps {
                println!(
                    "    {} ({} -> {})",
                    style(&step.function_name).bold(),
                    style(&step.input_info).dim(),
                    style(&step.output_info).dim()
                );
            }
            let models = registry.collect_models(&pipeline.doi)?;
            if !models.is_empty() {
                println!("  Models:");
                for model in models {
                    println!("    {}", format_model_summary(model));
                }
            }
        }
        RecordKindArg::Model => {
            let model = registry
                .model(&cmd.id)
                .ok_or_else(|| anyhow!("model '{}' not found in registry", cmd.id))?;
            if cmd.json {
                println!("{}", serde_json::to_string_pretty(model)?);
                return Ok(());
            }
            println!("{}", format_model_summary(model));
            println!(
                "  Owner: {}  Name: {}  Version: {}",
                style(&model.owner).cyan(),
                style(&model.model_name).bold(),
                model.version
            );
            for connection in &model.connections {
                println!(
                    "    {} {} ({})",
                    INFO,
                    style(&connection.url).cyan(),
                    connection.relationship
                );
            }
        }
    }

    Ok(())
}

async fn print_citation(cmd: &CitationCommand, cli: &Cli) -> Result<()> {
    let registry = load_registry(cli).await?;

    let schema = match cmd.kind {
        CitationKindArg::Garden => {
            let garden = registry
                .garden(&cmd.doi)
                .ok_or_else(|| anyhow!("garden '{}' not found in registry", cmd.doi))?;
            DataciteSchema::from_garden(garden)
        }
        CitationKindArg::Pipeline => {
            let pipeline = registry
                .pipeline(&cmd.doi)
                .ok_or_else(|| anyhow!("pipeline '{}' not found in registry", cmd.doi))?;
            DataciteSchema::from_pipeline(pipeline)
        }
    };

    println!("{}", schema.to_json()?);
    Ok(())
}

async fn expand_garden(cmd: &ExpandCommand, cli: &Cli) -> Result<()> {
    let registry = load_registry(cli).await?;

    // Publication metadata must be complete; check before expanding
    if let Err(e) = registry.ensure_references() {
        println!("{} {}", CROSS, style(&e).red());
        if let registry::RegistryError::BrokenReferences(violations) = &e {
            for violation in violations {
                println!("{}", format_violation(violation));
            }
        }
        std::process::exit(1);
    }

    let expanded = registry.expanded_garden(&cmd.doi)?;
    println!("{}", serde_json::to_string_pretty(&expanded)?);
    Ok(())
}

async fn add_model(cmd: &AddModelCommand, cli: &Cli) -> Result<()> {
    let uri = ModelUri::parse(&cmd.uri)?;
    let flavor: ModelFlavor = cmd
        .flavor
        .parse()
        .map_err(|e: String| anyhow!(e))?;

    let mut model = RegisteredModel::new(uri.owner(), uri.name(), uri.version(), flavor);
    for url in &cmd.connections {
        model.connections.push(Connection {
            connection_type: ConnectionType::Dataset,
            relationship: "origin".to_string(),
            doi: None,
            url: url.clone(),
            repository: None,
        });
    }

    let store = store_for(cli);
    let mut registry = store.load().await?;
    registry.put_model(model)?;
    store.save(&registry).await?;

    println!(
        "{} Registered model {}",
        CHECK,
        style(&cmd.uri).cyan()
    );
    Ok(())
}
