pub mod cache;
pub mod cli;
pub mod config;
pub mod database;
pub mod domain;
pub mod errors;
pub mod ingestion;
pub mod rating;
pub mod report;
pub mod services;

use std::path::Path;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use cli::Cli;

use crate::cli::Command;
use crate::config::settings::AppConfig;
use crate::config::{get_datasets, load_manifest, DatasetConfig};
use crate::report::console;
use crate::services::processing::ProcessingService;
use crate::services::validation::ValidationService;

pub fn interpret() -> Command {
    let cli = Cli::parse();
    cli.command
}

fn datasets(config: &AppConfig, manifest: Option<&Path>) -> Result<Vec<DatasetConfig>> {
    match manifest {
        Some(path) => load_manifest(path),
        None => Ok(get_datasets(&config.paths.datasets_dir)),
    }
}

pub fn handle_rate(
    manifest: Option<&Path>,
    output: Option<&Path>,
    database: Option<&Path>,
    cache_dir: Option<&Path>,
) -> Result<()> {
    let mut config = AppConfig::new();
    if let Some(output) = output {
        config.paths.output_path = output.to_path_buf();
    }
    if let Some(cache_dir) = cache_dir {
        config.paths.cache_dir = cache_dir.to_path_buf();
    }
    let datasets = datasets(&config, manifest)?;
    let output_path = config.paths.output_path.clone();

    let mut service = ProcessingService::new(config)?;
    if let Some(database) = database {
        service = service.with_database(database);
    }
    let result = service.run(&datasets)?;

    console::print_known_tournaments(&result.registry);
    console::print_data_errors(&result.registry);
    match &result.comparison {
        Some(comparison) => console::print_comparison(comparison),
        None => println!("No previous run to compare against"),
    }
    println!("Wrote {} players to {}", result.report.rows.len(), output_path.display());
    Ok(())
}

pub fn handle_check(roster: &Path, matches: &Path) -> Result<()> {
    let service = ValidationService::new(DatasetConfig::new(roster, matches));
    let (summary, registry) = service.run()?;
    console::print_dataset_check(&summary, &registry);
    console::print_data_errors(&registry);
    Ok(())
}

pub fn handle_tournaments(manifest: Option<&Path>) -> Result<()> {
    let config = AppConfig::new();
    let datasets = datasets(&config, manifest)?;
    let registry = ProcessingService::load_registry(&datasets)?;
    console::print_known_tournaments(&registry);
    Ok(())
}

pub fn handle_completions(shell: Shell) -> Result<()> {
    let mut command = Cli::command();
    let name = command.get_name().to_string();
    clap_complete::generate(shell, &mut command, name, &mut std::io::stdout());
    Ok(())
}
