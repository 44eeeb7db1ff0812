use anyhow::{Context, Result};
use log::info;

use crate::config::DatasetConfig;
use crate::domain::Registry;
use crate::ingestion::{self, DatasetSummary};

/// Ingests a single roster/results pair without rating it
pub struct ValidationService {
    dataset: DatasetConfig,
}

impl ValidationService {
    pub fn new(dataset: DatasetConfig) -> Self {
        Self { dataset }
    }

    pub fn run(&self) -> Result<(DatasetSummary, Registry)> {
        let mut registry = Registry::new();
        let summary = ingestion::ingest_dataset(&mut registry, &self.dataset)
            .with_context(|| format!("Dataset {} failed validation", self.dataset.roster.display()))?;

        info!(
            "Dataset {} is consistent: {} teams across {} tournaments",
            self.dataset.roster.display(),
            registry
                .tournament_ids()
                .iter()
                .map(|t| registry.team_names(t).len())
                .sum::<usize>(),
            registry.tournaments().len()
        );
        Ok((summary, registry))
    }
}
