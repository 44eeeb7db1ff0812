use std::path::PathBuf;

use anyhow::{Context, Result};
use log::{info, warn};

use super::export::ExportService;
use crate::cache::RunCache;
use crate::config::settings::AppConfig;
use crate::config::DatasetConfig;
use crate::domain::Registry;
use crate::ingestion;
use crate::rating::{RatingEngine, ReplayOutcome, TrueSkill};
use crate::report::{self, RatingComparison, ReportTable};

/// Everything a finished rating run produced
#[derive(Debug)]
pub struct RunResult {
    pub registry: Registry,
    pub outcome: ReplayOutcome,
    pub report: ReportTable,
    /// `None` on the first run against an empty cache
    pub comparison: Option<RatingComparison>,
}

pub struct ProcessingService {
    config: AppConfig,
    cache: RunCache,
    database: Option<PathBuf>,
}

impl ProcessingService {
    pub fn new(config: AppConfig) -> Result<Self> {
        let cache = RunCache::new(&config.paths.cache_dir)?;
        Ok(Self {
            config,
            cache,
            database: None,
        })
    }

    pub fn with_database<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.database = Some(path.into());
        self
    }

    pub fn run(&self, datasets: &[DatasetConfig]) -> Result<RunResult> {
        info!("=== Starting Rating Run ===");

        let registry = Self::load_registry(datasets)?;
        info!(
            "  → {} tournaments, {} players, {} matches",
            registry.tournaments().len(),
            registry.players().len(),
            registry.match_count()
        );
        if !registry.incomplete().is_empty() {
            warn!("{} roster entries have no player name", registry.incomplete().len());
        }

        let outcome = self.replay(&registry)?;
        info!("  → Captured {} tournament snapshots", outcome.snapshots.len());

        let table = report::build_report(&registry, &outcome, &self.config.report);
        report::write_report(&table, &self.config.paths.output_path)?;

        let comparison = self.compare_with_previous(&outcome)?;

        if let Some(db_path) = &self.database {
            ExportService::new(db_path, self.config.report.clone()).run(&registry, &outcome)?;
        }

        info!("=== Rating Run Complete ===");
        Ok(RunResult {
            registry,
            outcome,
            report: table,
            comparison,
        })
    }

    /// Ingest without touching the cache or any output path
    pub fn load_registry(datasets: &[DatasetConfig]) -> Result<Registry> {
        let mut registry = Registry::new();
        let summaries = ingestion::ingest_all(&mut registry, datasets).context("Failed to ingest datasets")?;
        info!("  → Ingested {} datasets", summaries.len());
        Ok(registry)
    }

    pub fn replay(&self, registry: &Registry) -> Result<ReplayOutcome> {
        let updater = TrueSkill::new(&self.config.rating)?;
        let mut engine = RatingEngine::new(updater, self.config.rating.team_size);
        engine.replay(registry).context("Rating replay failed")
    }

    fn compare_with_previous(&self, outcome: &ReplayOutcome) -> Result<Option<RatingComparison>> {
        let previous = self.cache.load_ratings()?;
        let comparison = previous.map(|previous| RatingComparison::between(&previous, &outcome.ratings));

        self.cache.save_ratings(&outcome.ratings)?;
        Ok(comparison)
    }
}
