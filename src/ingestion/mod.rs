mod csv_source;
pub mod matches;
pub mod roster;

use log::info;

use crate::config::DatasetConfig;
use crate::domain::Registry;
use crate::errors::IngestError;

pub use matches::{ingest_matches, MatchSummary};
pub use roster::{ingest_roster, placeholder_name, RosterSummary, TeamCarryForward};

#[derive(Debug, Clone, PartialEq)]
pub struct DatasetSummary {
    pub roster: RosterSummary,
    pub matches: MatchSummary,
}

/// Ingest one roster/results pair
///
/// The roster always goes first since matches may only reference teams it
/// declares. The schedule is re-sorted as matches are added, so datasets can
/// be ingested in any order.
pub fn ingest_dataset(
    registry: &mut Registry,
    dataset: &DatasetConfig,
) -> Result<DatasetSummary, IngestError> {
    info!("Ingesting dataset {}", dataset.roster.display());
    let roster = ingest_roster(registry, &dataset.roster)?;
    let matches = ingest_matches(registry, &dataset.matches)?;
    Ok(DatasetSummary { roster, matches })
}

/// Ingest datasets in order, stopping at the first failing file
pub fn ingest_all(
    registry: &mut Registry,
    datasets: &[DatasetConfig],
) -> Result<Vec<DatasetSummary>, IngestError> {
    datasets
        .iter()
        .map(|dataset| ingest_dataset(registry, dataset))
        .collect()
}
