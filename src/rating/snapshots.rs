use std::collections::BTreeMap;

use log::debug;

use super::types::RatingMap;
use crate::domain::TournamentId;
use crate::errors::EngineError;

/// Write-once store of rating maps keyed by tournament
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SnapshotStore {
    snapshots: BTreeMap<TournamentId, RatingMap>,
}

impl SnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a copy of `ratings` as the state at the end of `tournament`
    pub fn capture(&mut self, tournament: &str, ratings: &RatingMap) -> Result<(), EngineError> {
        if self.snapshots.contains_key(tournament) {
            return Err(EngineError::DuplicateSnapshot(tournament.to_string()));
        }
        debug!("Recorded snapshot for {} ({} players)", tournament, ratings.len());
        self.snapshots.insert(tournament.to_string(), ratings.clone());
        Ok(())
    }

    pub fn get(&self, tournament: &str) -> Option<&RatingMap> {
        self.snapshots.get(tournament)
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&TournamentId, &RatingMap)> {
        self.snapshots.iter()
    }
}
