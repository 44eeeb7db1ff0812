use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, FixedOffset, NaiveDate};

pub type PlayerName = String;
pub type TournamentId = String;

/// Timestamp format used by match-result files, e.g. `2019-03-02T14:05:00-0800`
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%z";

/// Tournament known from roster ingestion
///
/// The source data carries no explicit date; it is the date of the earliest
/// match seen for the tournament, and stays `None` until a match arrives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tournament {
    pub id: TournamentId,
    pub date: Option<NaiveDate>,
}

impl Tournament {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            date: None,
        }
    }

    pub fn observe_match_date(&mut self, date: NaiveDate) -> bool {
        match self.date {
            Some(current) if current <= date => false,
            _ => {
                self.date = Some(date);
                true
            }
        }
    }
}

/// Everything the rosters say about one player
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerProfile {
    pub name: PlayerName,
    pub scene: Option<String>,
    /// Tournaments in the order the rosters listed them
    pub tournaments: Vec<TournamentId>,
    pub teams: BTreeMap<TournamentId, String>,
}

impl PlayerProfile {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            scene: None,
            tournaments: Vec::new(),
            teams: BTreeMap::new(),
        }
    }

    pub fn team_in(&self, tournament: &str) -> Option<&str> {
        self.teams.get(tournament).map(String::as_str)
    }
}

/// One best-of series between two teams; each win is rated as its own game
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    pub tournament: TournamentId,
    pub bracket: String,
    pub team1: String,
    pub team2: String,
    pub team1_wins: u32,
    pub team2_wins: u32,
    pub played_at: DateTime<FixedOffset>,
}

impl Match {
    pub fn games(&self) -> u32 {
        self.team1_wins.saturating_add(self.team2_wins)
    }

    /// Calendar date in the timestamp's own offset
    pub fn date(&self) -> NaiveDate {
        self.played_at.date_naive()
    }
}

/// Roster row with no player name, kept for the data-errors report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncompleteEntry {
    pub line: u64,
    pub tournament: TournamentId,
    pub team: String,
    pub placeholder: PlayerName,
    pub scene: Option<String>,
}

impl fmt::Display for IncompleteEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {}, missing player (line {}) recorded as {:?}",
            self.tournament, self.team, self.line, self.placeholder
        )?;
        if let Some(scene) = &self.scene {
            write!(f, ", scene {}", scene)?;
        }
        Ok(())
    }
}
