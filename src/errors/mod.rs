use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// A match row that points at a tournament or team the rosters never declared
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntegrityProblem {
    pub line: u64,
    pub tournament: String,
    pub kind: IntegrityKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntegrityKind {
    UnknownTournament { known: Vec<String> },
    UnknownTeam { team: String, opponent: String, known: Vec<String> },
}

impl fmt::Display for IntegrityProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            IntegrityKind::UnknownTournament { known } => write!(
                f,
                "line {}: tournament {} not found, tournaments known = [{}]",
                self.line,
                self.tournament,
                known.join(", ")
            ),
            IntegrityKind::UnknownTeam { team, opponent, known } => write!(
                f,
                "line {}: team {} not found in {} (opponent was {}), teams known = [{}]",
                self.line,
                team,
                self.tournament,
                opponent,
                known.join(", ")
            ),
        }
    }
}

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("failed to read {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse CSV in {path}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("{path} line {line}: tournament {tournament} has a player with no team")]
    BlankTeam {
        path: PathBuf,
        line: u64,
        tournament: String,
    },

    #[error("{path} line {line}: malformed {field} {value:?}: {reason}")]
    MalformedInput {
        path: PathBuf,
        line: u64,
        field: &'static str,
        value: String,
        reason: String,
    },

    #[error("{path}: {} unresolved reference(s)\n{}", .problems.len(), format_problems(.problems))]
    ReferentialIntegrity {
        path: PathBuf,
        problems: Vec<IntegrityProblem>,
    },
}

fn format_problems(problems: &[IntegrityProblem]) -> String {
    problems
        .iter()
        .map(|p| p.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Debug, Error, PartialEq)]
pub enum EngineError {
    #[error("{tournament}: team {team} has {actual} players, expected {expected}")]
    RosterSizeMismatch {
        tournament: String,
        team: String,
        expected: usize,
        actual: usize,
    },

    #[error("{tournament}: team {team} is not registered")]
    UnknownTeam { tournament: String, team: String },

    #[error("rating update returned {actual} ratings for a team of {expected}")]
    UpdaterLengthMismatch { expected: usize, actual: usize },

    #[error("snapshot for {0} was already recorded")]
    DuplicateSnapshot(String),
}
