use std::path::Path;

use chrono::{DateTime, FixedOffset};
use csv::StringRecord;
use log::{debug, info};

use super::csv_source::{csv_error, line_of, open_reader, required_field};
use crate::domain::{Match, Registry, TIMESTAMP_FORMAT};
use crate::errors::{IngestError, IntegrityKind, IntegrityProblem};

const TOURNAMENT_COLUMN: usize = 0;
const BRACKET_COLUMN: usize = 1;
const TEAM1_COLUMN: usize = 2;
const TEAM2_COLUMN: usize = 3;
const TEAM1_WINS_COLUMN: usize = 4;
const TEAM2_WINS_COLUMN: usize = 5;
const TIME_COLUMN: usize = 6;

/// Upper bound on one team's game wins within a single match row
pub const MAX_WINS_PER_MATCH: u32 = 100;

#[derive(Debug, Default, Clone, PartialEq)]
pub struct MatchSummary {
    pub rows: usize,
    pub tracked: usize,
}

/// Read a match-result file and add its matches to the schedule
///
/// Matches may only reference tournaments and teams the rosters declared.
/// Every unresolved reference in the file is collected and reported in one
/// `ReferentialIntegrity` error; in that case no match from the file is kept.
/// Unparseable win counts or timestamps fail immediately.
pub fn ingest_matches(registry: &mut Registry, path: &Path) -> Result<MatchSummary, IngestError> {
    let mut reader = open_reader(path)?;
    let mut matches = Vec::new();
    let mut problems = Vec::new();

    for result in reader.records() {
        let record = result.map_err(csv_error(path))?;
        let parsed = parse_match(&record, path)?;
        problems.extend(check_references(registry, &parsed, line_of(&record)));
        matches.push(parsed);
    }

    if !problems.is_empty() {
        return Err(IngestError::ReferentialIntegrity {
            path: path.to_path_buf(),
            problems,
        });
    }

    let rows = matches.len();
    for m in &matches {
        registry.observe_match_date(&m.tournament, m.date());
    }
    registry.add_matches(matches);

    info!(
        "Processed {} matches from {}, now tracking {} matches",
        rows,
        path.display(),
        registry.match_count()
    );
    Ok(MatchSummary {
        rows,
        tracked: registry.match_count(),
    })
}

fn parse_match(record: &StringRecord, path: &Path) -> Result<Match, IngestError> {
    let field = |index, name| required_field(record, index, name, path);

    Ok(Match {
        tournament: field(TOURNAMENT_COLUMN, "tournament")?.to_string(),
        bracket: record.get(BRACKET_COLUMN).unwrap_or_default().to_string(),
        team1: field(TEAM1_COLUMN, "team1")?.to_string(),
        team2: field(TEAM2_COLUMN, "team2")?.to_string(),
        team1_wins: parse_wins(record, field(TEAM1_WINS_COLUMN, "team1 wins")?, "team1 wins", path)?,
        team2_wins: parse_wins(record, field(TEAM2_WINS_COLUMN, "team2 wins")?, "team2 wins", path)?,
        played_at: parse_timestamp(record, field(TIME_COLUMN, "timestamp")?, path)?,
    })
}

fn parse_wins(
    record: &StringRecord,
    value: &str,
    field: &'static str,
    path: &Path,
) -> Result<u32, IngestError> {
    let wins = value
        .parse::<u32>()
        .map_err(|e| malformed(record, field, value, e.to_string(), path))?;

    if wins > MAX_WINS_PER_MATCH {
        return Err(malformed(
            record,
            field,
            value,
            format!("more than {} wins in one match", MAX_WINS_PER_MATCH),
            path,
        ));
    }
    Ok(wins)
}

fn parse_timestamp(
    record: &StringRecord,
    value: &str,
    path: &Path,
) -> Result<DateTime<FixedOffset>, IngestError> {
    DateTime::parse_from_str(value, TIMESTAMP_FORMAT)
        .map_err(|e| malformed(record, "timestamp", value, e.to_string(), path))
}

fn malformed(
    record: &StringRecord,
    field: &'static str,
    value: &str,
    reason: String,
    path: &Path,
) -> IngestError {
    IngestError::MalformedInput {
        path: path.to_path_buf(),
        line: line_of(record),
        field,
        value: value.to_string(),
        reason,
    }
}

fn check_references(registry: &Registry, m: &Match, line: u64) -> Vec<IntegrityProblem> {
    if !registry.has_tournament(&m.tournament) {
        debug!("line {}: unknown tournament {}", line, m.tournament);
        return vec![IntegrityProblem {
            line,
            tournament: m.tournament.clone(),
            kind: IntegrityKind::UnknownTournament {
                known: registry.tournament_ids(),
            },
        }];
    }

    [(&m.team1, &m.team2), (&m.team2, &m.team1)]
        .into_iter()
        .filter(|(team, _)| registry.roster(&m.tournament, team).is_none())
        .map(|(team, opponent)| IntegrityProblem {
            line,
            tournament: m.tournament.clone(),
            kind: IntegrityKind::UnknownTeam {
                team: team.clone(),
                opponent: opponent.clone(),
                known: registry.team_names(&m.tournament),
            },
        })
        .collect()
}
