use std::path::Path;

use log::{debug, info, warn};

use super::csv_source::{csv_error, line_of, open_reader, optional_field, required_field};
use crate::domain::{IncompleteEntry, Registry};
use crate::errors::IngestError;

const TOURNAMENT_COLUMN: usize = 0;
const TEAM_COLUMN: usize = 1;
const PLAYER_COLUMN: usize = 2;
const SCENE_COLUMN: usize = 3;

#[derive(Debug, Default, Clone, PartialEq)]
pub struct RosterSummary {
    pub rows: usize,
    pub new_players: Vec<String>,
    pub incomplete: usize,
}

/// Team name policy for grouped roster blocks
///
/// Rosters list a team's name on its first row only; following rows with a
/// blank team belong to the last named team in the same file.
#[derive(Debug, Default)]
pub struct TeamCarryForward {
    last_seen: Option<String>,
}

impl TeamCarryForward {
    pub fn resolve(&mut self, team: Option<&str>) -> Option<String> {
        if let Some(team) = team {
            self.last_seen = Some(team.to_string());
        }
        self.last_seen.clone()
    }
}

/// Name for a roster slot whose player is unknown
///
/// Scoped to tournament and team, so blank slots on same-named teams in
/// different tournaments never merge into one player.
pub fn placeholder_name(tournament: &str, team: &str, position: usize) -> String {
    format!("{}: {} {}", tournament, team, position)
}

pub fn ingest_roster(registry: &mut Registry, path: &Path) -> Result<RosterSummary, IngestError> {
    let mut reader = open_reader(path)?;
    let mut carry = TeamCarryForward::default();
    let mut summary = RosterSummary::default();

    for result in reader.records() {
        let record = result.map_err(csv_error(path))?;
        let line = line_of(&record);

        let tournament = required_field(&record, TOURNAMENT_COLUMN, "tournament", path)?;
        let team = carry
            .resolve(optional_field(&record, TEAM_COLUMN))
            .ok_or_else(|| IngestError::BlankTeam {
                path: path.to_path_buf(),
                line,
                tournament: tournament.to_string(),
            })?;
        let scene = optional_field(&record, SCENE_COLUMN);

        let (player, scene) = match optional_field(&record, PLAYER_COLUMN) {
            Some(name) => (name.to_string(), scene),
            None => {
                let position = registry.roster_len(tournament, &team) + 1;
                let placeholder = placeholder_name(tournament, &team, position);
                warn!("{}: {} has no player at line {}, using {:?}", tournament, team, line, placeholder);
                registry.record_incomplete(IncompleteEntry {
                    line,
                    tournament: tournament.to_string(),
                    team: team.clone(),
                    placeholder: placeholder.clone(),
                    scene: scene.map(str::to_string),
                });
                summary.incomplete += 1;
                // placeholder players carry no scene
                (placeholder, None)
            }
        };

        if registry.player(&player).is_none() {
            summary.new_players.push(player.clone());
        }
        registry.add_player(tournament, &team, &player, scene);
        summary.rows += 1;
    }

    info!("Processed {} roster rows from {}", summary.rows, path.display());
    if !summary.new_players.is_empty() {
        info!("  → {} new players", summary.new_players.len());
        debug!("  → New players: {}", summary.new_players.join(", "));
    }
    Ok(summary)
}
