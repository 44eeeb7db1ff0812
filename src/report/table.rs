use log::warn;

use crate::config::settings::ReportSettings;
use crate::domain::{PlayerProfile, Registry, Tournament};
use crate::rating::{PlayerStats, ReplayOutcome};

pub type Cell = Option<String>;

const FIXED_COLUMNS: [&str; 8] = [
    "Player Name",
    "scene",
    "conservative-skill",
    "tourneys",
    "games",
    "wins",
    "losses",
    "win%",
];

/// Flattened player summary: fixed columns, then one team column and one
/// historical-skill column per tournament, tournaments in date order
#[derive(Debug, Clone, PartialEq)]
pub struct ReportTable {
    pub header: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl ReportTable {
    pub fn column(&self, name: &str) -> Option<usize> {
        self.header.iter().position(|h| h == name)
    }

    pub fn row_for(&self, player: &str) -> Option<&[Cell]> {
        self.rows
            .iter()
            .find(|row| row.first().and_then(Option::as_deref) == Some(player))
            .map(Vec::as_slice)
    }
}

pub fn build_report(registry: &Registry, outcome: &ReplayOutcome, settings: &ReportSettings) -> ReportTable {
    let tournaments = registry.tournaments_by_date();
    let header = build_header(&tournaments);

    let rows = outcome
        .ratings
        .iter()
        .filter_map(|(name, skill)| {
            let profile = registry.player(name)?;
            let stats = outcome.stats.get(name).copied().unwrap_or_default();
            let mut row = summary_cells(profile, skill.rating.conservative(settings.conservative_k), &stats, settings);
            row.extend(team_cells(profile, &tournaments));
            row.extend(history_cells(name, outcome, &tournaments, settings));
            Some(row)
        })
        .collect();

    ReportTable { header, rows }
}

fn build_header(tournaments: &[&Tournament]) -> Vec<String> {
    let ids = tournaments.iter().map(|t| t.id.clone());
    FIXED_COLUMNS
        .iter()
        .map(|c| c.to_string())
        .chain(ids.clone())
        .chain(ids)
        .collect()
}

fn summary_cells(profile: &PlayerProfile, score: f64, stats: &PlayerStats, settings: &ReportSettings) -> Vec<Cell> {
    vec![
        Some(profile.name.clone()),
        profile.scene.clone(),
        Some(score.to_string()),
        Some(profile.tournaments.len().to_string()),
        Some(stats.games.to_string()),
        Some(stats.wins.to_string()),
        Some(stats.losses.to_string()),
        win_ratio_cell(profile, stats, settings),
    ]
}

fn win_ratio_cell(profile: &PlayerProfile, stats: &PlayerStats, settings: &ReportSettings) -> Cell {
    match stats.win_ratio() {
        Some(ratio) => Some(format!("{:.*}", settings.win_ratio_precision, ratio)),
        None => {
            warn!(
                "{} ({}) has no recorded games, teams: {:?}; leaving win% empty",
                profile.name,
                profile.scene.as_deref().unwrap_or("no scene"),
                profile.teams
            );
            None
        }
    }
}

fn team_cells<'a>(profile: &'a PlayerProfile, tournaments: &'a [&'a Tournament]) -> impl Iterator<Item = Cell> + 'a {
    tournaments.iter().map(move |t| {
        profile
            .team_in(&t.id)
            .map(|team| format!("{} / {}", t.id, team))
    })
}

fn history_cells<'a>(
    name: &'a str,
    outcome: &'a ReplayOutcome,
    tournaments: &'a [&'a Tournament],
    settings: &'a ReportSettings,
) -> impl Iterator<Item = Cell> + 'a {
    tournaments.iter().map(move |t| {
        outcome
            .snapshots
            .get(&t.id)
            .and_then(|snapshot| snapshot.get(name))
            .filter(|skill| skill.has_played)
            .map(|skill| skill.rating.conservative(settings.conservative_k).to_string())
    })
}
