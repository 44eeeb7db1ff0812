use std::collections::BTreeMap;

use colored::Colorize;

use super::compare::RatingComparison;
use crate::domain::{Registry, Tournament};
use crate::ingestion::DatasetSummary;

/// Tournament ids grouped by year, each year ordered by date
pub fn tournaments_by_year(registry: &Registry) -> BTreeMap<Option<i32>, Vec<String>> {
    use chrono::Datelike;

    let mut years: BTreeMap<Option<i32>, Vec<String>> = BTreeMap::new();
    for tournament in registry.tournaments_by_date() {
        years
            .entry(tournament.date.map(|d| d.year()))
            .or_default()
            .push(tournament.id.clone());
    }
    years
}

pub fn print_known_tournaments(registry: &Registry) {
    for (year, ids) in tournaments_by_year(registry) {
        let label = year.map_or_else(|| "no matches".to_string(), |y| y.to_string());
        println!("{}: {}", label.bold(), ids.join(", "));
    }
}

pub fn print_data_errors(registry: &Registry) {
    if registry.incomplete().is_empty() {
        println!("{}", "No incomplete roster entries".green());
        return;
    }
    for entry in registry.incomplete() {
        println!("{}", entry.to_string().yellow());
    }
}

pub fn print_comparison(comparison: &RatingComparison) {
    if comparison.is_unchanged() {
        println!("{}", "Ratings are unchanged since the last run".green());
        return;
    }
    println!("{} {:?}", "New players:".bold(), comparison.new_players);
    println!("{} {:?}", "Removed players:".bold(), comparison.removed_players);
    println!("{} {}", "Changed players:".bold(), comparison.changed.len());
    for delta in &comparison.changed {
        println!("  {}: mu {:+.4}, sigma {:+.4}", delta.player, delta.mu, delta.sigma);
    }
}

pub fn print_dataset_check(summary: &DatasetSummary, registry: &Registry) {
    println!(
        "{} {} roster rows, {} new players, {} matches",
        "OK".green().bold(),
        summary.roster.rows,
        summary.roster.new_players.len(),
        summary.matches.rows
    );
    for tournament in registry.tournaments() {
        print_tournament_teams(registry, tournament);
    }
}

fn print_tournament_teams(registry: &Registry, tournament: &Tournament) {
    let date = tournament
        .date
        .map_or_else(|| "undated".to_string(), |d| d.to_string());
    println!("{} ({})", tournament.id.bold(), date);
    for (team, roster) in registry.teams(&tournament.id) {
        let line = format!("  {} [{}]: {}", team, roster.len(), roster.join(", "));
        if registry.matches().iter().any(|m| m.tournament == tournament.id && (&m.team1 == team || &m.team2 == team)) {
            println!("{}", line);
        } else {
            println!("{} {}", line, "(no matches)".yellow());
        }
    }
}
