use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use log::debug;

use super::models::{IncompleteEntry, Match, PlayerName, PlayerProfile, Tournament, TournamentId};
use super::schedule::MatchSchedule;

type Roster = Vec<PlayerName>;

/// Players, teams, tournaments and matches built up by ingestion
///
/// Holds no rating state; the engine reads it and keeps its own.
#[derive(Debug, Default)]
pub struct Registry {
    tournaments: Vec<Tournament>,
    teams: HashMap<TournamentId, BTreeMap<String, Roster>>,
    players: BTreeMap<PlayerName, PlayerProfile>,
    incomplete: Vec<IncompleteEntry>,
    schedule: MatchSchedule,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_tournament(&mut self, id: &str) {
        if !self.has_tournament(id) {
            debug!("Registered tournament {}", id);
            self.tournaments.push(Tournament::new(id));
            self.teams.insert(id.to_string(), BTreeMap::new());
        }
    }

    pub fn has_tournament(&self, id: &str) -> bool {
        self.teams.contains_key(id)
    }

    /// Append `player` to the team's roster, creating tournament and team as needed
    pub fn add_player(&mut self, tournament: &str, team: &str, player: &str, scene: Option<&str>) {
        self.register_tournament(tournament);
        self.teams
            .entry(tournament.to_string())
            .or_default()
            .entry(team.to_string())
            .or_default()
            .push(player.to_string());

        let profile = self
            .players
            .entry(player.to_string())
            .or_insert_with(|| PlayerProfile::new(player));
        if let Some(scene) = scene {
            profile.scene = Some(scene.to_string());
        }
        if !profile.tournaments.iter().any(|t| t == tournament) {
            profile.tournaments.push(tournament.to_string());
        }
        profile.teams.insert(tournament.to_string(), team.to_string());
    }

    pub fn record_incomplete(&mut self, entry: IncompleteEntry) {
        self.incomplete.push(entry);
    }

    pub fn roster(&self, tournament: &str, team: &str) -> Option<&[PlayerName]> {
        self.teams
            .get(tournament)
            .and_then(|teams| teams.get(team))
            .map(Vec::as_slice)
    }

    pub fn roster_len(&self, tournament: &str, team: &str) -> usize {
        self.roster(tournament, team).map_or(0, <[PlayerName]>::len)
    }

    pub fn team_names(&self, tournament: &str) -> Vec<String> {
        self.teams
            .get(tournament)
            .map(|teams| teams.keys().cloned().collect())
            .unwrap_or_default()
    }

    pub fn teams(&self, tournament: &str) -> impl Iterator<Item = (&String, &Roster)> {
        self.teams.get(tournament).into_iter().flat_map(|teams| teams.iter())
    }

    pub fn tournament_ids(&self) -> Vec<String> {
        self.tournaments.iter().map(|t| t.id.clone()).collect()
    }

    pub fn observe_match_date(&mut self, tournament: &str, date: NaiveDate) {
        if let Some(t) = self.tournaments.iter_mut().find(|t| t.id == tournament) {
            if t.observe_match_date(date) {
                debug!("Set {} date to {}", tournament, date);
            }
        }
    }

    /// Tournaments in discovery order
    pub fn tournaments(&self) -> &[Tournament] {
        &self.tournaments
    }

    /// Tournaments by date; undated ones (no matches yet) last, by id
    pub fn tournaments_by_date(&self) -> Vec<&Tournament> {
        let mut sorted: Vec<&Tournament> = self.tournaments.iter().collect();
        sorted.sort_by(|a, b| match (a.date, b.date) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => a.id.cmp(&b.id),
        });
        sorted
    }

    pub fn players(&self) -> &BTreeMap<PlayerName, PlayerProfile> {
        &self.players
    }

    pub fn player(&self, name: &str) -> Option<&PlayerProfile> {
        self.players.get(name)
    }

    pub fn incomplete(&self) -> &[IncompleteEntry] {
        &self.incomplete
    }

    pub fn add_matches(&mut self, matches: Vec<Match>) {
        self.schedule.extend(matches);
    }

    pub fn matches(&self) -> &[Match] {
        self.schedule.as_slice()
    }

    pub fn match_count(&self) -> usize {
        self.schedule.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_player_builds_rosters_in_order() {
        let mut registry = Registry::new();
        registry.add_player("BB3", "Alpha", "ann", Some("Chicago"));
        registry.add_player("BB3", "Alpha", "bob", None);

        assert!(registry.has_tournament("BB3"));
        assert_eq!(registry.roster("BB3", "Alpha").unwrap(), ["ann", "bob"]);
        assert_eq!(registry.roster_len("BB3", "Beta"), 0);
        assert_eq!(registry.player("ann").unwrap().scene.as_deref(), Some("Chicago"));
    }

    #[test]
    fn test_player_accumulates_tournaments_without_duplicates() {
        let mut registry = Registry::new();
        registry.add_player("BB3", "Alpha", "ann", Some("Chicago"));
        registry.add_player("GDC3", "Gamma", "ann", None);
        registry.add_player("GDC3", "Gamma", "ann", None);

        let ann = registry.player("ann").unwrap();
        assert_eq!(ann.tournaments, vec!["BB3", "GDC3"]);
        assert_eq!(ann.team_in("GDC3"), Some("Gamma"));
        // blank scene does not erase a known one
        assert_eq!(ann.scene.as_deref(), Some("Chicago"));
    }

    #[test]
    fn test_tournaments_by_date_puts_undated_last() {
        let mut registry = Registry::new();
        registry.register_tournament("Late");
        registry.register_tournament("Undated");
        registry.register_tournament("Early");
        registry.observe_match_date("Late", NaiveDate::from_ymd_opt(2019, 6, 1).unwrap());
        registry.observe_match_date("Early", NaiveDate::from_ymd_opt(2018, 6, 1).unwrap());

        let ids: Vec<_> = registry.tournaments_by_date().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["Early", "Late", "Undated"]);
    }
}
