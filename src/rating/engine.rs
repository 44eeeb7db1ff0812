use std::collections::HashMap;

use log::{debug, info};

use super::snapshots::SnapshotStore;
use super::types::{PlayerSkill, PlayerStats, Rating, RatingMap, StatsMap};
use super::updater::SkillUpdater;
use crate::domain::{Match, PlayerName, Registry, TournamentId};
use crate::errors::EngineError;

/// Final state of a full replay
#[derive(Debug, Clone, PartialEq)]
pub struct ReplayOutcome {
    pub ratings: RatingMap,
    pub stats: StatsMap,
    pub snapshots: SnapshotStore,
}

/// Replays the match schedule one game at a time
///
/// Every call to [`RatingEngine::replay`] starts from the prior for every
/// known player; nothing carries over between runs. The update model is
/// path-dependent, so matches must be fed in the schedule's timestamp order.
pub struct RatingEngine<U: SkillUpdater> {
    updater: U,
    team_size: usize,
    ratings: RatingMap,
    stats: StatsMap,
    snapshots: SnapshotStore,
    current: Option<TournamentId>,
}

impl<U: SkillUpdater> RatingEngine<U> {
    pub fn new(updater: U, team_size: usize) -> Self {
        Self {
            updater,
            team_size,
            ratings: RatingMap::new(),
            stats: StatsMap::new(),
            snapshots: SnapshotStore::new(),
            current: None,
        }
    }

    pub fn updater(&self) -> &U {
        &self.updater
    }

    pub fn replay(&mut self, registry: &Registry) -> Result<ReplayOutcome, EngineError> {
        self.reset(registry);
        let matches = registry.matches();
        let mut remaining = count_matches_per_tournament(matches);
        info!("Replaying {} matches", matches.len());

        for m in matches {
            if self.current.as_deref() != Some(m.tournament.as_str()) {
                self.leave_current_tournament(&remaining)?;
                info!("Processing {}", m.tournament);
                self.current = Some(m.tournament.clone());
            }

            self.play_match(registry, m)?;

            if let Some(count) = remaining.get_mut(m.tournament.as_str()) {
                *count -= 1;
            }
        }
        self.leave_current_tournament(&remaining)?;

        info!(
            "Replay complete: {} players rated, {} snapshots",
            self.ratings.len(),
            self.snapshots.len()
        );
        Ok(ReplayOutcome {
            ratings: std::mem::take(&mut self.ratings),
            stats: std::mem::take(&mut self.stats),
            snapshots: std::mem::take(&mut self.snapshots),
        })
    }

    fn reset(&mut self, registry: &Registry) {
        let prior = PlayerSkill::prior(self.updater.prior());
        self.ratings = registry
            .players()
            .keys()
            .map(|name| (name.clone(), prior))
            .collect();
        self.stats = registry
            .players()
            .keys()
            .map(|name| (name.clone(), PlayerStats::default()))
            .collect();
        self.snapshots = SnapshotStore::new();
        self.current = None;
    }

    /// Snapshot the tournament we are moving away from, once its last match is behind us
    ///
    /// A tournament whose matches interleave with another's in time is only
    /// captured at the boundary after its final match.
    fn leave_current_tournament(&mut self, remaining: &HashMap<&str, usize>) -> Result<(), EngineError> {
        let Some(previous) = self.current.take() else {
            return Ok(());
        };

        match remaining.get(previous.as_str()).copied().unwrap_or(0) {
            0 => self.snapshots.capture(&previous, &self.ratings),
            left => {
                debug!("{} resumes later ({} matches left), snapshot deferred", previous, left);
                Ok(())
            }
        }
    }

    fn play_match(&mut self, registry: &Registry, m: &Match) -> Result<(), EngineError> {
        let roster1 = self.checked_roster(registry, m, &m.team1)?;
        let roster2 = self.checked_roster(registry, m, &m.team2)?;

        let mut team1 = self.current_ratings(roster1);
        let mut team2 = self.current_ratings(roster2);

        for _ in 0..m.team1_wins {
            let (winners, losers) = self.updater.rate_game(&team1, &team2);
            team1 = winners;
            team2 = losers;
        }
        for _ in 0..m.team2_wins {
            let (winners, losers) = self.updater.rate_game(&team2, &team1);
            team2 = winners;
            team1 = losers;
        }

        let played = m.games() > 0;
        self.write_back(roster1, team1, played)?;
        self.write_back(roster2, team2, played)?;

        for player in roster1 {
            self.stats.entry(player.clone()).or_default().record(m.team1_wins, m.team2_wins);
        }
        for player in roster2 {
            self.stats.entry(player.clone()).or_default().record(m.team2_wins, m.team1_wins);
        }
        Ok(())
    }

    fn checked_roster<'r>(
        &self,
        registry: &'r Registry,
        m: &Match,
        team: &str,
    ) -> Result<&'r [PlayerName], EngineError> {
        let roster = registry
            .roster(&m.tournament, team)
            .ok_or_else(|| EngineError::UnknownTeam {
                tournament: m.tournament.clone(),
                team: team.to_string(),
            })?;

        if roster.len() != self.team_size {
            return Err(EngineError::RosterSizeMismatch {
                tournament: m.tournament.clone(),
                team: team.to_string(),
                expected: self.team_size,
                actual: roster.len(),
            });
        }
        Ok(roster)
    }

    fn current_ratings(&self, roster: &[PlayerName]) -> Vec<Rating> {
        let prior = self.updater.prior();
        roster
            .iter()
            .map(|player| self.ratings.get(player).map_or(prior, |skill| skill.rating))
            .collect()
    }

    fn write_back(&mut self, roster: &[PlayerName], ratings: Vec<Rating>, played: bool) -> Result<(), EngineError> {
        if ratings.len() != roster.len() {
            return Err(EngineError::UpdaterLengthMismatch {
                expected: roster.len(),
                actual: ratings.len(),
            });
        }

        for (player, rating) in roster.iter().zip(ratings) {
            let skill = self
                .ratings
                .entry(player.clone())
                .or_insert_with(|| PlayerSkill::prior(rating));
            skill.rating = rating;
            skill.has_played |= played;
        }
        Ok(())
    }
}

fn count_matches_per_tournament(matches: &[Match]) -> HashMap<&str, usize> {
    let mut counts = HashMap::new();
    for m in matches {
        *counts.entry(m.tournament.as_str()).or_insert(0) += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::settings::RatingSettings;
    use crate::domain::TIMESTAMP_FORMAT;
    use crate::rating::trueskill::TrueSkill;
    use chrono::DateTime;
    use std::cell::RefCell;

    /// Records every call and nudges the winners up by one
    #[derive(Default)]
    struct RecordingUpdater {
        calls: RefCell<Vec<(Vec<Rating>, Vec<Rating>)>>,
    }

    impl SkillUpdater for RecordingUpdater {
        fn rate_game(&self, winners: &[Rating], losers: &[Rating]) -> (Vec<Rating>, Vec<Rating>) {
            self.calls.borrow_mut().push((winners.to_vec(), losers.to_vec()));
            let bump = |r: &Rating, d: f64| Rating::new(r.mu + d, r.sigma);
            (
                winners.iter().map(|r| bump(r, 1.0)).collect(),
                losers.iter().map(|r| bump(r, -1.0)).collect(),
            )
        }

        fn prior(&self) -> Rating {
            Rating::new(25.0, 8.0)
        }
    }

    fn add_team(registry: &mut Registry, tournament: &str, team: &str, prefix: &str, size: usize) {
        for i in 1..=size {
            registry.add_player(tournament, team, &format!("{prefix}{i}"), None);
        }
    }

    fn build_match(tournament: &str, team1: &str, team2: &str, wins: (u32, u32), time: &str) -> Match {
        Match {
            tournament: tournament.to_string(),
            bracket: "Groups".to_string(),
            team1: team1.to_string(),
            team2: team2.to_string(),
            team1_wins: wins.0,
            team2_wins: wins.1,
            played_at: DateTime::parse_from_str(time, TIMESTAMP_FORMAT).unwrap(),
        }
    }

    fn single_match_registry() -> Registry {
        let mut registry = Registry::new();
        add_team(&mut registry, "T1", "A", "a", 5);
        add_team(&mut registry, "T1", "B", "b", 5);
        registry.add_matches(vec![build_match("T1", "A", "B", (2, 1), "2019-01-01T10:00:00+0000")]);
        registry
    }

    #[test]
    fn test_each_game_is_rated_in_sequence() {
        let registry = single_match_registry();
        let mut engine = RatingEngine::new(RecordingUpdater::default(), 5);

        let outcome = engine.replay(&registry).unwrap();

        let calls = engine.updater().calls.borrow();
        assert_eq!(calls.len(), 3);
        // A wins twice, then B wins once; each call consumes the previous output
        assert_eq!(calls[0].0[0].mu, 25.0);
        assert_eq!(calls[1].0[0].mu, 26.0);
        assert_eq!(calls[1].1[0].mu, 24.0);
        assert_eq!(calls[2].0[0].mu, 23.0);
        assert_eq!(calls[2].1[0].mu, 27.0);

        assert_eq!(outcome.ratings["a1"].rating.mu, 26.0);
        assert_eq!(outcome.ratings["b5"].rating.mu, 24.0);
        for i in 1..=5 {
            assert_eq!(outcome.stats[&format!("a{i}")], PlayerStats { games: 3, wins: 2, losses: 1 });
            assert_eq!(outcome.stats[&format!("b{i}")], PlayerStats { games: 3, wins: 1, losses: 2 });
        }
    }

    #[test]
    fn test_snapshots_taken_at_tournament_boundaries() {
        let mut registry = Registry::new();
        add_team(&mut registry, "T1", "A", "a", 5);
        add_team(&mut registry, "T1", "B", "b", 5);
        add_team(&mut registry, "T2", "A", "a", 5);
        add_team(&mut registry, "T2", "C", "c", 5);
        registry.add_matches(vec![
            build_match("T1", "A", "B", (1, 0), "2019-01-01T10:00:00+0000"),
            build_match("T2", "A", "C", (0, 1), "2019-02-01T10:00:00+0000"),
        ]);
        let mut engine = RatingEngine::new(RecordingUpdater::default(), 5);

        let outcome = engine.replay(&registry).unwrap();

        let t1 = outcome.snapshots.get("T1").unwrap();
        assert_eq!(t1["a1"].rating.mu, 26.0);
        assert!(t1["a1"].has_played);
        assert_eq!(t1["c1"].rating.mu, 25.0);
        assert!(!t1["c1"].has_played);

        let t2 = outcome.snapshots.get("T2").unwrap();
        assert_eq!(t2["a1"].rating.mu, 25.0);
        assert_eq!(t2["c1"].rating.mu, 26.0);
        assert_eq!(t2, &outcome.ratings);
    }

    #[test]
    fn test_interleaved_tournament_snapshot_follows_its_last_match() {
        let mut registry = Registry::new();
        add_team(&mut registry, "T1", "A", "a", 5);
        add_team(&mut registry, "T1", "B", "b", 5);
        add_team(&mut registry, "T2", "C", "c", 5);
        add_team(&mut registry, "T2", "D", "d", 5);
        registry.add_matches(vec![
            build_match("T1", "A", "B", (1, 0), "2019-01-01T10:00:00+0000"),
            build_match("T2", "C", "D", (1, 0), "2019-01-01T11:00:00+0000"),
            build_match("T1", "A", "B", (1, 0), "2019-01-01T12:00:00+0000"),
            build_match("T2", "C", "D", (1, 0), "2019-01-01T13:00:00+0000"),
        ]);
        let mut engine = RatingEngine::new(RecordingUpdater::default(), 5);

        let outcome = engine.replay(&registry).unwrap();

        let t1 = outcome.snapshots.get("T1").unwrap();
        assert_eq!(t1["a1"].rating.mu, 27.0);
        assert_eq!(t1["c1"].rating.mu, 26.0);
        assert_eq!(outcome.snapshots.len(), 2);
    }

    #[test]
    fn test_scoreless_match_does_not_mark_players_as_played() {
        let mut registry = Registry::new();
        add_team(&mut registry, "T1", "A", "a", 5);
        add_team(&mut registry, "T1", "B", "b", 5);
        registry.add_matches(vec![build_match("T1", "A", "B", (0, 0), "2019-01-01T10:00:00+0000")]);
        let mut engine = RatingEngine::new(RecordingUpdater::default(), 5);

        let outcome = engine.replay(&registry).unwrap();

        assert!(engine.updater().calls.borrow().is_empty());
        assert!(!outcome.ratings["a1"].has_played);
        assert_eq!(outcome.stats["a1"], PlayerStats::default());
        let t1 = outcome.snapshots.get("T1").unwrap();
        assert!(!t1["a1"].has_played);
        assert!(!t1["b1"].has_played);
    }

    #[test]
    fn test_roster_size_mismatch_is_fatal() {
        let mut registry = Registry::new();
        add_team(&mut registry, "T1", "A", "a", 5);
        add_team(&mut registry, "T1", "B", "b", 4);
        registry.add_matches(vec![build_match("T1", "A", "B", (1, 0), "2019-01-01T10:00:00+0000")]);
        let mut engine = RatingEngine::new(RecordingUpdater::default(), 5);

        let err = engine.replay(&registry).unwrap_err();

        assert_eq!(
            err,
            EngineError::RosterSizeMismatch {
                tournament: "T1".to_string(),
                team: "B".to_string(),
                expected: 5,
                actual: 4,
            }
        );
        assert!(engine.updater().calls.borrow().is_empty());
    }

    #[test]
    fn test_replay_is_deterministic() {
        let registry = single_match_registry();
        let mut engine = RatingEngine::new(TrueSkill::new(&RatingSettings::default()).unwrap(), 5);

        let first = engine.replay(&registry).unwrap();
        let second = engine.replay(&registry).unwrap();

        assert_eq!(first, second);
        for (name, stats) in &first.stats {
            assert_eq!(stats.games, stats.wins + stats.losses, "{name}");
        }
    }

    #[test]
    fn test_players_without_matches_keep_prior() {
        let mut registry = single_match_registry();
        registry.add_player("T9", "Z", "zed", None);
        let mut engine = RatingEngine::new(RecordingUpdater::default(), 5);

        let outcome = engine.replay(&registry).unwrap();

        assert_eq!(outcome.ratings["zed"], PlayerSkill::prior(Rating::new(25.0, 8.0)));
        assert_eq!(outcome.stats["zed"], PlayerStats::default());
        assert!(outcome.snapshots.get("T9").is_none());
    }
}
