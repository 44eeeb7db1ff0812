use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::PlayerName;

/// Belief about a player's skill: mean and standard deviation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    pub mu: f64,
    pub sigma: f64,
}

impl Rating {
    pub fn new(mu: f64, sigma: f64) -> Self {
        Self { mu, sigma }
    }

    /// Lower confidence bound `mu - k * sigma`
    pub fn conservative(&self, k: f64) -> f64 {
        self.mu - k * self.sigma
    }
}

/// Live rating of one player, plus whether any rated game touched it yet
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerSkill {
    pub rating: Rating,
    pub has_played: bool,
}

impl PlayerSkill {
    pub fn prior(rating: Rating) -> Self {
        Self {
            rating,
            has_played: false,
        }
    }
}

pub type RatingMap = BTreeMap<PlayerName, PlayerSkill>;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlayerStats {
    pub games: u32,
    pub wins: u32,
    pub losses: u32,
}

impl PlayerStats {
    pub fn record(&mut self, wins: u32, losses: u32) {
        self.games = self.games.saturating_add(wins.saturating_add(losses));
        self.wins = self.wins.saturating_add(wins);
        self.losses = self.losses.saturating_add(losses);
    }

    /// `wins / games`, undefined for a player who never played
    pub fn win_ratio(&self) -> Option<f64> {
        if self.games == 0 {
            None
        } else {
            Some(f64::from(self.wins) / f64::from(self.games))
        }
    }
}

pub type StatsMap = BTreeMap<PlayerName, PlayerStats>;
