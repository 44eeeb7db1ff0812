use anyhow::{Result, ensure};

use super::gaussian::{v_win, w_win};
use super::types::Rating;
use super::updater::SkillUpdater;
use crate::config::settings::RatingSettings;

/// Two-team TrueSkill update with no draw margin
///
/// For two teams the factor graph collapses to one truncated Gaussian on the
/// difference of team performances, so each game is a closed-form update.
#[derive(Debug, Clone, PartialEq)]
pub struct TrueSkill {
    mu: f64,
    sigma: f64,
    beta: f64,
    tau: f64,
}

impl TrueSkill {
    pub fn new(settings: &RatingSettings) -> Result<Self> {
        ensure!(
            settings.draw_probability == 0.0,
            "draw probability must be 0, got {}",
            settings.draw_probability
        );
        ensure!(settings.initial_sigma > 0.0, "initial sigma must be positive");
        ensure!(settings.beta > 0.0, "beta must be positive");

        Ok(Self {
            mu: settings.initial_mu,
            sigma: settings.initial_sigma,
            beta: settings.beta,
            tau: settings.tau,
        })
    }

    /// Prior variance widened by the per-game dynamics term
    fn widened_variance(&self, rating: &Rating) -> f64 {
        rating.sigma.powi(2) + self.tau.powi(2)
    }

    fn performance_variance(&self, winners: &[Rating], losers: &[Rating]) -> f64 {
        let players = winners.len() + losers.len();
        winners
            .iter()
            .chain(losers)
            .map(|r| self.widened_variance(r))
            .sum::<f64>()
            + players as f64 * self.beta.powi(2)
    }

    fn update(&self, rating: &Rating, direction: f64, c: f64, v: f64, w: f64) -> Rating {
        let variance = self.widened_variance(rating);
        let mu = rating.mu + direction * variance / c * v;
        let shrink = (1.0 - variance / c.powi(2) * w).max(f64::EPSILON);
        Rating::new(mu, (variance * shrink).sqrt())
    }
}

impl SkillUpdater for TrueSkill {
    fn rate_game(&self, winners: &[Rating], losers: &[Rating]) -> (Vec<Rating>, Vec<Rating>) {
        let c = self.performance_variance(winners, losers).sqrt();
        let winner_mu: f64 = winners.iter().map(|r| r.mu).sum();
        let loser_mu: f64 = losers.iter().map(|r| r.mu).sum();
        let t = (winner_mu - loser_mu) / c;
        let (v, w) = (v_win(t), w_win(t));

        let winners = winners.iter().map(|r| self.update(r, 1.0, c, v, w)).collect();
        let losers = losers.iter().map(|r| self.update(r, -1.0, c, v, w)).collect();
        (winners, losers)
    }

    fn prior(&self) -> Rating {
        Rating::new(self.mu, self.sigma)
    }
}
