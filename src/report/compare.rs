use crate::rating::RatingMap;

#[derive(Debug, Clone, PartialEq)]
pub struct RatingDelta {
    pub player: String,
    pub mu: f64,
    pub sigma: f64,
}

/// Differences between the previous run's final ratings and this run's
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RatingComparison {
    pub new_players: Vec<String>,
    pub removed_players: Vec<String>,
    pub changed: Vec<RatingDelta>,
}

impl RatingComparison {
    pub fn between(previous: &RatingMap, current: &RatingMap) -> Self {
        let mut comparison = Self::default();

        for (player, old) in previous {
            match current.get(player) {
                Some(new) if new.rating != old.rating => comparison.changed.push(RatingDelta {
                    player: player.clone(),
                    mu: new.rating.mu - old.rating.mu,
                    sigma: new.rating.sigma - old.rating.sigma,
                }),
                Some(_) => {}
                None => comparison.removed_players.push(player.clone()),
            }
        }

        comparison.new_players = current
            .keys()
            .filter(|player| !previous.contains_key(*player))
            .cloned()
            .collect();
        comparison
    }

    pub fn is_unchanged(&self) -> bool {
        self.new_players.is_empty() && self.removed_players.is_empty() && self.changed.is_empty()
    }
}
