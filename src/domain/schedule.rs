use super::models::Match;

/// All ingested matches, kept in global timestamp order
///
/// Every insertion re-sorts the whole list (stable), so datasets can be
/// ingested in any order and still replay in true historical order.
#[derive(Debug, Clone, Default)]
pub struct MatchSchedule {
    matches: Vec<Match>,
}

impl MatchSchedule {
    pub fn new() -> Self {
        Self {
            matches: Vec::new(),
        }
    }

    pub fn extend<I: IntoIterator<Item = Match>>(&mut self, matches: I) {
        self.matches.extend(matches);
        self.matches.sort_by_key(|m| m.played_at);
    }

    pub fn as_slice(&self) -> &[Match] {
        &self.matches
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }
}
