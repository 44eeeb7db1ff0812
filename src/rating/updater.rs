use super::types::Rating;

/// Rates a single decided game between two teams
///
/// Returns the updated winners and losers in the order they were given,
/// one rating per input rating. Implementations must be deterministic: the
/// engine's replay relies on identical input giving identical output.
pub trait SkillUpdater {
    fn rate_game(&self, winners: &[Rating], losers: &[Rating]) -> (Vec<Rating>, Vec<Rating>);

    /// Rating given to every player before the replay starts
    fn prior(&self) -> Rating;
}
