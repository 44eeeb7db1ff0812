pub mod engine;
pub mod gaussian;
pub mod snapshots;
pub mod trueskill;
pub mod types;
pub mod updater;

pub use engine::{RatingEngine, ReplayOutcome};
pub use snapshots::SnapshotStore;
pub use trueskill::TrueSkill;
pub use types::{PlayerSkill, PlayerStats, Rating, RatingMap, StatsMap};
pub use updater::SkillUpdater;
