pub mod models;
mod registry;
mod schedule;

pub use models::*;
pub use registry::Registry;
pub use schedule::MatchSchedule;
