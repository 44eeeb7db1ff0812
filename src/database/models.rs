use chrono::NaiveDate;

/// Player row as exported: final rating plus counters
#[derive(Debug, Clone, PartialEq)]
pub struct DbPlayer {
    pub id: i64,
    pub name: String,
    pub scene: Option<String>,
    pub games: u32,
    pub wins: u32,
    pub losses: u32,
    pub mu: f64,
    pub sigma: f64,
    pub conservative: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DbTournament {
    pub id: i64,
    pub name: String,
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DbSnapshotRating {
    pub tournament: String,
    pub player: String,
    pub mu: f64,
    pub sigma: f64,
    pub has_played: bool,
}
