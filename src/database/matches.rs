use anyhow::{Context, Result};
use rusqlite::{params, Connection};

use crate::domain::Match;

pub fn insert_match(conn: &Connection, tournament_id: i64, m: &Match) -> Result<i64> {
    let sql = "INSERT INTO matches (tournament_id, bracket, team1, team2, team1_wins, team2_wins, played_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7) RETURNING id";

    conn.query_row(
        sql,
        params![
            tournament_id,
            m.bracket,
            m.team1,
            m.team2,
            m.team1_wins,
            m.team2_wins,
            m.played_at
        ],
        |row| row.get(0),
    )
    .with_context(|| format!("Failed to insert match {} vs {} in {}", m.team1, m.team2, m.tournament))
}

pub fn count(conn: &Connection) -> Result<usize> {
    let total: i64 = conn
        .query_row("SELECT COUNT(*) FROM matches", [], |row| row.get(0))
        .context("Failed to count matches")?;
    Ok(total as usize)
}
