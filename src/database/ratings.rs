use anyhow::{Context, Result};
use rusqlite::{params, Connection};

use super::models::DbSnapshotRating;
use crate::rating::PlayerSkill;

pub fn insert_snapshot_rating(
    conn: &Connection,
    tournament_id: i64,
    player_id: i64,
    skill: &PlayerSkill,
) -> Result<()> {
    let sql = "INSERT INTO snapshot_ratings (tournament_id, player_id, mu, sigma, has_played) VALUES (?1, ?2, ?3, ?4, ?5)";

    conn.execute(
        sql,
        params![tournament_id, player_id, skill.rating.mu, skill.rating.sigma, skill.has_played],
    )
    .context("Failed to insert snapshot rating")
    .map(|_| ())
}

fn parse_snapshot_row(row: &rusqlite::Row) -> rusqlite::Result<DbSnapshotRating> {
    Ok(DbSnapshotRating {
        tournament: row.get(0)?,
        player: row.get(1)?,
        mu: row.get(2)?,
        sigma: row.get(3)?,
        has_played: row.get(4)?,
    })
}

/// A player's rating at the end of each tournament, oldest first
pub fn history_for_player(conn: &Connection, player: &str) -> Result<Vec<DbSnapshotRating>> {
    let sql = "SELECT t.name, p.name, s.mu, s.sigma, s.has_played FROM snapshot_ratings s JOIN tournaments t ON t.id = s.tournament_id JOIN players p ON p.id = s.player_id WHERE p.name = ?1 ORDER BY t.date, t.name";

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map(params![player], parse_snapshot_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}
