use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};

use super::models::DbPlayer;

pub fn insert_player(conn: &Connection, player: &DbPlayer) -> Result<i64> {
    let sql = "INSERT INTO players (name, scene, games, wins, losses, mu, sigma, conservative) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8) RETURNING id";

    conn.query_row(
        sql,
        params![
            player.name,
            player.scene,
            player.games,
            player.wins,
            player.losses,
            player.mu,
            player.sigma,
            player.conservative
        ],
        |row| row.get(0),
    )
    .with_context(|| format!("Failed to insert player {}", player.name))
}

fn parse_player_row(row: &rusqlite::Row) -> rusqlite::Result<DbPlayer> {
    Ok(DbPlayer {
        id: row.get(0)?,
        name: row.get(1)?,
        scene: row.get(2)?,
        games: row.get(3)?,
        wins: row.get(4)?,
        losses: row.get(5)?,
        mu: row.get(6)?,
        sigma: row.get(7)?,
        conservative: row.get(8)?,
    })
}

pub fn find_by_name(conn: &Connection, name: &str) -> Result<Option<DbPlayer>> {
    let sql = "SELECT id, name, scene, games, wins, losses, mu, sigma, conservative FROM players WHERE name = ?1";

    conn.query_row(sql, params![name], parse_player_row)
        .optional()
        .context("Failed to query player by name")
}

/// Players ranked by conservative skill, best first
pub fn list_ranked(conn: &Connection) -> Result<Vec<DbPlayer>> {
    let sql = "SELECT id, name, scene, games, wins, losses, mu, sigma, conservative FROM players ORDER BY conservative DESC, name";

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map([], parse_player_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}
