use anyhow::{Context, Result};
use chrono::NaiveDate;
use rusqlite::{params, Connection};

use super::models::DbTournament;

pub fn insert_tournament(conn: &Connection, name: &str, date: Option<NaiveDate>) -> Result<i64> {
    let sql = "INSERT INTO tournaments (name, date) VALUES (?1, ?2) RETURNING id";

    conn.query_row(sql, params![name, date], |row| row.get(0))
        .with_context(|| format!("Failed to insert tournament {}", name))
}

pub fn insert_team_member(
    conn: &Connection,
    tournament_id: i64,
    team: &str,
    position: usize,
    player_id: i64,
) -> Result<()> {
    let sql = "INSERT INTO team_members (tournament_id, team, position, player_id) VALUES (?1, ?2, ?3, ?4)";

    conn.execute(sql, params![tournament_id, team, position as i64, player_id])
        .with_context(|| format!("Failed to insert member {} of team {}", position, team))
        .map(|_| ())
}

fn parse_tournament_row(row: &rusqlite::Row) -> rusqlite::Result<DbTournament> {
    Ok(DbTournament {
        id: row.get(0)?,
        name: row.get(1)?,
        date: row.get(2)?,
    })
}

pub fn list_by_date(conn: &Connection) -> Result<Vec<DbTournament>> {
    let sql = "SELECT id, name, date FROM tournaments ORDER BY date IS NULL, date, name";

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map([], parse_tournament_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

pub fn roster(conn: &Connection, tournament: &str, team: &str) -> Result<Vec<String>> {
    let sql = "SELECT p.name FROM team_members m JOIN tournaments t ON t.id = m.tournament_id JOIN players p ON p.id = m.player_id WHERE t.name = ?1 AND m.team = ?2 ORDER BY m.position";

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map(params![tournament, team], |row| row.get(0))?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}
