use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::info;
use rusqlite::Connection;

use crate::config::ReportSettings;
use crate::database::{self, matches, players, ratings, tournaments, DbPlayer};
use crate::domain::Registry;
use crate::rating::ReplayOutcome;

/// Writes a finished replay into a fresh SQLite file
///
/// The database is built under `<path>.tmp` and renamed over the target only
/// once every row is committed, so readers never see a half-written export.
pub struct ExportService {
    db_path: PathBuf,
    report: ReportSettings,
}

impl ExportService {
    pub fn new<P: Into<PathBuf>>(db_path: P, report: ReportSettings) -> Self {
        Self {
            db_path: db_path.into(),
            report,
        }
    }

    pub fn run(&self, registry: &Registry, outcome: &ReplayOutcome) -> Result<()> {
        let temp_db_path = temp_path(&self.db_path);
        info!(
            "Exporting to {} via {}",
            self.db_path.display(),
            temp_db_path.display()
        );

        if temp_db_path.exists() {
            fs::remove_file(&temp_db_path)
                .with_context(|| format!("Failed to remove stale {}", temp_db_path.display()))?;
        }

        self.export_to(&temp_db_path, registry, outcome)?;

        fs::rename(&temp_db_path, &self.db_path)
            .with_context(|| format!("Failed to move export into {}", self.db_path.display()))?;
        info!("Successfully swapped database to {}", self.db_path.display());
        Ok(())
    }

    fn export_to(&self, path: &Path, registry: &Registry, outcome: &ReplayOutcome) -> Result<()> {
        let pool = database::create_pool(&path.to_string_lossy())?;
        let mut conn = database::get_connection(&pool)?;
        database::setup::reset_database(&conn)?;

        let tx = conn.transaction().context("Failed to open export transaction")?;
        self.write(&tx, registry, outcome)?;
        tx.commit().context("Failed to commit export")?;
        Ok(())
    }

    /// Write every table over an open connection; callers own the transaction
    pub fn write(&self, conn: &Connection, registry: &Registry, outcome: &ReplayOutcome) -> Result<()> {
        let player_ids = self.write_players(conn, registry, outcome)?;
        info!("  → Saved {} players", player_ids.len());

        let tournament_ids = write_tournaments(conn, registry, &player_ids)?;
        info!("  → Saved {} tournaments", tournament_ids.len());

        for m in registry.matches() {
            matches::insert_match(conn, tournament_ids[&m.tournament], m)?;
        }
        info!("  → Saved {} matches", registry.match_count());

        let mut saved = 0;
        for (tournament, snapshot) in outcome.snapshots.iter() {
            for (player, skill) in snapshot {
                if let Some(player_id) = player_ids.get(player) {
                    ratings::insert_snapshot_rating(conn, tournament_ids[tournament], *player_id, skill)?;
                    saved += 1;
                }
            }
        }
        info!("  → Saved {} snapshot ratings", saved);
        Ok(())
    }

    fn write_players(
        &self,
        conn: &Connection,
        registry: &Registry,
        outcome: &ReplayOutcome,
    ) -> Result<HashMap<String, i64>> {
        let mut ids = HashMap::new();
        for (name, profile) in registry.players() {
            let skill = outcome
                .ratings
                .get(name)
                .with_context(|| format!("No rating for player {}", name))?;
            let stats = outcome.stats.get(name).copied().unwrap_or_default();
            let row = DbPlayer {
                id: 0,
                name: name.clone(),
                scene: profile.scene.clone(),
                games: stats.games,
                wins: stats.wins,
                losses: stats.losses,
                mu: skill.rating.mu,
                sigma: skill.rating.sigma,
                conservative: skill.rating.conservative(self.report.conservative_k),
            };
            ids.insert(name.clone(), players::insert_player(conn, &row)?);
        }
        Ok(ids)
    }
}

fn write_tournaments(
    conn: &Connection,
    registry: &Registry,
    player_ids: &HashMap<String, i64>,
) -> Result<HashMap<String, i64>> {
    let mut ids = HashMap::new();
    for tournament in registry.tournaments_by_date() {
        let tournament_id = tournaments::insert_tournament(conn, &tournament.id, tournament.date)?;
        for (team, roster) in registry.teams(&tournament.id) {
            for (position, player) in roster.iter().enumerate() {
                let player_id = player_ids
                    .get(player)
                    .with_context(|| format!("Roster entry {} has no player row", player))?;
                tournaments::insert_team_member(conn, tournament_id, team, position, *player_id)?;
            }
        }
        ids.insert(tournament.id.clone(), tournament_id);
    }
    Ok(ids)
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}
