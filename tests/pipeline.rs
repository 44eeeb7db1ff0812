use std::fs;
use std::path::{Path, PathBuf};

use kq_skill_ratings::config::{AppConfig, DatasetConfig};
use kq_skill_ratings::database::{players, ratings};
use kq_skill_ratings::errors::{IngestError, IntegrityKind};
use kq_skill_ratings::services::processing::ProcessingService;
use rusqlite::Connection;

const HEADER_ROSTER: &str = "Tournament,Team,Player,Scene\n";
const HEADER_MATCHES: &str = "Tournament,Bracket,Team 1,Team 2,Team 1 Wins,Team 2 Wins,Time\n";

fn workspace(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("kq_pipeline_{}", name));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn roster(tournament: &str, teams: &[(&str, &str)]) -> String {
    let mut csv = HEADER_ROSTER.to_string();
    for (team, prefix) in teams {
        for n in 1..=5 {
            csv.push_str(&format!("{},{},{}{},Chicago\n", tournament, team, prefix, n));
        }
    }
    csv
}

fn write_dataset(dir: &Path, name: &str, roster_csv: &str, matches_csv: &str) -> DatasetConfig {
    let roster_path = dir.join(format!("{} players.csv", name));
    let matches_path = dir.join(format!("{} results.csv", name));
    fs::write(&roster_path, roster_csv).unwrap();
    fs::write(&matches_path, format!("{}{}", HEADER_MATCHES, matches_csv)).unwrap();
    DatasetConfig::new(roster_path, matches_path)
}

/// Two tournaments sharing the "a" players, the later one listed first
fn datasets(dir: &Path) -> Vec<DatasetConfig> {
    let late = write_dataset(
        dir,
        "BB3",
        &roster("BB3", &[("Queens", "a"), ("Drones", "c")]),
        "BB3,Finals,Queens,Drones,1,2,2018-09-02T15:00:00-0500\n\
         BB3,Groups,Drones,Queens,0,1,2018-09-01T11:00:00-0500\n",
    );
    let early = write_dataset(
        dir,
        "CC1",
        &roster("CC1", &[("Queens", "a"), ("Berries", "b")]),
        "CC1,Groups,Queens,Berries,2,1,2018-02-10T12:00:00-0600\n\
         CC1,Finals,Berries,Queens,2,0,2018-02-11T18:30:00-0600\n",
    );
    vec![late, early]
}

fn config(dir: &Path) -> AppConfig {
    let mut config = AppConfig::new();
    config.paths.output_path = dir.join("PlayerSkill.csv");
    config.paths.cache_dir = dir.join("cache");
    config
}

#[test]
fn test_full_run_writes_report_and_counts_games() {
    let dir = workspace("full_run");
    let service = ProcessingService::new(config(&dir)).unwrap();

    let result = service.run(&datasets(&dir)).unwrap();

    for stats in result.outcome.stats.values() {
        assert_eq!(stats.games, stats.wins + stats.losses);
    }
    // a-players: CC1 2-1 then 0-2, BB3 1-0 then 1-2
    let a1 = result.outcome.stats["a1"];
    assert_eq!((a1.games, a1.wins, a1.losses), (9, 4, 5));
    assert_eq!(result.outcome.snapshots.len(), 2);
    assert!(result.comparison.is_none());

    let report = fs::read_to_string(dir.join("PlayerSkill.csv")).unwrap();
    let header = report.lines().next().unwrap();
    assert_eq!(
        header,
        "Player Name,scene,conservative-skill,tourneys,games,wins,losses,win%,CC1,BB3,CC1,BB3"
    );
    assert_eq!(report.lines().count(), 16);
    let a1_row = report.lines().find(|l| l.starts_with("a1,")).unwrap();
    assert!(a1_row.contains(",2,9,4,5,0.44,CC1 / Queens,BB3 / Queens,"));

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_second_run_is_unchanged() {
    let dir = workspace("rerun");
    let service = ProcessingService::new(config(&dir)).unwrap();
    let datasets = datasets(&dir);

    let first = service.run(&datasets).unwrap();
    let second = service.run(&datasets).unwrap();

    assert_eq!(first.outcome, second.outcome);
    assert!(second.comparison.unwrap().is_unchanged());

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_dataset_order_does_not_change_ratings() {
    let dir = workspace("order");
    let service = ProcessingService::new(config(&dir)).unwrap();
    let forward = datasets(&dir);
    let reversed: Vec<_> = forward.iter().rev().cloned().collect();

    let a = service.replay(&ProcessingService::load_registry(&forward).unwrap()).unwrap();
    let b = service.replay(&ProcessingService::load_registry(&reversed).unwrap()).unwrap();

    assert_eq!(a.ratings, b.ratings);
    assert_eq!(a.snapshots, b.snapshots);

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_unknown_team_fails_with_every_problem() {
    let dir = workspace("unknown_team");
    let broken = write_dataset(
        &dir,
        "HH1",
        &roster("HH1", &[("Queens", "a"), ("Drones", "c")]),
        "HH1,Groups,Queens,Ghosts,1,0,2018-05-01T10:00:00-0500\n\
         HH1,Groups,Drones,Queens,1,0,2018-05-01T11:00:00-0500\n\
         HH1,Finals,Phantoms,Drones,1,0,2018-05-01T12:00:00-0500\n",
    );

    let err = ProcessingService::load_registry(&[broken]).unwrap_err();

    match err.downcast_ref::<IngestError>() {
        Some(IngestError::ReferentialIntegrity { problems, .. }) => {
            let teams: Vec<_> = problems
                .iter()
                .map(|p| match &p.kind {
                    IntegrityKind::UnknownTeam { team, .. } => team.as_str(),
                    IntegrityKind::UnknownTournament { .. } => "",
                })
                .collect();
            assert_eq!(teams, vec!["Ghosts", "Phantoms"]);
            assert!(problems.iter().all(|p| p.tournament == "HH1"));
        }
        other => panic!("unexpected error: {:?}", other),
    }

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_database_export_matches_run() {
    let dir = workspace("export");
    let db_path = dir.join("ratings.db");
    let service = ProcessingService::new(config(&dir))
        .unwrap()
        .with_database(&db_path);

    let result = service.run(&datasets(&dir)).unwrap();

    let conn = Connection::open(&db_path).unwrap();
    let ranked = players::list_ranked(&conn).unwrap();
    assert_eq!(ranked.len(), result.registry.players().len());
    let b1 = players::find_by_name(&conn, "b1").unwrap().unwrap();
    assert_eq!(b1.mu, result.outcome.ratings["b1"].rating.mu);

    // c-players only join in BB3, so their CC1 snapshot is still the prior
    let history = ratings::history_for_player(&conn, "c1").unwrap();
    assert_eq!(history.len(), 2);
    assert!(!history[0].has_played);
    assert!(history[1].has_played);

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_loading_registry_leaves_cache_untouched() {
    let dir = workspace("listing");
    let datasets = datasets(&dir);

    let registry = ProcessingService::load_registry(&datasets).unwrap();

    assert_eq!(registry.tournaments().len(), 2);
    assert!(!config(&dir).paths.cache_dir.exists());
    assert!(!config(&dir).paths.output_path.exists());

    fs::remove_dir_all(&dir).unwrap();
}
