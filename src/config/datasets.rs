use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// A roster file and the match-result file that references it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetConfig {
    pub roster: PathBuf,
    pub matches: PathBuf,
}

impl DatasetConfig {
    pub fn new<P: Into<PathBuf>, Q: Into<PathBuf>>(roster: P, matches: Q) -> Self {
        Self {
            roster: roster.into(),
            matches: matches.into(),
        }
    }

    fn under(dir: &Path, roster: &str, matches: &str) -> Self {
        Self::new(dir.join(roster), dir.join(matches))
    }
}

/// Get the approved datasets, relative to the datasets directory
///
/// Order here does not affect the ratings: matches are replayed by timestamp.
pub fn get_datasets(dir: &Path) -> Vec<DatasetConfig> {
    vec![
        DatasetConfig::under(dir, "2019 KQ - 2019 Players.csv", "2019 KQ - 2019 game results.csv"),
        DatasetConfig::under(dir, "2018 KQ - GDC3 Players.csv", "2018 KQ - GDC3 game results.csv"),
        DatasetConfig::under(dir, "2018 KQ - BB3 Players.csv", "2018 KQ - BB3 game results.csv"),
        DatasetConfig::under(dir, "2018 KQ - HH1 Players.csv", "2018 KQ - HH1 game results.csv"),
        DatasetConfig::under(dir, "2018 - CC1 Players.csv", "2018 - CC1 game results.csv"),
        DatasetConfig::under(dir, "2019 - CC2 Players.csv", "2019 - CC2 game results.csv"),
        DatasetConfig::under(dir, "2020 - CC3 Players.csv", "2020 - CC3 game results.csv"),
        DatasetConfig::under(dir, "2018 Midwest players.csv", "2018 Midwest game results.csv"),
        DatasetConfig::under(dir, "Coronation players.csv", "2017 Coronation game results.csv"),
        DatasetConfig::under(dir, "2019 misc players.csv", "2019 misc game results.csv"),
    ]
}

/// Load a JSON manifest: `[{"roster": "...", "matches": "..."}, ...]`
///
/// Relative paths are resolved against the manifest's own directory.
pub fn load_manifest<P: AsRef<Path>>(path: P) -> Result<Vec<DatasetConfig>> {
    let path = path.as_ref();
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read manifest {}", path.display()))?;
    let datasets: Vec<DatasetConfig> = serde_json::from_str(&json)
        .with_context(|| format!("Failed to parse manifest {}", path.display()))?;

    let base = path.parent().unwrap_or_else(|| Path::new(""));
    Ok(datasets
        .into_iter()
        .map(|d| DatasetConfig::new(resolve(base, &d.roster), resolve(base, &d.matches)))
        .collect())
}

fn resolve(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manifest_paths_resolve_against_manifest_dir() {
        let dir = std::env::temp_dir().join("kq_manifest_test");
        fs::create_dir_all(&dir).unwrap();
        let manifest = dir.join("datasets.json");
        fs::write(
            &manifest,
            r#"[{"roster": "a players.csv", "matches": "/abs/a results.csv"}]"#,
        )
        .unwrap();

        let datasets = load_manifest(&manifest).unwrap();

        assert_eq!(datasets.len(), 1);
        assert_eq!(datasets[0].roster, dir.join("a players.csv"));
        assert_eq!(datasets[0].matches, PathBuf::from("/abs/a results.csv"));

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_builtin_datasets_live_under_given_dir() {
        let datasets = get_datasets(Path::new("data"));

        assert_eq!(datasets.len(), 10);
        assert!(datasets.iter().all(|d| d.roster.starts_with("data")));
    }
}
