use anyhow::{Context, Result};
use log::info;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::rating::RatingMap;

const RATINGS_KEY: &str = "ratings";

/// File-based store of the last run's results, used to diff consecutive runs
pub struct RunCache {
    cache_dir: PathBuf,
}

impl RunCache {
    /// Create a new cache instance
    pub fn new<P: AsRef<Path>>(cache_dir: P) -> Result<Self> {
        let cache_dir = cache_dir.as_ref().to_path_buf();

        fs::create_dir_all(&cache_dir).context("Failed to create cache directory")?;

        Ok(Self { cache_dir })
    }

    pub fn save_ratings(&self, ratings: &RatingMap) -> Result<()> {
        self.save(RATINGS_KEY, ratings)
    }

    pub fn load_ratings(&self) -> Result<Option<RatingMap>> {
        self.load(RATINGS_KEY)
    }

    /// Check if cached data exists
    pub fn exists(&self, key: &str) -> bool {
        self.build_path(key).exists()
    }

    /// Clear all cached data
    pub fn clear(&self) -> Result<()> {
        fs::remove_dir_all(&self.cache_dir).context("Failed to clear cache")?;

        fs::create_dir_all(&self.cache_dir).context("Failed to recreate cache directory")?;

        info!("Cleared cache directory");
        Ok(())
    }

    fn save<T: Serialize>(&self, key: &str, data: &T) -> Result<()> {
        let file_path = self.build_path(key);
        let json = serde_json::to_string_pretty(data).context("Failed to serialize data")?;
        fs::write(&file_path, json).context("Failed to write cache file")?;

        info!("Saved {} to cache: {}", key, file_path.display());
        Ok(())
    }

    fn load<T: for<'de> Deserialize<'de>>(&self, key: &str) -> Result<Option<T>> {
        let file_path = self.build_path(key);
        if !file_path.exists() {
            return Ok(None);
        }

        let json = fs::read_to_string(&file_path).context("Failed to read cache file")?;
        let data = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse JSON from {}", file_path.display()))?;

        info!("Loaded {} from cache: {}", key, file_path.display());
        Ok(Some(data))
    }

    fn build_path(&self, key: &str) -> PathBuf {
        self.cache_dir.join(format!("{}.json", key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rating::{PlayerSkill, Rating};

    #[test]
    fn test_ratings_round_trip_through_cache() {
        let temp_dir = std::env::temp_dir().join("kq_skill_test_cache");
        let cache = RunCache::new(&temp_dir).unwrap();
        assert_eq!(cache.load_ratings().unwrap(), None);

        let mut ratings = RatingMap::new();
        ratings.insert(
            "ann".to_string(),
            PlayerSkill {
                rating: Rating::new(27.25, 6.5),
                has_played: true,
            },
        );
        cache.save_ratings(&ratings).unwrap();

        assert!(cache.exists("ratings"));
        assert_eq!(cache.load_ratings().unwrap(), Some(ratings));

        // Cleanup
        cache.clear().unwrap();
        assert!(!cache.exists("ratings"));
    }
}
