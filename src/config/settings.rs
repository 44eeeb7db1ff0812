use std::path::PathBuf;

/// Prior and model parameters for the team skill update
#[derive(Debug, Clone, PartialEq)]
pub struct RatingSettings {
    pub initial_mu: f64,
    pub initial_sigma: f64,
    pub beta: f64,
    pub tau: f64,
    pub draw_probability: f64,
    pub team_size: usize,
}

impl Default for RatingSettings {
    fn default() -> Self {
        let initial_sigma = 25.0 / 3.0;
        Self {
            initial_mu: 25.0,
            initial_sigma,
            beta: initial_sigma / 2.0,
            tau: initial_sigma / 100.0,
            draw_probability: 0.0,
            team_size: 5,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportSettings {
    /// Multiplier k in `mu - k * sigma`
    pub conservative_k: f64,
    pub win_ratio_precision: usize,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            conservative_k: 3.0,
            win_ratio_precision: 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PathSettings {
    pub output_path: PathBuf,
    pub cache_dir: PathBuf,
    pub datasets_dir: PathBuf,
}

impl Default for PathSettings {
    fn default() -> Self {
        Self {
            output_path: env_path("KQ_OUTPUT_PATH", "PlayerSkill.csv"),
            cache_dir: env_path("KQ_CACHE_DIR", "cache"),
            datasets_dir: env_path("KQ_DATASETS_DIR", "datasets"),
        }
    }
}

fn env_path(key: &str, default: &str) -> PathBuf {
    std::env::var(key)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(default))
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub rating: RatingSettings,
    pub report: ReportSettings,
    pub paths: PathSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self {
            rating: RatingSettings::default(),
            report: ReportSettings::default(),
            paths: PathSettings::default(),
        }
    }
}
