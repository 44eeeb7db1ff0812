pub mod datasets;
pub mod settings;

pub use datasets::{get_datasets, load_manifest, DatasetConfig};
pub use settings::{AppConfig, PathSettings, RatingSettings, ReportSettings};
