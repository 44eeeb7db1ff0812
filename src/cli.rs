use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

#[derive(Parser, Debug)]
#[command(author, version, about = "Team tournament skill ratings")]
pub struct Cli {
    /// Command
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
#[clap(rename_all = "lower_case")]
pub enum Command {
    /// Replay every dataset and write the player skill report
    Rate {
        /// JSON manifest of roster/results pairs (defaults to the approved datasets)
        #[arg(short, long)]
        manifest: Option<PathBuf>,
        /// Report path (overrides KQ_OUTPUT_PATH)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Also export the run into this SQLite file
        #[arg(short, long)]
        database: Option<PathBuf>,
        /// Cache directory holding the previous run (overrides KQ_CACHE_DIR)
        #[arg(long)]
        cache_dir: Option<PathBuf>,
    },
    /// Ingest a single roster/results pair and report problems without rating
    Check {
        roster: PathBuf,
        matches: PathBuf,
    },
    /// List known tournaments grouped by year
    Tournaments {
        #[arg(short, long)]
        manifest: Option<PathBuf>,
    },
    /// Print a shell completion script
    Completions {
        shell: Shell,
    },
}
