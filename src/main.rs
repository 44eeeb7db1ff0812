use anyhow::Result;

use kq_skill_ratings::cli::Command;
use kq_skill_ratings::{handle_check, handle_completions, handle_rate, handle_tournaments, interpret};

fn main() {
    setup_logging();
    parse_and_execute().unwrap_or_else(|e| {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    });
}

fn setup_logging() {
    sensible_env_logger::init!();
}

fn parse_and_execute() -> Result<()> {
    let command = interpret();
    execute_command(&command)
}

fn execute_command(command: &Command) -> Result<()> {
    match command {
        Command::Rate {
            manifest,
            output,
            database,
            cache_dir,
        } => handle_rate(
            manifest.as_deref(),
            output.as_deref(),
            database.as_deref(),
            cache_dir.as_deref(),
        ),
        Command::Check { roster, matches } => handle_check(roster, matches),
        Command::Tournaments { manifest } => handle_tournaments(manifest.as_deref()),
        Command::Completions { shell } => handle_completions(*shell),
    }
}
