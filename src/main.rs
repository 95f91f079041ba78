mod cli;
mod config;

use anyhow::{Context, Result};
use clap::Parser;

use istiqamah::{SqliteStore, SystemClock, Tracker};

use cli::args::{Cli, Commands};
use cli::handlers;
use config::AppConfig;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load().context("Loading config")?;

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.logging.level.as_str()),
    )
    .init();

    let db_path = config.db_path()?;
    let store = SqliteStore::open(&db_path)
        .with_context(|| format!("Opening database at {:?}", db_path))?;
    let mut tracker = Tracker::load(store, SystemClock).context("Loading saved data")?;

    let outcome = match &cli.command {
        Some(Commands::Habit { action }) => handlers::handle_habit(&mut tracker, action),
        Some(Commands::Prayer { action }) => handlers::handle_prayer(&mut tracker, action),
        Some(Commands::Task { action }) => handlers::handle_task(&mut tracker, action),
        Some(Commands::Finance { action }) => handlers::handle_finance(&mut tracker, action),
        Some(Commands::Learn { action }) => handlers::handle_learn(&mut tracker, action),
        Some(Commands::Settings { action }) => handlers::handle_settings(&mut tracker, action),
        Some(Commands::Stats) => handlers::handle_stats(&tracker),
        // No subcommand → today's overview
        None => handlers::handle_dashboard(&tracker),
    };

    tracker.close();
    outcome
}
