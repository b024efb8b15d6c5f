mod commands;
mod report;

use std::{
    fs::{self, OpenOptions},
    path::Path,
    sync::Mutex,
};

use anyhow::{Context, Result};
use clap::Parser;
use staffing_core::{
    config::{self, AppConfig},
    source, PlanningStore,
};
use tracing_subscriber::{prelude::*, EnvFilter};

use commands::{Cli, CliCommand};

const LOG_FILE: &str = "staffing.log";

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = config::ensure_default_config()?;
    let config = AppConfig::load()?;
    init_logging(&config.log_dir, cli.verbose)?;
    tracing::debug!(path = %config_path.display(), ?config, "configuration loaded");

    let store = PlanningStore::new(source::from_config(&config));
    store
        .load_all()
        .await
        .context("failed to load planning data")?;

    match cli.command.unwrap_or(CliCommand::Summary) {
        CliCommand::Summary => report::print_summary(&store),
        CliCommand::Json => {
            let snapshot = serde_json::to_string_pretty(&store.snapshot())
                .context("failed to serialise planning state")?;
            println!("{snapshot}");
        }
        CliCommand::Search { terms } => report::print_matches(&store, &terms.join(" ")),
        mutation => {
            let command = mutation
                .into_store_command()
                .context("command does not modify the plan")?;
            let changes = store.apply(command)?;
            report::print_changes(&changes);
            report::print_summary(&store);
        }
    }

    Ok(())
}

/// Log to stderr and append to `log_dir/staffing.log`.
///
/// `RUST_LOG` wins; otherwise warnings only, or debug output with `verbose`.
fn init_logging(log_dir: &Path, verbose: bool) -> Result<()> {
    fs::create_dir_all(log_dir)
        .with_context(|| format!("failed to create log directory {}", log_dir.display()))?;
    let log_path = log_dir.join(LOG_FILE);
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("failed to open log file {}", log_path.display()))?;

    let fallback = if verbose { "debug" } else { "warn" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .without_time()
        .compact()
        .with_writer(std::io::stderr);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .with_writer(Mutex::new(log_file));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .context("failed to install log subscriber")
}
