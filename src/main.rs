use std::path::PathBuf;

use clap::Parser;
use focusboard::cli::commands::Cli;
use focusboard::io::config_io::{DEFAULT_CONFIG_FILE, read_config, resolve_data_file};
use tracing_appender::non_blocking::WorkerGuard;

/// Environment variable holding the log filter; logging is off when unset
const LOG_ENV: &str = "FOCUSBOARD_LOG";
const LOG_FILE: &str = "focusboard.log";

/// Send tracing output to a file so it never lands on the TUI frame.
fn init_logging() -> Option<WorkerGuard> {
    std::env::var_os(LOG_ENV)?;
    let file_appender = tracing_appender::rolling::never(".", LOG_FILE);
    let (writer, guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_env(LOG_ENV))
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .ok()?;
    Some(guard)
}

fn main() {
    let cli = Cli::parse();
    let _log_guard = init_logging();

    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
    let config = match read_config(&config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    };

    let data_path = resolve_data_file(cli.file.as_deref(), &config);
    tracing::info!(data = %data_path.display(), config = %config_path.display(), "starting");

    if let Err(e) = focusboard::tui::run(&data_path, &config) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
