//! Logging setup
//!
//! `LVAULT_LOG` sets the filter (e.g. `debug`, `lvault_core=trace`).
//! Commands log to stderr at `warn` by default. The TUI owns the terminal,
//! so it logs to a file and only when `LVAULT_LOG` is set.

use std::fs::File;

use lvault_core::Config;
use tracing::info;
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "LVAULT_LOG";

/// Initialize stderr logging for one-shot commands
pub fn init_cli_logging() {
    let env_filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

    // Ignore error if already initialized
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Initialize file logging for the TUI
///
/// Logs to `config.log_file` or `{data_dir}/debug.log`.
pub fn init_tui_logging(config: &Config) {
    let Ok(log_level) = std::env::var(LOG_ENV) else {
        return;
    };

    let log_path = config.log_path();

    let log_file = match File::create(&log_path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Warning: Could not create log file {:?}: {}", log_path, e);
            return;
        }
    };

    let env_filter = EnvFilter::new(tui_filter(&log_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(log_file)
        .try_init();

    info!("TUI logging initialized to {:?}", log_path);
}

/// A bare level applies to both crates; anything else is used as given
fn tui_filter(log_level: &str) -> String {
    let level = log_level.trim();
    if level.contains('=') || level.contains(',') {
        level.to_string()
    } else {
        format!("lvault_core={},lvault={}", level, level)
    }
}
