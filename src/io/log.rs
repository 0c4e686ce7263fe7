use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Environment variable overriding the configured log filter
pub const LOG_ENV: &str = "GANTT_LOG";

fn filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| {
        EnvFilter::try_new(default_level).unwrap_or_else(|_| EnvFilter::new("info"))
    })
}

/// Path of the log file inside a state directory
pub fn log_path(state_dir: &Path) -> PathBuf {
    state_dir.join("gantt.log")
}

/// Send tracing output to a log file; the terminal belongs to the TUI.
/// Logging is skipped silently if the file cannot be opened.
pub fn init_file_logging(state_dir: &Path, default_level: &str) {
    let path = log_path(state_dir);
    let file = fs::create_dir_all(state_dir)
        .and_then(|_| OpenOptions::new().create(true).append(true).open(&path));
    let Ok(file) = file else {
        return;
    };
    let _ = tracing_subscriber::registry()
        .with(filter(default_level))
        .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
        .try_init();
}

/// Send tracing output to stderr (CLI subcommands)
pub fn init_stderr_logging(default_level: &str) {
    let _ = tracing_subscriber::registry()
        .with(filter(default_level))
        .with(fmt::layer().compact().with_writer(std::io::stderr))
        .try_init();
}
