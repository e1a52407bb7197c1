//! Logging setup
//!
//! Console output goes through `tracing-subscriber`; a copy of every event is
//! appended to a log file through a non-blocking `tracing-appender` writer.
//! `RUST_LOG` overrides the level chosen on the command line.

use std::path::{Path, PathBuf};
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Log file name kept for compatibility with older installations.
pub const DEFAULT_LOG_FILE: &str = "output.log";

/// Logging options resolved from the CLI.
#[derive(Debug, Clone)]
pub struct LogConfig {
    pub level: Level,
    /// Persistent log file; `None` disables file logging.
    pub log_file: Option<PathBuf>,
}

impl LogConfig {
    pub fn new(verbose: bool, log_file: Option<PathBuf>) -> Self {
        Self {
            level: if verbose { Level::DEBUG } else { Level::INFO },
            log_file: Some(log_file.unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE))),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self::new(false, None)
    }
}

/// Installs the global subscriber.
///
/// The returned guard flushes the file writer on drop; keep it alive in `main`.
pub fn init_logging(config: &LogConfig) -> Option<WorkerGuard> {
    let console = fmt::layer()
        .compact()
        .with_target(false)
        .with_writer(std::io::stderr);

    let (file_layer, guard) = match config.log_file.as_deref().and_then(open_appender) {
        Some(appender) => {
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().with_ansi(false).with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    let installed = tracing_subscriber::registry()
        .with(build_env_filter(config.level))
        .with(console)
        .with(file_layer)
        .try_init();

    if installed.is_err() {
        // a subscriber is already set (tests, embedding)
        return None;
    }
    guard
}

fn open_appender(path: &Path) -> Option<std::fs::File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).ok()?;
    }
    match std::fs::OpenOptions::new().create(true).append(true).open(path) {
        Ok(file) => Some(file),
        Err(e) => {
            eprintln!("Cannot open log file {}: {}", path.display(), e);
            None
        }
    }
}

/// Filter for our crates at `level`, external crates at warn.
fn build_env_filter(level: Level) -> EnvFilter {
    let level = level.as_str().to_lowercase();
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "warn,laptop_id_rust={level},laptop_id={level},laptop_id_common={level}"
        ))
    })
}
