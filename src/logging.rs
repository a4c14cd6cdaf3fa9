//! File-based tracing setup.
//!
//! The TUI owns stdout, so log output goes to `<cache dir>/quakes/quakes.log`.
//! The filter comes from `QUAKES_LOG` and defaults to `quakes=info`.

use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter directives.
pub const LOG_ENV: &str = "QUAKES_LOG";

const DEFAULT_FILTER: &str = "quakes=info";

/// Default log file location, if the platform has a cache directory.
pub fn default_log_path() -> Option<PathBuf> {
    dirs::cache_dir().map(|dir| dir.join("quakes").join("quakes.log"))
}

/// Filter from `QUAKES_LOG`, falling back to the default on absent or
/// invalid directives.
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

fn open_log_file(path: &Path) -> std::io::Result<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

/// Install the global subscriber writing to `path`.
///
/// Returns the path in use, or `None` if logging could not be set up. A
/// failure here never stops the application.
pub fn init_logging(path: Option<PathBuf>) -> Option<PathBuf> {
    let path = path.or_else(default_log_path)?;
    let file = match open_log_file(&path) {
        Ok(file) => file,
        Err(err) => {
            eprintln!("quakes: logging disabled ({}: {})", path.display(), err);
            return None;
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .ok()?;

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "quakes starting");
    Some(path)
}
