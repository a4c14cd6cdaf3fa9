//! `--version` and `--help` output.

use crate::config::{TOKEN_ENV, TOKEN_ENV_FALLBACK};
use crate::logging::LOG_ENV;

/// The current version, read from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn version_text() -> String {
    format!("quakes {}", VERSION)
}

pub fn help_text() -> String {
    format!(
        "quakes {VERSION}\n\
         A terminal map of the last day's earthquakes and tectonic plate boundaries.\n\
         \n\
         USAGE:\n    quakes [--version | --help]\n\
         \n\
         ENVIRONMENT:\n    \
         {TOKEN_ENV}    Mapbox access token (map and place search)\n    \
         {TOKEN_ENV_FALLBACK}    Used when {TOKEN_ENV} is unset\n    \
         {LOG_ENV}    Log filter, e.g. quakes=debug\n"
    )
}
