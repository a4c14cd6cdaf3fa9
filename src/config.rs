//! Runtime configuration.
//!
//! Everything is read from the environment once at startup and then passed
//! explicitly to the components that need it. Builder-style `with_*`
//! methods allow overriding individual fields, mainly for tests.
//!
//! # Example
//!
//! ```
//! use quakes::config::{Config, MapCredential};
//!
//! let config = Config::default().with_credential(MapCredential::from_token("pk.test"));
//! assert!(config.credential.is_configured());
//! ```

use std::time::Duration;

use crate::models::LngLat;

/// Primary environment variable holding the map/geocoding access token.
pub const TOKEN_ENV: &str = "QUAKES_MAPBOX_TOKEN";
/// Fallback variable name used by the Mapbox tooling.
pub const TOKEN_ENV_FALLBACK: &str = "MAPBOX_ACCESS_TOKEN";

pub const DEFAULT_EARTHQUAKE_FEED_URL: &str = "https://earthquake.usgs.gov/fdsnws/event/1/query";
pub const DEFAULT_GEOCODING_URL: &str = "https://api.mapbox.com/search/geocode/v6/forward";
pub const DEFAULT_PLATE_BOUNDARIES_URL: &str =
    "https://raw.githubusercontent.com/fraxen/tectonicplates/master/GeoJSON/PB2002_boundaries.json";

/// Access credential for the map and geocoding services.
#[derive(Clone, PartialEq, Eq, Default)]
pub enum MapCredential {
    Configured(String),
    #[default]
    Unconfigured,
}

impl MapCredential {
    /// Blank or whitespace-only tokens count as unconfigured.
    pub fn from_token(token: impl Into<String>) -> Self {
        let token = token.into();
        let trimmed = token.trim();
        if trimmed.is_empty() {
            MapCredential::Unconfigured
        } else {
            MapCredential::Configured(trimmed.to_string())
        }
    }

    /// Read [`TOKEN_ENV`], falling back to [`TOKEN_ENV_FALLBACK`].
    pub fn from_env() -> Self {
        [TOKEN_ENV, TOKEN_ENV_FALLBACK]
            .iter()
            .filter_map(|key| std::env::var(key).ok())
            .map(MapCredential::from_token)
            .find(MapCredential::is_configured)
            .unwrap_or(MapCredential::Unconfigured)
    }

    pub fn is_configured(&self) -> bool {
        matches!(self, MapCredential::Configured(_))
    }

    pub fn token(&self) -> Option<&str> {
        match self {
            MapCredential::Configured(token) => Some(token),
            MapCredential::Unconfigured => None,
        }
    }
}

// Keep tokens out of logs.
impl std::fmt::Debug for MapCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MapCredential::Configured(_) => f.write_str("Configured(***)"),
            MapCredential::Unconfigured => f.write_str("Unconfigured"),
        }
    }
}

/// Initial camera position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InitialView {
    pub center: LngLat,
    pub zoom: f64,
}

impl Default for InitialView {
    fn default() -> Self {
        Self {
            center: LngLat::new(-122.4, 37.8),
            zoom: 5.0,
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub credential: MapCredential,
    pub earthquake_feed_url: String,
    pub geocoding_url: String,
    pub plate_boundaries_url: String,
    /// Quiet period before the search query is considered settled
    pub search_debounce: Duration,
    /// Zoom level used when flying to a search result
    pub fly_to_zoom: f64,
    /// Duration of the ease-to animation after clicking a cluster
    pub cluster_ease_duration: Duration,
    pub initial_view: InitialView,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            credential: MapCredential::Unconfigured,
            earthquake_feed_url: DEFAULT_EARTHQUAKE_FEED_URL.to_string(),
            geocoding_url: DEFAULT_GEOCODING_URL.to_string(),
            plate_boundaries_url: DEFAULT_PLATE_BOUNDARIES_URL.to_string(),
            search_debounce: Duration::from_millis(500),
            fly_to_zoom: 9.0,
            cluster_ease_duration: Duration::from_millis(500),
            initial_view: InitialView::default(),
        }
    }
}

impl Config {
    /// Defaults plus the credential from the environment.
    pub fn from_env() -> Self {
        Self::default().with_credential(MapCredential::from_env())
    }

    pub fn with_credential(mut self, credential: MapCredential) -> Self {
        self.credential = credential;
        self
    }

    pub fn with_earthquake_feed_url(mut self, url: impl Into<String>) -> Self {
        self.earthquake_feed_url = url.into();
        self
    }

    pub fn with_geocoding_url(mut self, url: impl Into<String>) -> Self {
        self.geocoding_url = url.into();
        self
    }

    pub fn with_plate_boundaries_url(mut self, url: impl Into<String>) -> Self {
        self.plate_boundaries_url = url.into();
        self
    }

    pub fn with_search_debounce(mut self, quiet: Duration) -> Self {
        self.search_debounce = quiet;
        self
    }

    pub fn with_initial_view(mut self, center: LngLat, zoom: f64) -> Self {
        self.initial_view = InitialView { center, zoom };
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        std::env::remove_var(TOKEN_ENV);
        std::env::remove_var(TOKEN_ENV_FALLBACK);
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.search_debounce, Duration::from_millis(500));
        assert_eq!(config.fly_to_zoom, 9.0);
        assert_eq!(config.cluster_ease_duration, Duration::from_millis(500));
        assert!(!config.credential.is_configured());
    }

    #[test]
    fn test_blank_token_is_unconfigured() {
        assert_eq!(MapCredential::from_token("   "), MapCredential::Unconfigured);
        assert_eq!(
            MapCredential::from_token(" pk.abc "),
            MapCredential::Configured("pk.abc".to_string())
        );
    }

    #[test]
    fn test_debug_redacts_token() {
        let credential = MapCredential::from_token("pk.secret");
        assert_eq!(format!("{:?}", credential), "Configured(***)");
    }

    #[test]
    #[serial]
    fn test_from_env_primary_variable() {
        clear_env();
        std::env::set_var(TOKEN_ENV, "pk.primary");
        std::env::set_var(TOKEN_ENV_FALLBACK, "pk.fallback");
        assert_eq!(MapCredential::from_env().token(), Some("pk.primary"));
        clear_env();
    }

    #[test]
    #[serial]
    fn test_from_env_fallback_variable() {
        clear_env();
        std::env::set_var(TOKEN_ENV, "");
        std::env::set_var(TOKEN_ENV_FALLBACK, "pk.fallback");
        assert_eq!(MapCredential::from_env().token(), Some("pk.fallback"));
        clear_env();
    }

    #[test]
    #[serial]
    fn test_from_env_absent() {
        clear_env();
        assert_eq!(Config::from_env().credential, MapCredential::Unconfigured);
    }
}
