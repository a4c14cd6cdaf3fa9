//! Error types for the data sources and the map engine.
//!
//! None of these errors are fatal: every failure degrades to "show nothing"
//! and is logged. The binary itself reports startup failures through
//! `color_eyre`.

use crate::traits::HttpError;

/// Failure fetching or decoding one of the remote data sources.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The request could not be completed
    #[error(transparent)]
    Http(#[from] HttpError),

    /// The server answered with a non-2xx status
    #[error("{source_name} returned status {status}")]
    Status {
        source_name: &'static str,
        status: u16,
    },

    /// The body was not the expected GeoJSON
    #[error("failed to decode {source_name} response: {error}")]
    Decode {
        source_name: &'static str,
        #[source]
        error: serde_json::Error,
    },

    /// The source needs an access credential and none is configured
    #[error("{0} requires an access token but none is configured")]
    Unconfigured(&'static str),
}

impl FetchError {
    /// Whether the failure came from the transport rather than the payload.
    pub fn is_transport(&self) -> bool {
        matches!(self, FetchError::Http(_))
    }
}

/// Failure resolving a cluster in the map data source.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClusterError {
    #[error("no cluster with id {0}")]
    NotFound(u64),

    /// The data source has not been loaded yet
    #[error("cluster index is empty")]
    NotLoaded,
}

pub type FetchResult<T> = Result<T, FetchError>;
