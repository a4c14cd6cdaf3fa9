//! AppMessage enum for async communication within the application.

use crate::error::{ClusterError, FetchResult};
use crate::map::ClusterId;
use crate::models::{EarthquakePoint, GeocodeResult, PlateBoundary};

/// Results posted back to the UI loop by background tasks.
#[derive(Debug)]
pub enum AppMessage {
    /// The earthquake feed finished loading
    EarthquakesLoaded(FetchResult<Vec<EarthquakePoint>>),
    /// The plate-boundary GeoJSON finished loading
    PlateBoundariesLoaded(FetchResult<Vec<PlateBoundary>>),
    /// A geocoding response, tagged with the search generation it answers
    GeocodeResults {
        generation: u64,
        result: FetchResult<Vec<GeocodeResult>>,
    },
    /// The data source answered a cluster expansion-zoom lookup
    ClusterExpansionResolved {
        cluster_id: ClusterId,
        result: Result<Option<f64>, ClusterError>,
    },
}
