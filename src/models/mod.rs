//! Data models for the earthquake feed, geocoding results and plate
//! boundaries, plus the geographic value types they share.

pub mod geo;
pub mod geocode;
pub mod plates;
pub mod quake;

pub use geo::LngLat;
pub use geocode::{GeocodeResponse, GeocodeResult};
pub use plates::{BoundaryCollection, PlateBoundary};
pub use quake::{format_clock_time, EarthquakePoint, FeedCollection, Quake, Severity};
