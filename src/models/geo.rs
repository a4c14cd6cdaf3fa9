//! Geographic value types shared by the map and the data sources.

use serde::{Deserialize, Serialize};

/// A longitude/latitude pair in degrees (WGS84, GeoJSON axis order).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LngLat {
    pub lng: f64,
    pub lat: f64,
}

impl LngLat {
    pub const fn new(lng: f64, lat: f64) -> Self {
        Self { lng, lat }
    }

    /// Build from a GeoJSON position (`[lng, lat, ...]`).
    ///
    /// Returns `None` when fewer than two ordinates are present or either is
    /// not finite.
    pub fn from_position(position: &[f64]) -> Option<Self> {
        match position {
            [lng, lat, ..] if lng.is_finite() && lat.is_finite() => Some(Self::new(*lng, *lat)),
            _ => None,
        }
    }

    /// Clamp latitude to the poles and wrap longitude into `[-180, 180)`.
    pub fn normalized(self) -> Self {
        let mut lng = (self.lng + 180.0).rem_euclid(360.0) - 180.0;
        if lng.is_nan() {
            lng = 0.0;
        }
        Self {
            lng,
            lat: self.lat.clamp(-90.0, 90.0),
        }
    }
}

impl From<(f64, f64)> for LngLat {
    fn from((lng, lat): (f64, f64)) -> Self {
        Self::new(lng, lat)
    }
}
