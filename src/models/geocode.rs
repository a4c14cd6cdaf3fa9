//! Forward-geocoding results (Mapbox Search v6 response shape).

use serde::Deserialize;

use super::geo::LngLat;

/// One ranked geocoding match.
#[derive(Debug, Clone, PartialEq)]
pub struct GeocodeResult {
    pub id: String,
    pub full_address: String,
    pub center: LngLat,
}

#[derive(Debug, Deserialize)]
pub struct GeocodeResponse {
    #[serde(default)]
    pub features: Vec<GeocodeFeature>,
}

#[derive(Debug, Deserialize)]
pub struct GeocodeFeature {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub properties: GeocodeProperties,
    #[serde(default)]
    pub geometry: Option<GeocodeGeometry>,
}

#[derive(Debug, Default, Deserialize)]
pub struct GeocodeProperties {
    #[serde(default)]
    pub full_address: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct GeocodeGeometry {
    #[serde(default)]
    pub coordinates: Vec<f64>,
}

impl GeocodeResponse {
    /// Results in ranked order; features without coordinates are dropped.
    pub fn into_results(self) -> Vec<GeocodeResult> {
        self.features
            .into_iter()
            .enumerate()
            .filter_map(|(index, feature)| {
                let center = feature
                    .geometry
                    .as_ref()
                    .and_then(|g| LngLat::from_position(&g.coordinates))?;
                let full_address = feature
                    .properties
                    .full_address
                    .or(feature.properties.name)
                    .unwrap_or_default();
                Some(GeocodeResult {
                    id: feature.id.unwrap_or_else(|| format!("place-{}", index)),
                    full_address,
                    center,
                })
            })
            .collect()
    }
}
