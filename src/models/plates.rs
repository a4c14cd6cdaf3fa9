//! Tectonic plate boundaries (PB2002 GeoJSON).

use serde::Deserialize;

use super::geo::LngLat;

/// A single boundary polyline.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlateBoundary {
    pub name: String,
    pub path: Vec<LngLat>,
}

#[derive(Debug, Deserialize)]
pub struct BoundaryCollection {
    #[serde(default)]
    pub features: Vec<BoundaryFeature>,
}

#[derive(Debug, Deserialize)]
pub struct BoundaryFeature {
    #[serde(default)]
    pub properties: BoundaryProperties,
    #[serde(default)]
    pub geometry: Option<BoundaryGeometry>,
}

#[derive(Debug, Default, Deserialize)]
pub struct BoundaryProperties {
    #[serde(default, rename = "Name")]
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
pub enum BoundaryGeometry {
    LineString { coordinates: Vec<Vec<f64>> },
    MultiLineString { coordinates: Vec<Vec<Vec<f64>>> },
    #[serde(other)]
    Unsupported,
}

fn to_path(positions: &[Vec<f64>]) -> Vec<LngLat> {
    positions
        .iter()
        .filter_map(|p| LngLat::from_position(p))
        .collect()
}

impl BoundaryCollection {
    /// Flatten into polylines; multi-line geometries yield one boundary per
    /// part and degenerate paths (fewer than two points) are dropped.
    pub fn into_boundaries(self) -> Vec<PlateBoundary> {
        let mut boundaries = Vec::new();
        for feature in self.features {
            let name = feature.properties.name.unwrap_or_default();
            let paths = match feature.geometry {
                Some(BoundaryGeometry::LineString { coordinates }) => vec![to_path(&coordinates)],
                Some(BoundaryGeometry::MultiLineString { coordinates }) => {
                    coordinates.iter().map(|part| to_path(part)).collect()
                }
                Some(BoundaryGeometry::Unsupported) | None => Vec::new(),
            };
            boundaries.extend(
                paths
                    .into_iter()
                    .filter(|path| path.len() >= 2)
                    .map(|path| PlateBoundary {
                        name: name.clone(),
                        path,
                    }),
            );
        }
        boundaries
    }
}
