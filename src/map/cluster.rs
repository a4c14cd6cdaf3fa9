//! Greedy point clustering with expansion-zoom lookup.
//!
//! Points are projected to normalized world coordinates and clustered once
//! per integer zoom level, from `max_zoom + 1` (raw points) down to zero.
//! At each level every unvisited item absorbs the unvisited neighbours within
//! `radius / (extent * 2^z)`; items with no neighbours are carried up to the
//! next level unchanged, so a cluster keeps its id at every zoom below the
//! one where it was formed.

use std::collections::HashMap;

use crate::error::ClusterError;
use crate::models::{EarthquakePoint, LngLat, Quake};

use super::camera::Viewport;

/// Cluster radius in pixels at the reference tile extent.
pub const CLUSTER_RADIUS: f64 = 50.0;
/// Reference tile extent in pixels.
pub const CLUSTER_EXTENT: f64 = 512.0;
/// Above this zoom points are never clustered.
pub const CLUSTER_MAX_ZOOM: u8 = 14;

pub type ClusterId = u64;

/// A feature as seen by the interaction layer: what lies under a click.
#[derive(Debug, Clone, PartialEq)]
pub enum MapFeature {
    /// An aggregation marker
    Cluster {
        id: ClusterId,
        point_count: usize,
        center: LngLat,
    },
    /// A single earthquake
    Point {
        id: String,
        quake: Quake,
        center: LngLat,
    },
    /// A feature carrying neither a cluster id nor earthquake properties
    Other { center: LngLat },
}

impl MapFeature {
    pub fn center(&self) -> LngLat {
        match self {
            MapFeature::Cluster { center, .. }
            | MapFeature::Point { center, .. }
            | MapFeature::Other { center } => *center,
        }
    }
}

/// Lookup of the zoom at which a cluster breaks apart.
///
/// `Ok(None)` means the source answered but had no zoom to offer.
pub trait ClusterSource {
    fn cluster_expansion_zoom(&self, cluster_id: ClusterId) -> Result<Option<f64>, ClusterError>;
}

#[derive(Debug, Clone, Copy)]
enum NodeKind {
    Point(usize),
    Cluster(ClusterId),
}

#[derive(Debug, Clone, Copy)]
struct Node {
    x: f64,
    y: f64,
    count: usize,
    kind: NodeKind,
}

fn to_world(p: LngLat) -> (f64, f64) {
    ((p.lng + 180.0) / 360.0, (90.0 - p.lat) / 360.0)
}

fn from_world(x: f64, y: f64) -> LngLat {
    LngLat::new(x * 360.0 - 180.0, 90.0 - y * 360.0)
}

/// Clustered earthquake points, queryable per zoom level.
#[derive(Debug, Clone, Default)]
pub struct ClusterIndex {
    points: Vec<EarthquakePoint>,
    /// `levels[z]` holds the items visible at integer zoom `z`
    levels: Vec<Vec<Node>>,
    /// Zoom at which each cluster was formed
    cluster_origins: HashMap<ClusterId, u8>,
    max_zoom: u8,
}

impl ClusterIndex {
    pub fn new(points: Vec<EarthquakePoint>) -> Self {
        Self::with_max_zoom(points, CLUSTER_MAX_ZOOM)
    }

    pub fn with_max_zoom(points: Vec<EarthquakePoint>, max_zoom: u8) -> Self {
        let mut index = Self {
            points,
            levels: Vec::with_capacity(usize::from(max_zoom) + 2),
            cluster_origins: HashMap::new(),
            max_zoom,
        };
        index.build();
        index
    }

    fn build(&mut self) {
        let raw: Vec<Node> = self
            .points
            .iter()
            .enumerate()
            .map(|(i, p)| {
                let (x, y) = to_world(p.center);
                Node {
                    x,
                    y,
                    count: 1,
                    kind: NodeKind::Point(i),
                }
            })
            .collect();

        let mut levels = vec![Vec::new(); usize::from(self.max_zoom) + 2];
        levels[usize::from(self.max_zoom) + 1] = raw;
        let mut next_id: ClusterId = 1;
        for z in (0..=self.max_zoom).rev() {
            let above = &levels[usize::from(z) + 1];
            let clustered = self.cluster_level(above, z, &mut next_id);
            levels[usize::from(z)] = clustered;
        }
        self.levels = levels;
    }

    fn cluster_level(&mut self, nodes: &[Node], zoom: u8, next_id: &mut ClusterId) -> Vec<Node> {
        let radius = CLUSTER_RADIUS / (CLUSTER_EXTENT * 2f64.powi(i32::from(zoom)));
        let cell_of = |x: f64, y: f64| ((x / radius).floor() as i64, (y / radius).floor() as i64);

        let mut grid: HashMap<(i64, i64), Vec<usize>> = HashMap::new();
        for (i, node) in nodes.iter().enumerate() {
            grid.entry(cell_of(node.x, node.y)).or_default().push(i);
        }

        let mut visited = vec![false; nodes.len()];
        let mut out = Vec::with_capacity(nodes.len());
        for (i, node) in nodes.iter().enumerate() {
            if visited[i] {
                continue;
            }
            visited[i] = true;

            let (cx, cy) = cell_of(node.x, node.y);
            let mut neighbours = Vec::new();
            for gx in cx - 1..=cx + 1 {
                for gy in cy - 1..=cy + 1 {
                    let Some(bucket) = grid.get(&(gx, gy)) else {
                        continue;
                    };
                    for &j in bucket {
                        if visited[j] {
                            continue;
                        }
                        let other = &nodes[j];
                        let (dx, dy) = (other.x - node.x, other.y - node.y);
                        if dx * dx + dy * dy <= radius * radius {
                            neighbours.push(j);
                        }
                    }
                }
            }

            if neighbours.is_empty() {
                out.push(*node);
                continue;
            }

            let mut count = node.count;
            let mut wx = node.x * node.count as f64;
            let mut wy = node.y * node.count as f64;
            for &j in &neighbours {
                visited[j] = true;
                let other = &nodes[j];
                count += other.count;
                wx += other.x * other.count as f64;
                wy += other.y * other.count as f64;
            }

            let id = *next_id;
            *next_id += 1;
            self.cluster_origins.insert(id, zoom);
            out.push(Node {
                x: wx / count as f64,
                y: wy / count as f64,
                count,
                kind: NodeKind::Cluster(id),
            });
        }
        out
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn max_zoom(&self) -> u8 {
        self.max_zoom
    }

    /// Zoom level whose clustering applies to a (fractional) camera zoom.
    fn level_for(&self, zoom: f64) -> usize {
        let top = usize::from(self.max_zoom) + 1;
        if zoom.is_nan() || zoom <= 0.0 {
            0
        } else {
            (zoom.floor() as usize).min(top)
        }
    }

    fn to_feature(&self, node: &Node) -> MapFeature {
        let center = from_world(node.x, node.y);
        match node.kind {
            NodeKind::Cluster(id) => MapFeature::Cluster {
                id,
                point_count: node.count,
                center,
            },
            NodeKind::Point(i) => {
                let point = &self.points[i];
                MapFeature::Point {
                    id: point.id.clone(),
                    quake: point.quake.clone(),
                    center: point.center,
                }
            }
        }
    }

    /// Every cluster and unclustered point at `zoom`.
    pub fn features_at_zoom(&self, zoom: f64) -> Vec<MapFeature> {
        self.levels
            .get(self.level_for(zoom))
            .map(|nodes| nodes.iter().map(|n| self.to_feature(n)).collect())
            .unwrap_or_default()
    }

    /// Clusters and points at `zoom` that fall inside `viewport`.
    pub fn features_in(&self, viewport: &Viewport, zoom: f64) -> Vec<MapFeature> {
        let Some(nodes) = self.levels.get(self.level_for(zoom)) else {
            return Vec::new();
        };
        nodes
            .iter()
            .filter(|n| viewport.contains(from_world(n.x, n.y)))
            .map(|n| self.to_feature(n))
            .collect()
    }

    /// The smallest zoom at which the cluster splits into its children.
    pub fn expansion_zoom(&self, cluster_id: ClusterId) -> Result<u8, ClusterError> {
        if self.points.is_empty() {
            return Err(ClusterError::NotLoaded);
        }
        self.cluster_origins
            .get(&cluster_id)
            .map(|origin| origin + 1)
            .ok_or(ClusterError::NotFound(cluster_id))
    }
}

impl ClusterSource for ClusterIndex {
    fn cluster_expansion_zoom(&self, cluster_id: ClusterId) -> Result<Option<f64>, ClusterError> {
        self.expansion_zoom(cluster_id).map(|z| Some(f64::from(z)))
    }
}
