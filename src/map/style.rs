//! Declarative style layers for the earthquake and plate-boundary sources.
//!
//! Layers are evaluated against [`MapFeature`] properties (`point_count` for
//! clusters, `mag` for single earthquakes) with step expressions, in the
//! order they are listed: later layers draw on top and win hit tests.

use ratatui::style::Color;

use super::cluster::MapFeature;

/// Data source a layer draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceId {
    Earthquakes,
    Faults,
}

/// Feature property an expression reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Property {
    PointCount,
    Mag,
}

impl Property {
    pub fn read(self, feature: &MapFeature) -> Option<f64> {
        match (self, feature) {
            (Property::PointCount, MapFeature::Cluster { point_count, .. }) => {
                Some(*point_count as f64)
            }
            (Property::Mag, MapFeature::Point { quake, .. }) => quake.magnitude,
            _ => None,
        }
    }
}

/// Piecewise-constant expression: `base` below the first stop, otherwise
/// the output of the last stop whose input is `<=` the value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Step<T: 'static> {
    pub base: T,
    pub stops: &'static [(f64, T)],
}

impl<T: Copy> Step<T> {
    pub fn evaluate(&self, input: f64) -> T {
        let mut output = self.base;
        for &(threshold, value) in self.stops {
            if input >= threshold {
                output = value;
            } else {
                break;
            }
        }
        output
    }
}

/// A paint value: a constant or a step over a feature property.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Expr<T: 'static> {
    Constant(T),
    Step { property: Property, step: Step<T> },
}

impl<T: Copy> Expr<T> {
    /// Missing properties evaluate to the step's base output.
    pub fn evaluate(&self, feature: &MapFeature) -> T {
        match self {
            Expr::Constant(value) => *value,
            Expr::Step { property, step } => match property.read(feature) {
                Some(input) => step.evaluate(input),
                None => step.base,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerFilter {
    All,
    HasPointCount,
    NotHasPointCount,
}

impl LayerFilter {
    pub fn matches(self, feature: &MapFeature) -> bool {
        let is_cluster = matches!(feature, MapFeature::Cluster { .. });
        match self {
            LayerFilter::All => true,
            LayerFilter::HasPointCount => is_cluster,
            LayerFilter::NotHasPointCount => !is_cluster,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Paint {
    Line {
        color: Color,
        width: f64,
    },
    Circle {
        color: Expr<Color>,
        /// Radius in screen pixels
        radius: Expr<f64>,
        stroke: Option<Color>,
    },
    /// Abbreviated `point_count` label
    CountLabel { color: Color },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayerSpec {
    pub id: &'static str,
    pub source: SourceId,
    pub filter: LayerFilter,
    pub paint: Paint,
}

impl LayerSpec {
    pub fn is_interactive(&self) -> bool {
        INTERACTIVE_LAYERS.contains(&self.id)
    }
}

pub const FAULTS_LAYER_ID: &str = "faults-layer";
pub const CLUSTER_LAYER_ID: &str = "clusters";
pub const CLUSTER_COUNT_LAYER_ID: &str = "cluster-count";
pub const UNCLUSTERED_POINT_LAYER_ID: &str = "unclustered-point";

/// Layers that respond to clicks.
pub const INTERACTIVE_LAYERS: [&str; 2] = [CLUSTER_LAYER_ID, UNCLUSTERED_POINT_LAYER_ID];

pub const CLUSTER_COLORS: Step<Color> = Step {
    base: Color::Rgb(0x73, 0x73, 0x73),
    stops: &[
        (5.0, Color::Rgb(0xa3, 0xa3, 0xa3)),
        (15.0, Color::Rgb(0xd4, 0xd4, 0xd4)),
        (75.0, Color::Rgb(0xe5, 0xe5, 0xe5)),
        (150.0, Color::Rgb(0xff, 0xff, 0xff)),
    ],
};

pub const CLUSTER_RADII: Step<f64> = Step {
    base: 20.0,
    stops: &[(100.0, 30.0), (750.0, 40.0)],
};

pub const MAGNITUDE_COLORS: Step<Color> = Step {
    base: Color::Rgb(0x57, 0xab, 0xf0),
    stops: &[
        (1.0, Color::Rgb(0x6e, 0xcd, 0xb7)),
        (2.0, Color::Rgb(0xf1, 0xca, 0x4a)),
        (3.0, Color::Rgb(0xe9, 0x83, 0x39)),
        (4.0, Color::Rgb(0xe5, 0x4a, 0x30)),
        (5.0, Color::Rgb(0x50, 0x2e, 0xec)),
    ],
};

pub const FAULT_LINE_COLOR: Color = Color::Rgb(0xf0, 0xf0, 0x00);

/// The full layer stack, bottom to top.
pub const STYLE_LAYERS: [LayerSpec; 4] = [
    LayerSpec {
        id: FAULTS_LAYER_ID,
        source: SourceId::Faults,
        filter: LayerFilter::All,
        paint: Paint::Line {
            color: FAULT_LINE_COLOR,
            width: 1.0,
        },
    },
    LayerSpec {
        id: CLUSTER_LAYER_ID,
        source: SourceId::Earthquakes,
        filter: LayerFilter::HasPointCount,
        paint: Paint::Circle {
            color: Expr::Step {
                property: Property::PointCount,
                step: CLUSTER_COLORS,
            },
            radius: Expr::Step {
                property: Property::PointCount,
                step: CLUSTER_RADII,
            },
            stroke: None,
        },
    },
    LayerSpec {
        id: CLUSTER_COUNT_LAYER_ID,
        source: SourceId::Earthquakes,
        filter: LayerFilter::HasPointCount,
        paint: Paint::CountLabel {
            color: Color::Black,
        },
    },
    LayerSpec {
        id: UNCLUSTERED_POINT_LAYER_ID,
        source: SourceId::Earthquakes,
        filter: LayerFilter::NotHasPointCount,
        paint: Paint::Circle {
            color: Expr::Step {
                property: Property::Mag,
                step: MAGNITUDE_COLORS,
            },
            radius: Expr::Constant(8.0),
            stroke: Some(Color::White),
        },
    },
];

/// Screen pixels per terminal column.
const PIXELS_PER_COLUMN: f64 = 10.0;

/// Hit/draw radius of a circle in terminal cells, as (columns, rows).
pub fn radius_in_cells(radius_px: f64) -> (u16, u16) {
    let cols = (radius_px / PIXELS_PER_COLUMN).ceil().max(1.0);
    let rows = (radius_px / (PIXELS_PER_COLUMN * 2.0)).ceil().max(1.0);
    (cols as u16, rows as u16)
}

/// Label text for a cluster, e.g. `842`, `1.2k`, `15k`.
pub fn abbreviate_count(count: usize) -> String {
    if count >= 10_000 {
        format!("{}k", (count as f64 / 1000.0).round() as u64)
    } else if count >= 1000 {
        let tenths = (count as f64 / 100.0).round() / 10.0;
        format!("{}k", tenths)
    } else {
        count.to_string()
    }
}

/// One row of the magnitude legend.
#[derive(Debug, Clone, PartialEq)]
pub struct LegendItem {
    pub id: String,
    pub color: Color,
    pub title: String,
}

/// Legend rows for the unclustered point colours: `0 to 1` … `5 or greater`.
pub fn magnitude_legend() -> Vec<LegendItem> {
    let colors = std::iter::once(MAGNITUDE_COLORS.base)
        .chain(MAGNITUDE_COLORS.stops.iter().map(|&(_, color)| color));
    let mut items: Vec<LegendItem> = colors
        .enumerate()
        .map(|(idx, color)| LegendItem {
            id: format!("magnitude-item-{}", idx + 1),
            color,
            title: format!("{} to {}", idx, idx + 1),
        })
        .collect();
    if let Some(last) = items.last_mut() {
        last.title = "5 or greater".to_string();
    }
    items
}
