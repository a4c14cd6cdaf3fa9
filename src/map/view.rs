//! The map view: camera, style layers, canvas rendering and feature hit
//! testing.
//!
//! `MapView` holds no selection or query state. The controller feeds it data
//! and camera commands, and asks it which features lie under a click.

use std::time::{Duration, Instant};

use ratatui::layout::{Alignment, Position, Rect};
use ratatui::style::{Style, Stylize};
use ratatui::text::Span;
use ratatui::widgets::canvas::{Canvas, Circle, Context, Line as CanvasLine, Map, MapResolution};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::config::{Config, MapCredential, TOKEN_ENV};
use crate::models::{EarthquakePoint, LngLat, PlateBoundary};

use super::camera::{Camera, CameraCommand, Viewport};
use super::cluster::{ClusterIndex, ClusterSource, MapFeature};
use super::style::{
    abbreviate_count, radius_in_cells, LayerSpec, Paint, SourceId, STYLE_LAYERS,
};

/// Basemap coastline colour.
const BASEMAP_COLOR: ratatui::style::Color = ratatui::style::Color::Rgb(70, 70, 80);

/// Glyphs for single earthquakes; the ringed one stands in for a stroked circle.
const POINT_GLYPH: &str = "●";
const POINT_GLYPH_RINGED: &str = "◉";

/// Zoom change per scroll notch or `+`/`-` press.
pub const ZOOM_STEP: f64 = 0.5;

/// An interactive feature as drawn on screen.
#[derive(Debug, Clone, PartialEq)]
struct FeatureHit {
    feature: MapFeature,
    col: u16,
    row: u16,
    radius: (u16, u16),
}

impl FeatureHit {
    fn contains(&self, col: u16, row: u16) -> bool {
        col.abs_diff(self.col) <= self.radius.0 && row.abs_diff(self.row) <= self.radius.1
    }
}

/// A drawable item of one layer.
#[derive(Debug, Clone)]
enum Mark {
    Segment {
        from: LngLat,
        to: LngLat,
        color: ratatui::style::Color,
    },
    Disc {
        at: LngLat,
        radius_deg: f64,
        color: ratatui::style::Color,
    },
    Dot {
        at: LngLat,
        color: ratatui::style::Color,
        ringed: bool,
    },
    Label {
        at: LngLat,
        text: String,
        color: ratatui::style::Color,
    },
}

/// Everything needed to draw one frame of the map.
#[derive(Debug, Clone)]
pub struct Scene {
    viewport: Viewport,
    layers: Vec<Vec<Mark>>,
}

impl Scene {
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Number of marks drawn per layer, in layer order.
    pub fn mark_counts(&self) -> Vec<usize> {
        self.layers.iter().map(Vec::len).collect()
    }
}

pub struct MapView {
    credential: MapCredential,
    camera: Camera,
    index: ClusterIndex,
    boundaries: Vec<PlateBoundary>,
    /// Interactive features from the last frame, bottom to top
    hits: Vec<FeatureHit>,
    last_viewport: Option<Viewport>,
    drag_anchor: Option<(u16, u16)>,
}

impl MapView {
    pub fn new(config: &Config) -> Self {
        Self {
            credential: config.credential.clone(),
            camera: Camera::new(config.initial_view.center, config.initial_view.zoom),
            index: ClusterIndex::default(),
            boundaries: Vec::new(),
            hits: Vec::new(),
            last_viewport: None,
            drag_anchor: None,
        }
    }

    /// Whether the map can render at all.
    pub fn is_enabled(&self) -> bool {
        self.credential.is_configured()
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn earthquake_count(&self) -> usize {
        self.index.len()
    }

    pub fn boundary_count(&self) -> usize {
        self.boundaries.len()
    }

    pub fn set_earthquakes(&mut self, points: Vec<EarthquakePoint>) {
        self.index = ClusterIndex::new(points);
        self.hits.clear();
    }

    pub fn set_plate_boundaries(&mut self, boundaries: Vec<PlateBoundary>) {
        self.boundaries = boundaries;
    }

    /// The clustered earthquake source, for expansion-zoom lookups.
    pub fn cluster_source(&self) -> &dyn ClusterSource {
        &self.index
    }

    pub fn fly_to(&mut self, center: LngLat, zoom: f64, now: Instant) {
        self.apply(CameraCommand::FlyTo { center, zoom }, now);
    }

    pub fn ease_to(&mut self, center: LngLat, zoom: f64, duration: Duration, now: Instant) {
        self.apply(
            CameraCommand::EaseTo {
                center,
                zoom,
                duration,
            },
            now,
        );
    }

    pub fn apply(&mut self, command: CameraCommand, now: Instant) {
        tracing::debug!(?command, "camera command");
        self.camera.apply(command, now);
    }

    /// Advance camera animation. Returns true when a redraw is needed.
    pub fn tick(&mut self, now: Instant) -> bool {
        self.camera.advance(now)
    }

    pub fn zoom_by(&mut self, delta: f64) {
        self.camera.zoom_by(delta);
    }

    /// Pan by whole cells of the last drawn viewport.
    pub fn pan_cells(&mut self, cols: i32, rows: i32) {
        let (dx, dy) = self
            .last_viewport
            .map(|v| v.degrees_per_cell())
            .unwrap_or((1.0, 2.0));
        self.camera.pan(f64::from(cols) * dx, f64::from(rows) * dy);
    }

    pub fn begin_drag(&mut self, col: u16, row: u16) {
        self.drag_anchor = Some((col, row));
    }

    /// Pan so the point under the drag anchor follows the pointer.
    pub fn drag_to(&mut self, col: u16, row: u16) -> bool {
        let Some((ac, ar)) = self.drag_anchor else {
            return false;
        };
        let moved_cols = i32::from(ac) - i32::from(col);
        let moved_rows = i32::from(row) - i32::from(ar);
        if moved_cols == 0 && moved_rows == 0 {
            return false;
        }
        self.pan_cells(moved_cols, moved_rows);
        self.drag_anchor = Some((col, row));
        true
    }

    pub fn end_drag(&mut self) {
        self.drag_anchor = None;
    }

    /// Whether a cell lies in the last drawn map area.
    pub fn contains(&self, col: u16, row: u16) -> bool {
        self.last_viewport
            .is_some_and(|v| v.area.contains(Position::new(col, row)))
    }

    /// Interactive features under a cell, topmost first.
    pub fn features_at(&self, col: u16, row: u16) -> Vec<MapFeature> {
        self.hits
            .iter()
            .rev()
            .filter(|hit| hit.contains(col, row))
            .map(|hit| hit.feature.clone())
            .collect()
    }

    /// Lay out every layer for `area` and record hit areas for the
    /// interactive ones.
    pub fn prepare(&mut self, area: Rect) -> Scene {
        let viewport = self.camera.viewport(area);
        let (deg_per_col, _) = viewport.degrees_per_cell();
        let features = self.index.features_in(&viewport, self.camera.zoom());

        self.hits.clear();
        let mut layers = Vec::with_capacity(STYLE_LAYERS.len());
        for layer in STYLE_LAYERS.iter() {
            let marks = match layer.source {
                SourceId::Faults => self.boundary_marks(layer, &viewport),
                SourceId::Earthquakes => {
                    self.feature_marks(layer, &features, &viewport, deg_per_col)
                }
            };
            layers.push(marks);
        }
        self.last_viewport = Some(viewport);
        Scene { viewport, layers }
    }

    fn boundary_marks(&self, layer: &LayerSpec, viewport: &Viewport) -> Vec<Mark> {
        let Paint::Line { color, .. } = layer.paint else {
            return Vec::new();
        };
        let mut marks = Vec::new();
        for boundary in &self.boundaries {
            for pair in boundary.path.windows(2) {
                // Keep `to` within half a turn of `from` so segments that
                // cross the antimeridian are not drawn the long way round
                let from = viewport.local(pair[0]);
                let d_lng = (pair[1].lng - pair[0].lng + 540.0).rem_euclid(360.0) - 180.0;
                let to = LngLat::new(from.lng + d_lng, pair[1].lat);
                for shift in [0.0, -360.0] {
                    let from = LngLat::new(from.lng + shift, from.lat);
                    let to = LngLat::new(to.lng + shift, to.lat);
                    if viewport.contains_local(from) || viewport.contains_local(to) {
                        marks.push(Mark::Segment { from, to, color });
                        break;
                    }
                }
            }
        }
        marks
    }

    fn feature_marks(
        &mut self,
        layer: &LayerSpec,
        features: &[MapFeature],
        viewport: &Viewport,
        deg_per_col: f64,
    ) -> Vec<Mark> {
        let mut marks = Vec::new();
        for feature in features.iter().filter(|f| layer.filter.matches(f)) {
            let at = viewport.local(feature.center());
            match layer.paint {
                Paint::Circle {
                    color,
                    radius,
                    stroke,
                } => {
                    let color = color.evaluate(feature);
                    let cells = radius_in_cells(radius.evaluate(feature));
                    match feature {
                        MapFeature::Cluster { .. } => marks.push(Mark::Disc {
                            at,
                            radius_deg: f64::from(cells.0) * deg_per_col,
                            color,
                        }),
                        _ => marks.push(Mark::Dot {
                            at,
                            color,
                            ringed: stroke.is_some(),
                        }),
                    }
                    if layer.is_interactive() {
                        if let Some((col, row)) = viewport.project(at) {
                            self.hits.push(FeatureHit {
                                feature: feature.clone(),
                                col,
                                row,
                                radius: cells,
                            });
                        }
                    }
                }
                Paint::CountLabel { color } => {
                    if let MapFeature::Cluster { point_count, .. } = feature {
                        marks.push(Mark::Label {
                            at,
                            text: abbreviate_count(*point_count),
                            color,
                        });
                    }
                }
                Paint::Line { .. } => {}
            }
        }
        marks
    }

    /// Draw the map into `area`.
    ///
    /// Without a credential nothing is drawn except a hint, and no features
    /// become clickable.
    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        if !self.is_enabled() {
            self.hits.clear();
            self.last_viewport = None;
            let hint = Paragraph::new(format!("Map unavailable: set {} to enable it", TOKEN_ENV))
                .alignment(Alignment::Center)
                .style(Style::default().dark_gray());
            let centered = Rect {
                y: area.y + area.height / 2,
                height: area.height.min(1),
                ..area
            };
            frame.render_widget(hint, centered);
            return;
        }

        let scene = self.prepare(area);
        let (deg_per_col, _) = scene.viewport.degrees_per_cell();
        let [west, east] = scene.viewport.x_bounds();
        frame.render_widget(basemap([west, east], scene.viewport.y_bounds()), area);
        if scene.viewport.crosses_antimeridian() {
            // Coastline data only spans [-180, 180]; draw it again through
            // bounds shifted one turn to cover the far side of the line
            let turn = if east > 180.0 { 360.0 } else { -360.0 };
            frame.render_widget(
                basemap([west - turn, east - turn], scene.viewport.y_bounds()),
                area,
            );
        }

        let canvas = Canvas::default()
            .x_bounds(scene.viewport.x_bounds())
            .y_bounds(scene.viewport.y_bounds())
            .paint(|ctx| {
                for (i, marks) in scene.layers.iter().enumerate() {
                    if i > 0 {
                        ctx.layer();
                    }
                    for mark in marks {
                        match mark {
                            Mark::Segment { from, to, color } => ctx.draw(&CanvasLine {
                                x1: from.lng,
                                y1: from.lat,
                                x2: to.lng,
                                y2: to.lat,
                                color: *color,
                            }),
                            Mark::Disc {
                                at,
                                radius_deg,
                                color,
                            } => ctx.draw(&Circle {
                                x: at.lng,
                                y: at.lat,
                                radius: *radius_deg,
                                color: *color,
                            }),
                            Mark::Dot { at, color, ringed } => {
                                let glyph = if *ringed { POINT_GLYPH_RINGED } else { POINT_GLYPH };
                                ctx.print(at.lng, at.lat, Span::styled(glyph, Style::default().fg(*color)));
                            }
                            Mark::Label { at, text, color } => {
                                let half = text.chars().count() as f64 / 2.0;
                                ctx.print(
                                    at.lng - half * deg_per_col,
                                    at.lat,
                                    Span::styled(text.clone(), Style::default().fg(*color).bold()),
                                );
                            }
                        }
                    }
                }
            });
        frame.render_widget(canvas, area);
    }
}

/// World coastlines through the given bounds.
fn basemap(x_bounds: [f64; 2], y_bounds: [f64; 2]) -> Canvas<'static, impl Fn(&mut Context<'_>)> {
    Canvas::default()
        .x_bounds(x_bounds)
        .y_bounds(y_bounds)
        .paint(|ctx| {
            ctx.draw(&Map {
                color: BASEMAP_COLOR,
                resolution: MapResolution::High,
            })
        })
}
