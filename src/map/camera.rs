//! Camera state, projection onto terminal cells, and animated transitions.
//!
//! The projection is equirectangular: at zoom `z` the viewport spans
//! `360 / 2^z` degrees of longitude across its width. Terminal cells are
//! roughly twice as tall as they are wide, so the latitude span is scaled to
//! keep a degree of latitude and a degree of longitude visually equal.

use std::time::{Duration, Instant};

use ratatui::layout::Rect;

use crate::models::LngLat;

pub const MIN_ZOOM: f64 = 0.0;
pub const MAX_ZOOM: f64 = 16.0;

/// Duration of a fly-to animation.
pub const FLY_TO_DURATION: Duration = Duration::from_millis(1200);

/// Height/width ratio of a terminal cell.
const CELL_ASPECT: f64 = 2.0;

/// Imperative camera commands issued by the controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CameraCommand {
    FlyTo {
        center: LngLat,
        zoom: f64,
    },
    EaseTo {
        center: LngLat,
        zoom: f64,
        duration: Duration,
    },
}

impl CameraCommand {
    pub fn target(&self) -> (LngLat, f64) {
        match *self {
            CameraCommand::FlyTo { center, zoom } => (center, zoom),
            CameraCommand::EaseTo { center, zoom, .. } => (center, zoom),
        }
    }

    pub fn duration(&self) -> Duration {
        match *self {
            CameraCommand::FlyTo { .. } => FLY_TO_DURATION,
            CameraCommand::EaseTo { duration, .. } => duration,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Transition {
    from_center: LngLat,
    from_zoom: f64,
    to_center: LngLat,
    to_zoom: f64,
    started: Instant,
    duration: Duration,
}

impl Transition {
    fn progress(&self, now: Instant) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.started).as_secs_f64();
        (elapsed / self.duration.as_secs_f64()).clamp(0.0, 1.0)
    }
}

fn smoothstep(t: f64) -> f64 {
    t * t * (3.0 - 2.0 * t)
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// The single mutable camera. A new command supersedes any running one,
/// starting from wherever the previous animation had got to.
#[derive(Debug, Clone)]
pub struct Camera {
    center: LngLat,
    zoom: f64,
    transition: Option<Transition>,
}

impl Camera {
    pub fn new(center: LngLat, zoom: f64) -> Self {
        Self {
            center: clamp_center(center),
            zoom: zoom.clamp(MIN_ZOOM, MAX_ZOOM),
            transition: None,
        }
    }

    pub fn center(&self) -> LngLat {
        self.center
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn is_animating(&self) -> bool {
        self.transition.is_some()
    }

    /// Start animating towards the command's target.
    pub fn apply(&mut self, command: CameraCommand, now: Instant) {
        self.advance(now);
        let (center, zoom) = command.target();
        // Head the short way round, across the antimeridian if need be
        let mut to_center = clamp_center(center);
        let d_lng = to_center.lng - self.center.lng;
        if d_lng > 180.0 {
            to_center.lng -= 360.0;
        } else if d_lng < -180.0 {
            to_center.lng += 360.0;
        }
        self.transition = Some(Transition {
            from_center: self.center,
            from_zoom: self.zoom,
            to_center,
            to_zoom: zoom.clamp(MIN_ZOOM, MAX_ZOOM),
            started: now,
            duration: command.duration(),
        });
        self.advance(now);
    }

    /// Step the running animation. Returns true when the camera moved.
    pub fn advance(&mut self, now: Instant) -> bool {
        let Some(transition) = self.transition else {
            return false;
        };
        let t = transition.progress(now);
        let eased = smoothstep(t);
        let before = (self.center, self.zoom);
        self.center = clamp_center(LngLat::new(
            lerp(transition.from_center.lng, transition.to_center.lng, eased),
            lerp(transition.from_center.lat, transition.to_center.lat, eased),
        ));
        self.zoom = lerp(transition.from_zoom, transition.to_zoom, eased);
        if t >= 1.0 {
            self.center = clamp_center(transition.to_center);
            self.zoom = transition.to_zoom;
            self.transition = None;
        }
        before != (self.center, self.zoom)
    }

    /// Move the center by a number of degrees; cancels any animation.
    pub fn pan(&mut self, d_lng: f64, d_lat: f64) {
        self.transition = None;
        self.center = clamp_center(LngLat::new(self.center.lng + d_lng, self.center.lat + d_lat));
    }

    /// Change zoom by `delta` levels; cancels any animation.
    pub fn zoom_by(&mut self, delta: f64) {
        self.transition = None;
        self.zoom = (self.zoom + delta).clamp(MIN_ZOOM, MAX_ZOOM);
    }

    /// The visible window for a drawing area.
    pub fn viewport(&self, area: Rect) -> Viewport {
        let lng_span = 360.0 / 2f64.powf(self.zoom);
        let width = f64::from(area.width.max(1));
        let height = f64::from(area.height.max(1));
        let lat_span = lng_span * height * CELL_ASPECT / width;
        Viewport {
            area,
            west: self.center.lng - lng_span / 2.0,
            east: self.center.lng + lng_span / 2.0,
            south: self.center.lat - lat_span / 2.0,
            north: self.center.lat + lat_span / 2.0,
        }
    }
}

fn clamp_center(center: LngLat) -> LngLat {
    let normalized = center.normalized();
    LngLat::new(normalized.lng, normalized.lat.clamp(-85.0, 85.0))
}

/// A camera window mapped onto a rectangle of terminal cells.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub area: Rect,
    pub west: f64,
    pub east: f64,
    pub south: f64,
    pub north: f64,
}

impl Viewport {
    pub fn x_bounds(&self) -> [f64; 2] {
        [self.west, self.east]
    }

    pub fn y_bounds(&self) -> [f64; 2] {
        [self.south, self.north]
    }

    /// Degrees covered by one cell horizontally and vertically.
    pub fn degrees_per_cell(&self) -> (f64, f64) {
        (
            (self.east - self.west) / f64::from(self.area.width.max(1)),
            (self.north - self.south) / f64::from(self.area.height.max(1)),
        )
    }

    /// Whether the viewport spills over the antimeridian.
    pub fn crosses_antimeridian(&self) -> bool {
        self.west < -180.0 || self.east > 180.0
    }

    /// `point` with its longitude shifted by whole turns into
    /// `[west, west + 360)`, the frame the viewport bounds are expressed in.
    pub fn local(&self, point: LngLat) -> LngLat {
        LngLat::new(
            self.west + (point.lng - self.west).rem_euclid(360.0),
            point.lat,
        )
    }

    /// Bounds test for a point already in the local frame.
    pub fn contains_local(&self, point: LngLat) -> bool {
        point.lng >= self.west
            && point.lng <= self.east
            && point.lat >= self.south
            && point.lat <= self.north
    }

    pub fn contains(&self, point: LngLat) -> bool {
        self.contains_local(self.local(point))
    }

    /// Terminal cell holding `point`, if it is on screen.
    pub fn project(&self, point: LngLat) -> Option<(u16, u16)> {
        let point = self.local(point);
        if !self.contains_local(point) || self.area.width == 0 || self.area.height == 0 {
            return None;
        }
        let (dx, dy) = self.degrees_per_cell();
        let col = ((point.lng - self.west) / dx).floor() as u16;
        let row = ((self.north - point.lat) / dy).floor() as u16;
        Some((
            self.area.x + col.min(self.area.width - 1),
            self.area.y + row.min(self.area.height - 1),
        ))
    }

    /// Geographic position at the center of a terminal cell.
    pub fn unproject(&self, col: u16, row: u16) -> LngLat {
        let (dx, dy) = self.degrees_per_cell();
        let x = f64::from(col.saturating_sub(self.area.x)) + 0.5;
        let y = f64::from(row.saturating_sub(self.area.y)) + 0.5;
        LngLat::new(self.west + x * dx, self.north - y * dy)
    }
}
