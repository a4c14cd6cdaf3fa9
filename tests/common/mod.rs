//! Common test utilities for integration tests.
//!
//! ```ignore
//! mod common;
//! use common::*;
//!
//! let mock = mock_with_data(&[("nc1", -120.0, 37.0, Some(3.1))], &[]);
//! let (mut app, mut rx) = test_app(&mock);
//! ```

#![allow(dead_code)]

pub mod mocks;

pub use mocks::*;

use std::sync::Arc;
use std::time::Duration;

use quakes::app::{App, AppMessage};
use quakes::config::{Config, MapCredential};
use quakes::models::{EarthquakePoint, LngLat, Quake};
use quakes::ui;
use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::Terminal;
use tokio::sync::mpsc::UnboundedReceiver;

pub const WIDTH: u16 = 100;
pub const HEIGHT: u16 = 40;

pub fn test_config(credential: MapCredential) -> Config {
    Config::default()
        .with_credential(credential)
        .with_earthquake_feed_url(FEED_URL)
        .with_geocoding_url(GEOCODE_URL)
        .with_plate_boundaries_url(PLATES_URL)
}

/// An app with a configured credential, and its message receiver.
pub fn test_app(mock: &MockHttpClient) -> (App, UnboundedReceiver<AppMessage>) {
    app_with(mock, MapCredential::from_token("pk.test-token"))
}

pub fn app_with(
    mock: &MockHttpClient,
    credential: MapCredential,
) -> (App, UnboundedReceiver<AppMessage>) {
    let mut app = App::new(test_config(credential), Arc::new(mock.clone()));
    let rx = app.message_rx.take().expect("fresh app has a receiver");
    (app, rx)
}

/// Wait for the next message and hand it to the app.
pub async fn pump_one(app: &mut App, rx: &mut UnboundedReceiver<AppMessage>) -> bool {
    match tokio::time::timeout(Duration::from_secs(2), rx.recv()).await {
        Ok(Some(msg)) => {
            app.handle_message(msg);
            true
        }
        _ => false,
    }
}

pub fn draw(app: &mut App) -> Buffer {
    let mut terminal = Terminal::new(TestBackend::new(WIDTH, HEIGHT)).unwrap();
    terminal.draw(|f| ui::render(f, app)).unwrap();
    terminal.backend().buffer().clone()
}

pub fn buffer_text(buffer: &Buffer) -> String {
    let area = buffer.area;
    let mut text = String::new();
    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            text.push_str(buffer[(x, y)].symbol());
        }
        text.push('\n');
    }
    text
}

pub fn map_area() -> Rect {
    ui::compute_layout(Rect::new(0, 0, WIDTH, HEIGHT), 0, false).map
}

/// Terminal cell where `at` is drawn with the current camera.
pub fn cell_of(app: &mut App, at: LngLat) -> (u16, u16) {
    app.map
        .prepare(map_area())
        .viewport()
        .project(at)
        .expect("point is on screen")
}

pub fn key(code: crossterm::event::KeyCode) -> crossterm::event::KeyEvent {
    crossterm::event::KeyEvent::new(code, crossterm::event::KeyModifiers::NONE)
}

/// Type `text` into the focused search box, one key every `step`, ticking
/// the app after each key. Returns the time of the last keystroke.
pub fn type_text(
    app: &mut App,
    text: &str,
    start: std::time::Instant,
    step: Duration,
) -> std::time::Instant {
    let mut now = start;
    for (i, c) in text.chars().enumerate() {
        now = start + step * i as u32;
        app.tick(now);
        app.handle_key(key(crossterm::event::KeyCode::Char(c)), now);
    }
    now
}

pub fn mouse(
    kind: crossterm::event::MouseEventKind,
    column: u16,
    row: u16,
) -> crossterm::event::MouseEvent {
    crossterm::event::MouseEvent {
        kind,
        column,
        row,
        modifiers: crossterm::event::KeyModifiers::NONE,
    }
}

/// Press and release the left button on a cell.
pub fn click(app: &mut App, column: u16, row: u16, now: std::time::Instant) {
    use crossterm::event::{MouseButton, MouseEventKind};
    app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), column, row), now);
    app.handle_mouse(mouse(MouseEventKind::Up(MouseButton::Left), column, row), now);
}

pub fn quake_point(id: &str, lng: f64, lat: f64, magnitude: Option<f64>) -> EarthquakePoint {
    EarthquakePoint {
        id: id.to_string(),
        quake: Quake {
            title: format!("{id} quake"),
            magnitude,
            time_ms: 1_700_000_000_000,
            tsunami: 0,
        },
        center: LngLat::new(lng, lat),
    }
}

pub fn load_points(app: &mut App, points: Vec<EarthquakePoint>) {
    app.handle_message(AppMessage::EarthquakesLoaded(Ok(points)));
}

pub fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}
