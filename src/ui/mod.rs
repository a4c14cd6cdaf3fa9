//! UI rendering.
//!
//! The map fills the terminal; the header, search box, results list, legend
//! and detail panel float over it, with a one-line status bar at the bottom.
//! Rendering is also where clickable regions are recorded: overlay hit areas
//! go into the app's [`HitAreaRegistry`](interaction::HitAreaRegistry), and
//! the results list and detail panel are mounted for outside-click dismissal
//! exactly while they are on screen.

mod helpers;
pub mod interaction;
mod layout;
mod panels;
mod theme;

pub use helpers::{tail_to_width, truncate_to_width};
pub use interaction::{handle_click_action, ClickAction, HitAreaRegistry};
pub use layout::{compute_layout, UiLayout};
pub use panels::detail_lines;

use ratatui::Frame;

use crate::app::App;

/// Render one frame.
pub fn render(frame: &mut Frame, app: &mut App) {
    app.hit_registry.clear();

    let layout = compute_layout(
        frame.area(),
        app.search.results().len(),
        app.selection.selected().is_some(),
    );

    app.map.render(frame, layout.map);

    panels::render_header(frame, layout.header);
    panels::render_search_box(frame, layout.search_box, app);

    let results = layout.results.filter(|_| app.search.is_visible());
    if let Some(area) = results {
        panels::render_results(frame, area, app);
    }
    app.set_results_region(results);

    if let Some(area) = layout.legend {
        panels::render_legend(frame, area, app);
    }

    let detail = layout.detail.filter(|_| app.selection.selected().is_some());
    if let Some(area) = detail {
        panels::render_detail(frame, area, app);
    }
    app.set_detail_region(detail);

    panels::render_status(frame, layout.status, app);
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Instant;

    use super::*;
    use crate::adapters::mock::MockHttpClient;
    use crate::app::AppMessage;
    use crate::config::{Config, MapCredential};
    use crate::models::{GeocodeResult, LngLat, Quake};
    use ratatui::backend::TestBackend;
    use ratatui::buffer::Buffer;
    use ratatui::layout::Rect;
    use ratatui::Terminal;

    fn app(credential: MapCredential) -> App {
        App::new(
            Config::default().with_credential(credential),
            Arc::new(MockHttpClient::new()),
        )
    }

    fn draw(app: &mut App, width: u16, height: u16) -> Buffer {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|f| render(f, app)).unwrap();
        terminal.backend().buffer().clone()
    }

    fn buffer_text(buffer: &Buffer) -> String {
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

    fn show_results(app: &mut App, names: &[&str]) {
        let request = app.search.on_debounced("Oak").unwrap();
        let results = names
            .iter()
            .enumerate()
            .map(|(i, name)| GeocodeResult {
                id: format!("r{i}"),
                full_address: name.to_string(),
                center: LngLat::new(-122.0 + i as f64, 37.0),
            })
            .collect();
        app.handle_message(AppMessage::GeocodeResults {
            generation: request.generation,
            result: Ok(results),
        });
    }

    #[test]
    fn test_render_shows_header_placeholder_and_legend() {
        let mut app = app(MapCredential::from_token("pk.test"));
        let text = buffer_text(&draw(&mut app, 100, 40));
        assert!(text.contains("Quakes"));
        assert!(text.contains("Search city or region"));
        assert!(text.contains("Magnitude"));
        assert!(text.contains("5 or greater"));
        assert!(text.contains("Loading earthquakes"));
    }

    #[test]
    fn test_render_without_credential_shows_hint() {
        let mut app = app(MapCredential::Unconfigured);
        let text = buffer_text(&draw(&mut app, 100, 40));
        assert!(text.contains("Map unavailable"));
    }

    #[test]
    fn test_results_are_listed_and_mounted() {
        let mut app = app(MapCredential::from_token("pk.test"));
        show_results(&mut app, &["Oakland, California", "Oakland, Maine"]);
        let text = buffer_text(&draw(&mut app, 100, 40));
        assert!(text.contains("Oakland, California"));
        assert!(text.contains("Oakland, Maine"));

        let layout = compute_layout(Rect::new(0, 0, 100, 40), 2, false);
        let results = layout.results.unwrap();
        assert_eq!(
            app.hit_registry.hit_test(results.x + 2, results.y + 2),
            Some(ClickAction::SelectResult(1))
        );
        // The results region is mounted; the search box is outside it.
        let outside = app
            .dismiss
            .dispatch(crate::interaction::PointerDown::mouse(2, 2));
        assert_eq!(outside, vec![crate::app::DismissIntent::ClearQuery]);
    }

    #[test]
    fn test_hovered_result_row_is_highlighted() {
        let mut app = app(MapCredential::from_token("pk.test"));
        show_results(&mut app, &["Oakland, California", "Oakland, Maine"]);
        draw(&mut app, 100, 40);

        let results = compute_layout(Rect::new(0, 0, 100, 40), 2, false)
            .results
            .unwrap();
        let (col, first_row) = (results.x + 2, results.y + 1);
        assert!(app.hit_registry.update_hover(col, first_row));

        let buffer = draw(&mut app, 100, 40);
        let hovered = buffer[(col, first_row)].bg;
        let plain = buffer[(col, first_row + 1)].bg;
        assert_ne!(hovered, plain);
        assert_eq!(hovered, theme::COLOR_HIGHLIGHT_BG);
    }

    #[test]
    fn test_detail_panel_renders_selected_quake() {
        let mut app = app(MapCredential::from_token("pk.test"));
        let quake = Quake {
            title: "M 4.6 - 10 km SW of Ridgecrest".into(),
            magnitude: Some(4.6),
            time_ms: 1_700_000_000_000,
            tsunami: 1,
        };
        app.selection.on_click(&[crate::map::MapFeature::Point {
            id: "ci1".into(),
            quake: quake.clone(),
            center: LngLat::new(-117.6, 35.7),
        }]);
        let text = buffer_text(&draw(&mut app, 100, 40));
        assert!(text.contains("Ridgecrest"));
        assert!(text.contains(&format!("Date: {}", quake.local_time_string())));
        assert!(text.contains("Tsunami flag set"));

        app.handle_pointer_down(crate::interaction::PointerDown::mouse(50, 5), Instant::now());
        assert!(app.selection.selected().is_none());
        let text = buffer_text(&draw(&mut app, 100, 40));
        assert!(!text.contains("Ridgecrest"));
        assert!(app.dismiss.dispatch(crate::interaction::PointerDown::mouse(50, 5)).is_empty());
    }

    #[test]
    fn test_hidden_panels_are_unmounted() {
        let mut app = app(MapCredential::from_token("pk.test"));
        draw(&mut app, 100, 40);
        assert!(app
            .dismiss
            .dispatch(crate::interaction::PointerDown::mouse(0, 0))
            .is_empty());
    }
}
