//! Clicking features on the map: earthquake detail, cluster expansion and
//! drags that must not count as clicks.

mod common;

use std::time::{Duration, Instant};

use common::*;
use crossterm::event::{MouseButton, MouseEventKind};
use quakes::app::{AppMessage, Focus};
use quakes::interaction::SelectionState;
use quakes::models::LngLat;

#[test]
fn test_clicking_a_quake_shows_its_detail() {
    let mock = MockHttpClient::new();
    let (mut app, _rx) = test_app(&mock);
    load_points(&mut app, vec![quake_point("nc7", -120.0, 37.0, Some(4.2))]);
    draw(&mut app);

    let (col, row) = cell_of(&mut app, LngLat::new(-120.0, 37.0));
    click(&mut app, col, row, Instant::now());

    let selected = app.selection.selected().expect("quake selected");
    assert_eq!(selected.title, "nc7 quake");
    assert_eq!(app.focus, Focus::Map);

    let text = buffer_text(&draw(&mut app));
    assert!(text.contains("nc7 quake"));
    assert!(text.contains("Date: "));
}

#[test]
fn test_zero_magnitude_still_shows_detail() {
    let mock = MockHttpClient::new();
    let (mut app, _rx) = test_app(&mock);
    load_points(&mut app, vec![quake_point("hv0", -120.0, 37.0, Some(0.0))]);
    draw(&mut app);

    let (col, row) = cell_of(&mut app, LngLat::new(-120.0, 37.0));
    click(&mut app, col, row, Instant::now());

    assert_eq!(
        app.selection.selected().and_then(|q| q.magnitude),
        Some(0.0)
    );
}

#[test]
fn test_quake_without_magnitude_shows_nothing() {
    let mock = MockHttpClient::new();
    let (mut app, _rx) = test_app(&mock);
    load_points(&mut app, vec![quake_point("ak1", -120.0, 37.0, None)]);
    draw(&mut app);

    let (col, row) = cell_of(&mut app, LngLat::new(-120.0, 37.0));
    click(&mut app, col, row, Instant::now());

    assert_eq!(app.selection.state(), &SelectionState::Idle);
    let text = buffer_text(&draw(&mut app));
    assert!(!text.contains("ak1 quake"));
}

#[test]
fn test_cluster_click_eases_to_expansion_zoom() {
    let mock = MockHttpClient::new();
    let (mut app, mut rx) = test_app(&mock);
    load_points(
        &mut app,
        vec![
            quake_point("nc1", -120.0, 37.0, Some(2.1)),
            quake_point("nc2", -120.0005, 37.0005, Some(3.4)),
        ],
    );
    draw(&mut app);

    let (col, row) = cell_of(&mut app, LngLat::new(-120.0, 37.0));
    let now = Instant::now();
    click(&mut app, col, row, now);

    let SelectionState::ClusterExpanding { cluster_id, center } = app.selection.state().clone()
    else {
        panic!("expected a cluster expansion, got {:?}", app.selection.state());
    };
    assert!(app.selection.selected().is_none());

    // The lookup answer is queued rather than applied inline.
    let Ok(AppMessage::ClusterExpansionResolved {
        cluster_id: resolved,
        result,
    }) = rx.try_recv()
    else {
        panic!("expected a queued expansion result");
    };
    assert_eq!(resolved, cluster_id);
    assert!(matches!(result, Ok(Some(z)) if z > 5.0));

    app.handle_message_at(
        AppMessage::ClusterExpansionResolved {
            cluster_id,
            result: Ok(Some(12.0)),
        },
        now,
    );
    assert_eq!(app.selection.state(), &SelectionState::Idle);

    app.tick(now + Duration::from_millis(250));
    assert!(app.map.camera().is_animating());
    app.tick(now + Duration::from_millis(500));
    assert!(!app.map.camera().is_animating());
    assert!(approx(app.map.camera().zoom(), 12.0));
    assert!(approx(app.map.camera().center().lng, center.lng));
    assert!(approx(app.map.camera().center().lat, center.lat));
}

#[test]
fn test_cluster_lookup_result_zooms_in() {
    let mock = MockHttpClient::new();
    let (mut app, mut rx) = test_app(&mock);
    load_points(
        &mut app,
        vec![
            quake_point("nc1", -120.0, 37.0, Some(2.1)),
            quake_point("nc2", -120.0005, 37.0005, Some(3.4)),
        ],
    );
    draw(&mut app);

    let (col, row) = cell_of(&mut app, LngLat::new(-120.0, 37.0));
    let now = Instant::now();
    click(&mut app, col, row, now);
    let Ok(msg) = rx.try_recv() else {
        panic!("expected a queued expansion result");
    };
    app.handle_message_at(msg, now);
    app.tick(now + Duration::from_secs(1));

    assert!(app.map.camera().zoom() > 5.0);
    assert_eq!(app.selection.state(), &SelectionState::Idle);
}

#[test]
fn test_drag_pans_without_selecting() {
    let mock = MockHttpClient::new();
    let (mut app, _rx) = test_app(&mock);
    load_points(&mut app, vec![quake_point("nc7", -120.0, 37.0, Some(4.2))]);
    draw(&mut app);

    let (col, row) = cell_of(&mut app, LngLat::new(-120.0, 37.0));
    let before = app.map.camera().center();
    let now = Instant::now();
    app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), col, row), now);
    app.handle_mouse(mouse(MouseEventKind::Drag(MouseButton::Left), col - 4, row), now);
    app.handle_mouse(mouse(MouseEventKind::Drag(MouseButton::Left), col, row), now);
    app.handle_mouse(mouse(MouseEventKind::Up(MouseButton::Left), col, row), now);

    assert!(app.selection.selected().is_none());
    // Dragged away and back: the camera ends where it started.
    assert!(approx(app.map.camera().center().lng, before.lng));
}

#[test]
fn test_click_on_empty_map_clears_selection() {
    let mock = MockHttpClient::new();
    let (mut app, _rx) = test_app(&mock);
    load_points(&mut app, vec![quake_point("nc7", -120.0, 37.0, Some(4.2))]);
    draw(&mut app);

    let (col, row) = cell_of(&mut app, LngLat::new(-120.0, 37.0));
    click(&mut app, col, row, Instant::now());
    assert!(app.selection.selected().is_some());
    draw(&mut app);

    click(&mut app, 60, 10, Instant::now());
    assert!(app.selection.selected().is_none());
}

#[test]
fn test_unconfigured_map_has_no_clickable_features() {
    let mock = MockHttpClient::new();
    let (mut app, _rx) = app_with(&mock, quakes::config::MapCredential::Unconfigured);
    load_points(&mut app, vec![quake_point("nc7", -120.0, 37.0, Some(4.2))]);
    let text = buffer_text(&draw(&mut app));
    assert!(text.contains("Map unavailable"));

    click(&mut app, 71, 23, Instant::now());
    assert!(app.selection.selected().is_none());
}
