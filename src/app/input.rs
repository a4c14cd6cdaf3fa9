//! Keyboard and mouse handling for the App.
//!
//! Pointer-down events are offered to the dismiss registry first, then routed
//! to a hit area or the map. A press on the map becomes a feature click only
//! if it is released without dragging.

use std::time::Instant;

use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::interaction::{ClickOutcome, PointerDown};
use crate::map::ZOOM_STEP;
use crate::ui::interaction::handle_click_action;

use super::types::MapPress;
use super::{App, DismissIntent, Focus};

/// Cells panned per arrow key press.
const PAN_COLS: i32 = 8;
const PAN_ROWS: i32 = 4;

impl App {
    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        self.mark_dirty();

        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.quit();
                return;
            }
            KeyCode::Tab | KeyCode::BackTab => {
                self.focus = self.focus.toggle();
                return;
            }
            KeyCode::Esc => {
                self.apply_dismiss(DismissIntent::ClearQuake, now);
                self.apply_dismiss(DismissIntent::ClearQuery, now);
                return;
            }
            _ => {}
        }

        match self.focus {
            Focus::Search => self.handle_search_key(key, now),
            Focus::Map => self.handle_map_key(key),
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent, now: Instant) {
        match key.code {
            KeyCode::Char(c)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                self.query.push(c, now);
            }
            KeyCode::Backspace => self.query.pop(now),
            KeyCode::Down => self.search.highlight_next(),
            KeyCode::Up => self.search.highlight_prev(),
            KeyCode::Enter => {
                let index = self
                    .search
                    .highlighted()
                    .or_else(|| self.search.is_visible().then_some(0));
                if let Some(index) = index {
                    self.select_search_result(index, now);
                }
            }
            _ => {}
        }
    }

    fn handle_map_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Left => self.map.pan_cells(-PAN_COLS, 0),
            KeyCode::Right => self.map.pan_cells(PAN_COLS, 0),
            KeyCode::Up => self.map.pan_cells(0, PAN_ROWS),
            KeyCode::Down => self.map.pan_cells(0, -PAN_ROWS),
            KeyCode::Char('+') | KeyCode::Char('=') => self.map.zoom_by(ZOOM_STEP),
            KeyCode::Char('-') => self.map.zoom_by(-ZOOM_STEP),
            KeyCode::Char('/') => self.focus = Focus::Search,
            KeyCode::Char('q') => self.quit(),
            _ => {}
        }
    }

    pub fn handle_mouse(&mut self, event: MouseEvent, now: Instant) {
        let (col, row) = (event.column, event.row);
        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.handle_pointer_down(PointerDown::mouse(col, row), now);
                if let Some(action) = self.hit_registry.hit_test(col, row) {
                    handle_click_action(self, action, now);
                } else if self.map.contains(col, row) {
                    self.map.begin_drag(col, row);
                    self.map_press = Some(MapPress {
                        col,
                        row,
                        dragged: false,
                    });
                }
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                if self.map.drag_to(col, row) {
                    if let Some(press) = self.map_press.as_mut() {
                        press.dragged = true;
                    }
                    self.mark_dirty();
                }
            }
            MouseEventKind::Up(MouseButton::Left) => {
                self.map.end_drag();
                if let Some(press) = self.map_press.take() {
                    if !press.dragged {
                        self.click_map(press.col, press.row);
                    }
                }
            }
            MouseEventKind::Moved => {
                if self.hit_registry.update_hover(col, row) {
                    self.mark_dirty();
                }
            }
            MouseEventKind::ScrollUp if self.map.contains(col, row) => {
                self.map.zoom_by(ZOOM_STEP);
                self.mark_dirty();
            }
            MouseEventKind::ScrollDown if self.map.contains(col, row) => {
                self.map.zoom_by(-ZOOM_STEP);
                self.mark_dirty();
            }
            _ => {}
        }
    }

    /// Offer a pointer-down to the outside-click listeners.
    pub fn handle_pointer_down(&mut self, event: PointerDown, now: Instant) {
        for intent in self.dismiss.dispatch(event) {
            self.apply_dismiss(intent, now);
        }
    }

    fn apply_dismiss(&mut self, intent: DismissIntent, now: Instant) {
        match intent {
            DismissIntent::ClearQuery => {
                if !self.query.raw().is_empty() {
                    self.query.set_raw("", now);
                    self.mark_dirty();
                }
            }
            DismissIntent::ClearQuake => {
                if self.selection.dismiss() {
                    self.mark_dirty();
                }
            }
        }
    }

    /// Resolve a click on the map at a cell.
    pub fn click_map(&mut self, col: u16, row: u16) {
        let features = self.map.features_at(col, row);
        if let ClickOutcome::ExpandCluster { cluster_id, .. } = self.selection.on_click(&features) {
            self.request_cluster_expansion(cluster_id);
        }
        self.focus = Focus::Map;
        self.mark_dirty();
    }
}
