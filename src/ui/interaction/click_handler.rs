//! Click action handler for overlay hit areas.

use std::time::Instant;

use super::hit_area::ClickAction;
use crate::app::{App, Focus};

/// Handle a click that landed on a registered hit area.
pub fn handle_click_action(app: &mut App, action: ClickAction, now: Instant) {
    app.mark_dirty();

    match action {
        ClickAction::FocusSearch => {
            app.focus = Focus::Search;
            tracing::debug!("Click: FocusSearch");
        }
        ClickAction::SelectResult(index) => {
            tracing::debug!(index, "Click: SelectResult");
            app.select_search_result(index, now);
        }
        ClickAction::Panel => {}
    }
}
