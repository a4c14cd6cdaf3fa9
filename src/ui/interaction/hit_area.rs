//! Hit area registry for mouse interaction.
//!
//! Overlay widgets register the regions they draw during rendering, and the
//! event loop asks the registry what a click landed on. Map features are not
//! registered here; the map keeps its own feature hit list.

use ratatui::layout::{Position, Rect};
use ratatui::style::Style;

/// Represents an action that can be triggered by clicking a hit area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickAction {
    /// Give the search box keyboard focus
    FocusSearch,
    /// Choose the search result at this index
    SelectResult(usize),
    /// A click on an overlay panel with no action of its own; it must not
    /// reach the map underneath
    Panel,
}

/// A clickable region with an associated action.
#[derive(Debug, Clone)]
pub struct HitArea {
    pub rect: Rect,
    pub action: ClickAction,
    /// Optional style to apply when hovering over this area
    pub hover_style: Option<Style>,
}

impl HitArea {
    pub fn new(rect: Rect, action: ClickAction) -> Self {
        Self {
            rect,
            action,
            hover_style: None,
        }
    }

    #[inline]
    pub fn contains(&self, x: u16, y: u16) -> bool {
        self.rect.contains(Position::new(x, y))
    }
}

/// Registry of the hit areas drawn in the current frame.
///
/// Cleared at the start of every render. Areas registered later sit on top
/// of earlier ones. The pointer position survives a clear, so the hovered
/// area is known again as soon as it is re-registered.
#[derive(Debug, Default)]
pub struct HitAreaRegistry {
    areas: Vec<HitArea>,
    hovered: Option<usize>,
    pointer: Option<(u16, u16)>,
}

impl HitAreaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all registered areas. The last pointer position is kept.
    pub fn clear(&mut self) {
        self.areas.clear();
        self.hovered = None;
    }

    pub fn register(&mut self, rect: Rect, action: ClickAction, hover_style: Option<Style>) {
        let area = HitArea {
            rect,
            action,
            hover_style,
        };
        if let Some((x, y)) = self.pointer {
            if area.contains(x, y) {
                self.hovered = Some(self.areas.len());
            }
        }
        self.areas.push(area);
    }

    /// Action of the topmost area containing the point.
    pub fn hit_test(&self, x: u16, y: u16) -> Option<ClickAction> {
        self.topmost(x, y).map(|i| self.areas[i].action.clone())
    }

    /// Update the hover state. Returns true if it changed.
    pub fn update_hover(&mut self, x: u16, y: u16) -> bool {
        self.pointer = Some((x, y));
        let hovered = self.topmost(x, y);
        let changed = hovered != self.hovered;
        self.hovered = hovered;
        changed
    }

    fn topmost(&self, x: u16, y: u16) -> Option<usize> {
        self.areas
            .iter()
            .enumerate()
            .rev()
            .find(|(_, area)| area.contains(x, y))
            .map(|(i, _)| i)
    }

    /// Hover style for `rect` if it is the hovered area.
    pub fn get_hover_style(&self, rect: Rect) -> Option<Style> {
        let area = self.get_hovered()?;
        if area.rect == rect {
            area.hover_style
        } else {
            None
        }
    }

    pub fn get_hovered(&self) -> Option<&HitArea> {
        self.hovered.and_then(|i| self.areas.get(i))
    }

    pub fn len(&self) -> usize {
        self.areas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.areas.is_empty()
    }
}
