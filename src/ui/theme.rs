//! Color theme constants for the quakes UI.

use ratatui::style::Color;

use crate::models::Severity;

/// Border color for overlay panels
pub const COLOR_BORDER: Color = Color::DarkGray;

/// Focused input border
pub const COLOR_ACCENT: Color = Color::White;

/// Header text color
pub const COLOR_HEADER: Color = Color::White;

/// Dim text for placeholders and hints
pub const COLOR_DIM: Color = Color::DarkGray;

/// Translucent-looking panel background
pub const COLOR_PANEL_BG: Color = Color::Rgb(38, 38, 38);

/// Background of a hovered or highlighted result row
pub const COLOR_HIGHLIGHT_BG: Color = Color::Rgb(64, 64, 64);

/// Detail panel (border, background) for a severity tier.
pub fn severity_colors(severity: Severity) -> (Color, Color) {
    match severity {
        Severity::Minor => (Color::Rgb(64, 64, 64), COLOR_PANEL_BG),
        Severity::Moderate => (Color::Rgb(113, 63, 18), Color::Rgb(102, 86, 20)),
        Severity::Strong => (Color::Rgb(127, 29, 29), Color::Rgb(110, 40, 40)),
    }
}
