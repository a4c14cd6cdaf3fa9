//! Overlay panels: header, search box, results list, magnitude legend,
//! earthquake detail and the status line.

use ratatui::{
    layout::{Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::app::{App, Focus};
use crate::map::magnitude_legend;
use crate::models::Quake;

use super::helpers::{tail_to_width, truncate_to_width};
use super::interaction::ClickAction;
use super::theme::{
    severity_colors, COLOR_ACCENT, COLOR_BORDER, COLOR_DIM, COLOR_HEADER, COLOR_HIGHLIGHT_BG,
    COLOR_PANEL_BG,
};

const SEARCH_PLACEHOLDER: &str = "Search city or region";

fn panel_block(border: Color, background: Color) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border))
        .style(Style::default().bg(background))
}

pub fn render_header(frame: &mut Frame, area: Rect) {
    let header = Line::from(vec![
        Span::styled("◉ ", Style::default().fg(Color::Rgb(0xe5, 0x4a, 0x30))),
        Span::styled(
            "Quakes",
            Style::default()
                .fg(COLOR_HEADER)
                .add_modifier(Modifier::BOLD),
        ),
    ]);
    frame.render_widget(Paragraph::new(header), area);
}

pub fn render_search_box(frame: &mut Frame, area: Rect, app: &mut App) {
    let focused = app.focus == Focus::Search;
    let border = if focused { COLOR_ACCENT } else { COLOR_BORDER };
    let block = panel_block(border, COLOR_PANEL_BG);
    let inner = block.inner(area);

    let raw = app.query.raw();
    let text = if raw.is_empty() {
        Span::styled(SEARCH_PLACEHOLDER, Style::default().fg(COLOR_DIM))
    } else {
        let visible = tail_to_width(raw, inner.width.saturating_sub(1) as usize);
        Span::styled(visible.to_string(), Style::default().fg(Color::White))
    };

    frame.render_widget(Clear, area);
    frame.render_widget(Paragraph::new(Line::from(text)).block(block), area);

    if focused && inner.width > 0 && inner.height > 0 {
        let typed = if raw.is_empty() {
            0
        } else {
            tail_to_width(raw, inner.width.saturating_sub(1) as usize).width() as u16
        };
        frame.set_cursor_position(Position::new(inner.x + typed, inner.y));
    }

    app.hit_registry
        .register(area, ClickAction::FocusSearch, None);
}

pub fn render_results(frame: &mut Frame, area: Rect, app: &mut App) {
    let block = panel_block(Color::Rgb(212, 212, 212), COLOR_PANEL_BG);
    let inner = block.inner(area);
    frame.render_widget(Clear, area);
    frame.render_widget(block, area);

    let hover = Style::default().bg(COLOR_HIGHLIGHT_BG);
    let highlighted = app.search.highlighted();
    let rows: Vec<(Rect, String)> = app
        .search
        .results()
        .iter()
        .take(inner.height as usize)
        .enumerate()
        .map(|(i, result)| {
            let row = Rect::new(inner.x, inner.y + i as u16, inner.width, 1);
            let label = truncate_to_width(&result.full_address, inner.width as usize);
            (row, label)
        })
        .collect();

    for (i, (row, label)) in rows.into_iter().enumerate() {
        let mut style = Style::default().fg(Color::White);
        if highlighted == Some(i) {
            style = style.bg(COLOR_HIGHLIGHT_BG);
        }
        app.hit_registry
            .register(row, ClickAction::SelectResult(i), Some(hover));
        if let Some(hovered) = app.hit_registry.get_hover_style(row) {
            style = style.patch(hovered);
        }
        frame.render_widget(Paragraph::new(Span::styled(label, style)), row);
    }
}

pub fn render_legend(frame: &mut Frame, area: Rect, app: &mut App) {
    let block = panel_block(COLOR_BORDER, COLOR_PANEL_BG);
    let mut lines = vec![Line::from(Span::styled(
        "Magnitude",
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    ))];
    for item in magnitude_legend() {
        lines.push(Line::from(vec![
            Span::styled("● ", Style::default().fg(item.color)),
            Span::styled(item.title, Style::default().fg(Color::White)),
        ]));
    }
    frame.render_widget(Clear, area);
    frame.render_widget(Paragraph::new(lines).block(block), area);
    app.hit_registry.register(area, ClickAction::Panel, None);
}

/// Lines shown in the detail panel for an earthquake.
pub fn detail_lines(quake: &Quake) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(Span::styled(
            "◉ Earthquake",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(quake.title.clone()),
        Line::from(format!("Date: {}", quake.local_time_string())),
    ];
    if quake.has_tsunami_flag() {
        lines.push(Line::from(Span::styled(
            "Tsunami flag set",
            Style::default().fg(Color::LightCyan),
        )));
    }
    lines
}

pub fn render_detail(frame: &mut Frame, area: Rect, app: &mut App) {
    let Some(quake) = app.selection.selected() else {
        return;
    };
    let (border, background) = severity_colors(quake.severity());
    let paragraph = Paragraph::new(detail_lines(quake))
        .style(Style::default().fg(Color::White))
        .wrap(Wrap { trim: true })
        .block(panel_block(border, background));
    frame.render_widget(Clear, area);
    frame.render_widget(paragraph, area);
    app.hit_registry.register(area, ClickAction::Panel, None);
}

pub fn render_status(frame: &mut Frame, area: Rect, app: &App) {
    let data = if !app.earthquakes_loaded {
        "Loading earthquakes…".to_string()
    } else {
        format!("{} earthquakes", app.map.earthquake_count())
    };
    let focus = match app.focus {
        Focus::Search => "search",
        Focus::Map => "map",
    };
    let line = Line::from(vec![
        Span::styled(format!(" {} ", data), Style::default().fg(Color::White)),
        Span::styled(
            format!("· zoom {:.1} · focus: {} ", app.map.camera().zoom(), focus),
            Style::default().fg(COLOR_DIM),
        ),
        Span::styled(
            "· Tab focus · ←↑↓→ pan · +/- zoom · Esc dismiss · Ctrl+C quit",
            Style::default().fg(COLOR_DIM),
        ),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}
