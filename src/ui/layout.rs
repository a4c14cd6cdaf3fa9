//! Screen layout: the map fills the terminal and the panels float over it.

use ratatui::layout::Rect;

/// Maximum width of the search box.
pub const SEARCH_WIDTH: u16 = 40;
/// Maximum width of the results list.
pub const RESULTS_WIDTH: u16 = 48;
pub const LEGEND_WIDTH: u16 = 18;
/// "Magnitude" title plus six swatches, inside a border.
pub const LEGEND_HEIGHT: u16 = 9;
pub const DETAIL_WIDTH: u16 = 36;
pub const DETAIL_HEIGHT: u16 = 7;

/// Where everything goes for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiLayout {
    pub map: Rect,
    pub status: Rect,
    pub header: Rect,
    pub search_box: Rect,
    pub results: Option<Rect>,
    pub legend: Option<Rect>,
    pub detail: Option<Rect>,
}

pub fn compute_layout(area: Rect, result_count: usize, detail_shown: bool) -> UiLayout {
    let status_height = u16::from(area.height >= 2);
    let map = Rect {
        height: area.height - status_height,
        ..area
    };
    let status = Rect {
        y: map.y + map.height,
        height: status_height,
        ..area
    };

    let inner_width = map.width.saturating_sub(2);
    let header = Rect::new(map.x + 1, map.y, inner_width.min(SEARCH_WIDTH), 1).intersection(map);
    let search_box =
        Rect::new(map.x + 1, map.y + 1, inner_width.min(SEARCH_WIDTH), 3).intersection(map);

    let results = (result_count > 0)
        .then(|| {
            let height = (result_count as u16).saturating_add(2);
            Rect::new(
                map.x + 1,
                search_box.y + search_box.height,
                inner_width.min(RESULTS_WIDTH),
                height,
            )
            .intersection(map)
        })
        .filter(|r| r.height > 2);

    let legend = (map.height >= LEGEND_HEIGHT + 5 && map.width >= LEGEND_WIDTH + 2).then(|| {
        Rect::new(
            map.x + 1,
            map.y + map.height - LEGEND_HEIGHT,
            LEGEND_WIDTH,
            LEGEND_HEIGHT,
        )
    });

    let detail = (detail_shown && map.height >= DETAIL_HEIGHT && map.width >= 3).then(|| {
        let width = inner_width.min(DETAIL_WIDTH);
        Rect::new(
            map.x + map.width - width - 1,
            map.y + map.height - DETAIL_HEIGHT,
            width,
            DETAIL_HEIGHT,
        )
    });

    UiLayout {
        map,
        status,
        header,
        search_box,
        results,
        legend,
        detail,
    }
}
