//! Small state enums owned by [`App`](super::App).

/// Which widget receives key presses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    /// The search box (typing edits the query)
    #[default]
    Search,
    /// The map (arrow keys pan, `+`/`-` zoom)
    Map,
}

impl Focus {
    pub fn toggle(self) -> Self {
        match self {
            Focus::Search => Focus::Map,
            Focus::Map => Focus::Search,
        }
    }
}

/// What an outside click dismisses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DismissIntent {
    /// Clear the raw search query (results disappear once it settles)
    ClearQuery,
    /// Close the earthquake detail panel
    ClearQuake,
}

/// A left press on the map that may still become a click or a drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct MapPress {
    pub col: u16,
    pub row: u16,
    pub dragged: bool,
}
