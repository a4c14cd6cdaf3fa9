//! Interaction logic between the input widgets and the map: the debounced
//! search query, outside-click dismissal, click resolution on map features,
//! and the search results panel.
//!
//! None of these types touch the terminal or the network. They take the
//! current time and pointer positions as arguments and return intents for
//! the [`App`](crate::app::App) to carry out.

pub mod debounce;
pub mod outside_click;
pub mod search;
pub mod selection;

pub use debounce::DebouncedQuery;
pub use outside_click::{DismissRegistry, PointerDown, PointerKind, Subscription};
pub use search::{SearchPanel, SearchRequest};
pub use selection::{ClickOutcome, FeatureSelection, SelectionState};
