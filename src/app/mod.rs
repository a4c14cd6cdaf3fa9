//! Application state and logic for the TUI.
//!
//! [`App`] is the only owner of mutable interaction state: the search query,
//! the selected earthquake, the dismiss registry and the map. Background
//! tasks never touch it directly; they post an [`AppMessage`] which the UI
//! loop hands to [`App::handle_message`].

mod handlers;
mod input;
mod messages;
mod types;

pub use messages::AppMessage;
pub use types::{DismissIntent, Focus};

use std::sync::Arc;
use std::time::Instant;

use ratatui::layout::Rect;
use tokio::sync::mpsc;

use crate::api::QuakesApi;
use crate::config::Config;
use crate::interaction::{
    DebouncedQuery, DismissRegistry, FeatureSelection, SearchPanel, SearchRequest, Subscription,
};
use crate::map::{ClusterId, MapView};
use crate::traits::HttpClient;
use crate::ui::interaction::HitAreaRegistry;

use types::MapPress;

/// Main application state
pub struct App {
    pub config: Config,
    api: QuakesApi,
    /// Raw and debounced search text
    pub query: DebouncedQuery,
    /// Click resolution state, including the selected earthquake
    pub selection: FeatureSelection,
    /// Geocoding results for the settled query
    pub search: SearchPanel,
    pub map: MapView,
    /// Outside-click listeners for the results list and the detail panel
    pub dismiss: DismissRegistry<DismissIntent>,
    results_subscription: Option<Subscription>,
    detail_subscription: Option<Subscription>,
    /// Clickable regions registered during the last render
    pub hit_registry: HitAreaRegistry,
    pub focus: Focus,
    /// Receiver for async messages; taken by the event loop
    pub message_rx: Option<mpsc::UnboundedReceiver<AppMessage>>,
    /// Sender for async messages (clone this to pass to async tasks)
    pub message_tx: mpsc::UnboundedSender<AppMessage>,
    /// Dirty flag: set on state mutations, cleared after each draw
    pub needs_redraw: bool,
    pub should_quit: bool,
    pub tick_count: u64,
    /// Whether the earthquake feed has answered (successfully or not)
    pub earthquakes_loaded: bool,
    map_press: Option<MapPress>,
}

impl App {
    pub fn new(config: Config, client: Arc<dyn HttpClient>) -> Self {
        let (message_tx, message_rx) = mpsc::unbounded_channel();
        let api = QuakesApi::new(client, &config);

        let mut dismiss = DismissRegistry::new();
        let results_subscription = dismiss.subscribe(DismissIntent::ClearQuery);
        let detail_subscription = dismiss.subscribe(DismissIntent::ClearQuake);

        Self {
            query: DebouncedQuery::new(config.search_debounce),
            selection: FeatureSelection::new(config.cluster_ease_duration),
            search: SearchPanel::new(config.fly_to_zoom),
            map: MapView::new(&config),
            api,
            config,
            dismiss,
            results_subscription: Some(results_subscription),
            detail_subscription: Some(detail_subscription),
            hit_registry: HitAreaRegistry::new(),
            focus: Focus::default(),
            message_rx: Some(message_rx),
            message_tx,
            needs_redraw: true,
            should_quit: false,
            tick_count: 0,
            earthquakes_loaded: false,
            map_press: None,
        }
    }

    pub fn mark_dirty(&mut self) {
        self.needs_redraw = true;
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Start fetching the earthquake feed and the plate boundaries.
    ///
    /// Must be called from within a tokio runtime.
    pub fn load_initial_data(&self) {
        let api = self.api.clone();
        let tx = self.message_tx.clone();
        tokio::spawn(async move {
            let today = chrono::Local::now().date_naive();
            let result = api.fetch_earthquakes(today).await;
            let _ = tx.send(AppMessage::EarthquakesLoaded(result));
        });

        let api = self.api.clone();
        let tx = self.message_tx.clone();
        tokio::spawn(async move {
            let result = api.fetch_plate_boundaries().await;
            let _ = tx.send(AppMessage::PlateBoundariesLoaded(result));
        });
    }

    /// Periodic update: settle the debounced query and advance camera
    /// animation.
    pub fn tick(&mut self, now: Instant) {
        self.tick_count = self.tick_count.wrapping_add(1);

        if let Some(settled) = self.query.poll(now) {
            if let Some(request) = self.search.on_debounced(&settled) {
                self.spawn_geocode(request);
            }
            self.mark_dirty();
        }

        if self.map.tick(now) {
            self.mark_dirty();
        }
    }

    fn spawn_geocode(&self, request: SearchRequest) {
        let api = self.api.clone();
        let tx = self.message_tx.clone();
        tokio::spawn(async move {
            let result = api.geocode(&request.query).await;
            let _ = tx.send(AppMessage::GeocodeResults {
                generation: request.generation,
                result,
            });
        });
    }

    /// Ask the earthquake source for a cluster's expansion zoom. The answer
    /// arrives as an [`AppMessage::ClusterExpansionResolved`].
    fn request_cluster_expansion(&self, cluster_id: ClusterId) {
        let result = self.map.cluster_source().cluster_expansion_zoom(cluster_id);
        let _ = self
            .message_tx
            .send(AppMessage::ClusterExpansionResolved { cluster_id, result });
    }

    /// Choose a geocoding result: fly there and reset the query and the
    /// selected earthquake.
    pub fn select_search_result(&mut self, index: usize, now: Instant) {
        if let Some(command) = self.search.select(index) {
            self.query.reset();
            self.selection.clear();
            self.map.apply(command, now);
            self.mark_dirty();
        }
    }

    /// Mount or unmount the results list region for outside-click dismissal.
    pub fn set_results_region(&mut self, region: Option<Rect>) {
        if let Some(subscription) = &self.results_subscription {
            match region {
                Some(rect) => self.dismiss.mount(subscription, rect),
                None => self.dismiss.unmount(subscription),
            }
        }
    }

    /// Mount or unmount the detail panel region for outside-click dismissal.
    pub fn set_detail_region(&mut self, region: Option<Rect>) {
        if let Some(subscription) = &self.detail_subscription {
            match region {
                Some(rect) => self.dismiss.mount(subscription, rect),
                None => self.dismiss.unmount(subscription),
            }
        }
    }

    /// Release listeners and pending timers before exit.
    pub fn shutdown(&mut self) {
        self.query.cancel();
        if let Some(subscription) = self.results_subscription.take() {
            self.dismiss.unsubscribe(subscription);
        }
        if let Some(subscription) = self.detail_subscription.take() {
            self.dismiss.unsubscribe(subscription);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::MockHttpClient;
    use crate::config::MapCredential;

    fn app() -> App {
        let config = Config::default().with_credential(MapCredential::from_token("pk.test"));
        App::new(config, Arc::new(MockHttpClient::new()))
    }

    #[test]
    fn test_new_app_starts_dirty_and_focused_on_search() {
        let app = app();
        assert!(app.needs_redraw);
        assert_eq!(app.focus, Focus::Search);
        assert_eq!(app.dismiss.len(), 2);
        assert!(app.selection.selected().is_none());
    }

    #[test]
    fn test_regions_mount_and_unmount() {
        let mut app = app();
        let rect = Rect::new(0, 0, 10, 5);
        app.set_results_region(Some(rect));
        app.set_detail_region(Some(rect));
        assert_eq!(
            app.dismiss.dispatch(crate::interaction::PointerDown::mouse(50, 50)),
            vec![DismissIntent::ClearQuery, DismissIntent::ClearQuake]
        );
        app.set_results_region(None);
        assert_eq!(
            app.dismiss.dispatch(crate::interaction::PointerDown::mouse(50, 50)),
            vec![DismissIntent::ClearQuake]
        );
    }

    #[test]
    fn test_shutdown_releases_listeners() {
        let mut app = app();
        app.query.set_raw("Oak", Instant::now());
        app.shutdown();
        assert!(app.dismiss.is_empty());
        assert!(!app.query.is_pending());
        // Regions can no longer be mounted.
        app.set_detail_region(Some(Rect::new(0, 0, 1, 1)));
        assert!(app.dismiss.is_empty());
    }
}
