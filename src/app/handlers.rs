//! Message handling for the App.

use std::time::Instant;

use super::{App, AppMessage};

impl App {
    /// Handle an incoming async message.
    ///
    /// Failed loads are logged and leave the corresponding layer empty.
    pub fn handle_message(&mut self, msg: AppMessage) {
        self.handle_message_at(msg, Instant::now());
    }

    pub fn handle_message_at(&mut self, msg: AppMessage, now: Instant) {
        self.mark_dirty();
        match msg {
            AppMessage::EarthquakesLoaded(result) => {
                self.earthquakes_loaded = true;
                match result {
                    Ok(points) => {
                        tracing::info!(count = points.len(), "earthquakes loaded");
                        self.map.set_earthquakes(points);
                    }
                    Err(err) => {
                        tracing::warn!(error = %err, "earthquake feed unavailable");
                        self.map.set_earthquakes(Vec::new());
                    }
                }
            }
            AppMessage::PlateBoundariesLoaded(result) => match result {
                Ok(boundaries) => {
                    tracing::info!(count = boundaries.len(), "plate boundaries loaded");
                    self.map.set_plate_boundaries(boundaries);
                }
                Err(err) => {
                    tracing::warn!(error = %err, "plate boundaries unavailable");
                }
            },
            AppMessage::GeocodeResults { generation, result } => {
                self.search.on_results(generation, result);
            }
            AppMessage::ClusterExpansionResolved { cluster_id, result } => {
                if let Some(command) = self.selection.on_expansion_resolved(cluster_id, result) {
                    self.map.apply(command, now);
                }
            }
        }
    }
}
