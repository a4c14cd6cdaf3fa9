//! Click resolution for the earthquake layers.
//!
//! ```text
//!            click: cluster            expansion resolved
//!   Idle ─────────────────────▶ ClusterExpanding ──────────▶ Idle (+ ease-to)
//!    │ ▲                                   │ failure / no zoom
//!    │ │ dismiss, search selection,       ▼
//!    │ │ click on nothing or a non-quake  Idle
//!    ▼ │
//!   DetailShown ◀── click: point with a magnitude (from any state)
//! ```
//!
//! The first feature under the pointer decides the transition. A magnitude
//! of zero is a real reading and opens the detail panel; only an absent
//! magnitude counts as "no earthquake".

use std::time::Duration;

use crate::error::ClusterError;
use crate::map::{CameraCommand, ClusterId, MapFeature};
use crate::models::{LngLat, Quake};

#[derive(Debug, Clone, PartialEq)]
pub enum SelectionState {
    Idle,
    ClusterExpanding { cluster_id: ClusterId, center: LngLat },
    DetailShown(Quake),
}

/// What the controller must do after a click.
#[derive(Debug, Clone, PartialEq)]
pub enum ClickOutcome {
    /// Nothing further; any previous selection has been cleared
    Cleared,
    /// Ask the data source for the cluster's expansion zoom
    ExpandCluster { cluster_id: ClusterId, center: LngLat },
    /// The detail panel now shows this earthquake
    ShowDetail,
}

#[derive(Debug, Clone)]
pub struct FeatureSelection {
    state: SelectionState,
    ease_duration: Duration,
}

impl FeatureSelection {
    pub fn new(ease_duration: Duration) -> Self {
        Self {
            state: SelectionState::Idle,
            ease_duration,
        }
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    /// The selected earthquake, if the detail panel is shown.
    pub fn selected(&self) -> Option<&Quake> {
        match &self.state {
            SelectionState::DetailShown(quake) => Some(quake),
            _ => None,
        }
    }

    pub fn is_expanding(&self) -> bool {
        matches!(self.state, SelectionState::ClusterExpanding { .. })
    }

    /// Resolve a map click from the features under the pointer, topmost
    /// first.
    pub fn on_click(&mut self, features: &[MapFeature]) -> ClickOutcome {
        match features.first() {
            Some(MapFeature::Cluster { id, center, .. }) => {
                tracing::debug!(cluster_id = id, "cluster clicked");
                self.state = SelectionState::ClusterExpanding {
                    cluster_id: *id,
                    center: *center,
                };
                ClickOutcome::ExpandCluster {
                    cluster_id: *id,
                    center: *center,
                }
            }
            Some(MapFeature::Point { quake, .. }) if quake.magnitude.is_some() => {
                tracing::debug!(title = %quake.title, "earthquake selected");
                self.state = SelectionState::DetailShown(quake.clone());
                ClickOutcome::ShowDetail
            }
            _ => {
                self.state = SelectionState::Idle;
                ClickOutcome::Cleared
            }
        }
    }

    /// Complete a cluster expansion lookup.
    ///
    /// Returns the camera command to issue, or `None` when the lookup failed,
    /// produced no zoom, or no longer matches the pending cluster.
    pub fn on_expansion_resolved(
        &mut self,
        cluster_id: ClusterId,
        result: Result<Option<f64>, ClusterError>,
    ) -> Option<CameraCommand> {
        let center = match self.state {
            SelectionState::ClusterExpanding {
                cluster_id: pending,
                center,
            } if pending == cluster_id => center,
            _ => {
                tracing::debug!(cluster_id, "stale cluster expansion ignored");
                return None;
            }
        };
        self.state = SelectionState::Idle;

        match result {
            Ok(Some(zoom)) if zoom.is_finite() => Some(CameraCommand::EaseTo {
                center,
                zoom,
                duration: self.ease_duration,
            }),
            Ok(_) => None,
            Err(err) => {
                tracing::debug!(cluster_id, error = %err, "cluster expansion failed");
                None
            }
        }
    }

    /// Clear the detail panel (outside click). Returns true if something
    /// was shown.
    pub fn dismiss(&mut self) -> bool {
        if matches!(self.state, SelectionState::DetailShown(_)) {
            self.state = SelectionState::Idle;
            true
        } else {
            false
        }
    }

    /// Drop any selection or pending expansion (search result chosen).
    pub fn clear(&mut self) {
        self.state = SelectionState::Idle;
    }
}
