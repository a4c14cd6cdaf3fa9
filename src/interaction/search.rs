//! Location search: binds the debounced query to geocoding results.
//!
//! Every non-empty query the panel accepts is tagged with a generation
//! number. Results arriving for an older generation are dropped, so a slow
//! response can never overwrite the results of a newer query.

use crate::error::FetchError;
use crate::map::CameraCommand;
use crate::models::GeocodeResult;

/// A geocoding request the controller should issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub generation: u64,
    pub query: String,
}

#[derive(Debug, Clone)]
pub struct SearchPanel {
    /// Query of the current generation
    query: String,
    generation: u64,
    results: Vec<GeocodeResult>,
    highlighted: Option<usize>,
    fly_to_zoom: f64,
}

impl SearchPanel {
    pub fn new(fly_to_zoom: f64) -> Self {
        Self {
            query: String::new(),
            generation: 0,
            results: Vec::new(),
            highlighted: None,
            fly_to_zoom,
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn results(&self) -> &[GeocodeResult] {
        &self.results
    }

    pub fn highlighted(&self) -> Option<usize> {
        self.highlighted
    }

    /// The results list is drawn only while there is something to show.
    pub fn is_visible(&self) -> bool {
        !self.results.is_empty()
    }

    /// React to a newly settled query.
    ///
    /// An empty query clears the results and invalidates any request in
    /// flight without issuing a new one. Re-emitting the query of the current
    /// generation is a no-op.
    pub fn on_debounced(&mut self, query: &str) -> Option<SearchRequest> {
        if query.is_empty() {
            if !self.query.is_empty() || !self.results.is_empty() {
                self.generation += 1;
            }
            self.query.clear();
            self.clear_results();
            return None;
        }
        if query == self.query {
            return None;
        }

        self.generation += 1;
        self.query = query.to_string();
        self.clear_results();
        tracing::debug!(generation = self.generation, query, "geocoding requested");
        Some(SearchRequest {
            generation: self.generation,
            query: self.query.clone(),
        })
    }

    /// Accept a geocoding response. Returns true if it was applied.
    ///
    /// A failed request shows an empty list.
    pub fn on_results(
        &mut self,
        generation: u64,
        result: Result<Vec<GeocodeResult>, FetchError>,
    ) -> bool {
        if generation != self.generation {
            tracing::debug!(
                generation,
                current = self.generation,
                "stale geocoding response dropped"
            );
            return false;
        }
        match result {
            Ok(results) => {
                tracing::debug!(count = results.len(), "geocoding results");
                self.results = results;
            }
            Err(err) => {
                tracing::warn!(error = %err, query = %self.query, "geocoding failed");
                self.results.clear();
            }
        }
        self.highlighted = None;
        true
    }

    pub fn highlight_next(&mut self) {
        if self.results.is_empty() {
            return;
        }
        self.highlighted = Some(match self.highlighted {
            Some(i) if i + 1 < self.results.len() => i + 1,
            Some(i) => i,
            None => 0,
        });
    }

    pub fn highlight_prev(&mut self) {
        if let Some(i) = self.highlighted {
            self.highlighted = i.checked_sub(1);
        }
    }

    /// Choose a result. Returns the camera command for it and resets the
    /// panel; the caller resets the query and the selected earthquake.
    pub fn select(&mut self, index: usize) -> Option<CameraCommand> {
        let result = self.results.get(index)?;
        let command = CameraCommand::FlyTo {
            center: result.center,
            zoom: self.fly_to_zoom,
        };
        tracing::debug!(address = %result.full_address, "search result selected");
        self.reset();
        Some(command)
    }

    pub fn select_highlighted(&mut self) -> Option<CameraCommand> {
        self.highlighted.and_then(|i| self.select(i))
    }

    /// Forget the current query and results, invalidating any request in
    /// flight.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.query.clear();
        self.clear_results();
    }

    fn clear_results(&mut self) {
        self.results.clear();
        self.highlighted = None;
    }
}
