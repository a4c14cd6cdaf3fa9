//! Trailing-edge debounce for the search query.
//!
//! `raw` follows every keystroke; `debounced` only catches up once `raw` has
//! been left alone for the quiet interval. There is never more than one
//! pending deadline: each new `set_raw` replaces it. The owner drives the
//! timer by calling [`DebouncedQuery::poll`] from its tick.

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct DebouncedQuery {
    raw: String,
    debounced: String,
    quiet: Duration,
    deadline: Option<Instant>,
}

impl DebouncedQuery {
    pub fn new(quiet: Duration) -> Self {
        Self {
            raw: String::new(),
            debounced: String::new(),
            quiet,
            deadline: None,
        }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn debounced(&self) -> &str {
        &self.debounced
    }

    pub fn quiet(&self) -> Duration {
        self.quiet
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Store new input and restart the quiet period.
    pub fn set_raw(&mut self, text: impl Into<String>, now: Instant) {
        self.raw = text.into();
        self.deadline = Some(now + self.quiet);
    }

    /// Append a character to the raw input.
    pub fn push(&mut self, c: char, now: Instant) {
        let mut text = std::mem::take(&mut self.raw);
        text.push(c);
        self.set_raw(text, now);
    }

    /// Remove the last character of the raw input. No-op on empty input.
    pub fn pop(&mut self, now: Instant) {
        if self.raw.is_empty() {
            return;
        }
        let mut text = std::mem::take(&mut self.raw);
        text.pop();
        self.set_raw(text, now);
    }

    /// Emit the settled value once the deadline has passed.
    ///
    /// Returns `Some` exactly once per quiet period.
    pub fn poll(&mut self, now: Instant) -> Option<String> {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                self.debounced = self.raw.clone();
                tracing::debug!(query = %self.debounced, "search query settled");
                Some(self.debounced.clone())
            }
            _ => None,
        }
    }

    /// Drop the pending update, if any. Safe to call repeatedly.
    pub fn cancel(&mut self) -> bool {
        self.deadline.take().is_some()
    }

    /// Back to empty input with nothing pending.
    pub fn reset(&mut self) {
        self.raw.clear();
        self.debounced.clear();
        self.deadline = None;
    }
}
