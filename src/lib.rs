//! quakes - a terminal map of recent earthquakes
//!
//! This library exposes modules for use in integration tests and benches.

pub mod adapters;
pub mod api;
pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod interaction;
pub mod logging;
pub mod map;
pub mod models;
pub mod terminal;
pub mod traits;
pub mod ui;
