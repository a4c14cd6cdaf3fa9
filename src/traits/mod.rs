//! Trait abstractions for dependency injection and testability.
//!
//! - [`HttpClient`] - read-only HTTP access to the remote data sources

pub mod http;

pub use http::{Headers, HttpClient, HttpError, Response};
