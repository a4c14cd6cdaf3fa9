//! Test doubles for the adapter traits.

pub mod http;

pub use http::{MockHttpClient, MockResponse, RecordedRequest};
