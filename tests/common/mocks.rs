//! Mock HTTP setup and GeoJSON fixtures.

pub use quakes::adapters::mock::{MockHttpClient, MockResponse};

use serde_json::{json, Value};

pub const FEED_URL: &str = "https://feed.test/fdsnws/event/1/query";
pub const GEOCODE_URL: &str = "https://geo.test/search/geocode/v6/forward";
pub const PLATES_URL: &str = "https://plates.test/PB2002_boundaries.json";

/// One feed feature: `(id, lng, lat, mag)`.
pub type FeedEntry<'a> = (&'a str, f64, f64, Option<f64>);

pub fn feed_json(entries: &[FeedEntry]) -> String {
    let features: Vec<Value> = entries
        .iter()
        .map(|(id, lng, lat, mag)| {
            json!({
                "type": "Feature",
                "id": id,
                "properties": {
                    "title": format!("M {} - near {}", mag.map(|m| m.to_string()).unwrap_or_default(), id),
                    "mag": mag,
                    "time": 1_700_000_000_000_i64,
                    "tsunami": 0
                },
                "geometry": { "type": "Point", "coordinates": [lng, lat, 8.0] }
            })
        })
        .collect();
    json!({ "type": "FeatureCollection", "features": features }).to_string()
}

pub fn geocode_json(places: &[(&str, f64, f64)]) -> String {
    let features: Vec<Value> = places
        .iter()
        .enumerate()
        .map(|(i, (address, lng, lat))| {
            json!({
                "type": "Feature",
                "id": format!("dXJuOm1ieHBsYzo{i}"),
                "properties": { "full_address": address, "name": address },
                "geometry": { "type": "Point", "coordinates": [lng, lat] }
            })
        })
        .collect();
    json!({ "type": "FeatureCollection", "features": features }).to_string()
}

pub fn plates_json() -> String {
    json!({
        "type": "FeatureCollection",
        "features": [{
            "type": "Feature",
            "properties": { "Name": "NA-PA" },
            "geometry": {
                "type": "LineString",
                "coordinates": [[-125.0, 40.0], [-122.0, 37.0], [-117.0, 32.0]]
            }
        }]
    })
    .to_string()
}

/// A mock answering all three endpoints successfully.
pub fn mock_with_data(feed: &[FeedEntry], places: &[(&str, f64, f64)]) -> MockHttpClient {
    let mock = MockHttpClient::new();
    mock.set_response(FEED_URL, MockResponse::ok(feed_json(feed)));
    mock.set_response(GEOCODE_URL, MockResponse::ok(geocode_json(places)));
    mock.set_response(PLATES_URL, MockResponse::ok(plates_json()));
    mock
}
