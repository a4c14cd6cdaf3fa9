//! Typed client for the three remote data sources: the USGS earthquake feed,
//! the forward-geocoding endpoint and the static plate-boundary GeoJSON.

use std::sync::Arc;

use chrono::{Days, NaiveDate};
use serde::de::DeserializeOwned;

use crate::config::{Config, MapCredential};
use crate::error::{FetchError, FetchResult};
use crate::models::{
    BoundaryCollection, EarthquakePoint, FeedCollection, GeocodeResponse, GeocodeResult,
    PlateBoundary,
};
use crate::traits::{Headers, HttpClient};

const EARTHQUAKE_FEED: &str = "earthquake feed";
const GEOCODING: &str = "geocoding";
const PLATE_BOUNDARIES: &str = "plate boundaries";

/// Build the feed URL covering "yesterday to today".
pub fn earthquake_feed_url(base: &str, today: NaiveDate) -> String {
    let yesterday = today.checked_sub_days(Days::new(1)).unwrap_or(today);
    format!(
        "{}?format=geojson&starttime={}&endtime={}",
        base,
        yesterday.format("%Y-%m-%d"),
        today.format("%Y-%m-%d")
    )
}

/// Build the forward-geocoding URL for `query`.
pub fn geocode_url(base: &str, query: &str, token: &str) -> String {
    format!(
        "{}?q={}&access_token={}",
        base,
        urlencoding::encode(query),
        urlencoding::encode(token)
    )
}

/// Client for the remote data sources. Cheap to clone.
#[derive(Clone)]
pub struct QuakesApi {
    client: Arc<dyn HttpClient>,
    credential: MapCredential,
    earthquake_feed_url: String,
    geocoding_url: String,
    plate_boundaries_url: String,
}

impl QuakesApi {
    pub fn new(client: Arc<dyn HttpClient>, config: &Config) -> Self {
        Self {
            client,
            credential: config.credential.clone(),
            earthquake_feed_url: config.earthquake_feed_url.clone(),
            geocoding_url: config.geocoding_url.clone(),
            plate_boundaries_url: config.plate_boundaries_url.clone(),
        }
    }

    /// Earthquakes between yesterday and `today`.
    pub async fn fetch_earthquakes(&self, today: NaiveDate) -> FetchResult<Vec<EarthquakePoint>> {
        let url = earthquake_feed_url(&self.earthquake_feed_url, today);
        let feed: FeedCollection = self.get_json(EARTHQUAKE_FEED, &url).await?;
        Ok(feed.into_points())
    }

    /// Ranked matches for `query`.
    ///
    /// Returns [`FetchError::Unconfigured`] without touching the network when
    /// no credential is available.
    pub async fn geocode(&self, query: &str) -> FetchResult<Vec<GeocodeResult>> {
        let token = self
            .credential
            .token()
            .ok_or(FetchError::Unconfigured(GEOCODING))?;
        let url = geocode_url(&self.geocoding_url, query, token);
        let response: GeocodeResponse = self.get_json(GEOCODING, &url).await?;
        Ok(response.into_results())
    }

    pub async fn fetch_plate_boundaries(&self) -> FetchResult<Vec<PlateBoundary>> {
        let url = self.plate_boundaries_url.clone();
        let collection: BoundaryCollection = self.get_json(PLATE_BOUNDARIES, &url).await?;
        Ok(collection.into_boundaries())
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        source_name: &'static str,
        url: &str,
    ) -> FetchResult<T> {
        let response = self.client.get(url, &Headers::new()).await?;
        if !response.is_success() {
            return Err(FetchError::Status {
                source_name,
                status: response.status,
            });
        }
        response
            .json()
            .map_err(|error| FetchError::Decode { source_name, error })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::{MockHttpClient, MockResponse};

    fn api(mock: &MockHttpClient, credential: MapCredential) -> QuakesApi {
        let config = Config::default()
            .with_credential(credential)
            .with_earthquake_feed_url("https://feed.test/query")
            .with_geocoding_url("https://geo.test/forward")
            .with_plate_boundaries_url("https://plates.test/pb.json");
        QuakesApi::new(Arc::new(mock.clone()), &config)
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_feed_url_spans_yesterday_to_today() {
        assert_eq!(
            earthquake_feed_url("https://feed.test/query", date(2024, 3, 1)),
            "https://feed.test/query?format=geojson&starttime=2024-02-29&endtime=2024-03-01"
        );
    }

    #[test]
    fn test_geocode_url_encodes_query() {
        assert_eq!(
            geocode_url("https://geo.test/forward", "San José & co", "pk.1"),
            "https://geo.test/forward?q=San%20Jos%C3%A9%20%26%20co&access_token=pk.1"
        );
    }

    #[tokio::test]
    async fn test_fetch_earthquakes_decodes_points() {
        let mock = MockHttpClient::new();
        mock.set_response(
            "https://feed.test/query",
            MockResponse::ok(
                r#"{"features":[{"id":"a","properties":{"mag":1.5,"title":"M 1.5","time":1,"tsunami":0},
                    "geometry":{"coordinates":[10.0,20.0,5.0]}}]}"#,
            ),
        );
        let points = api(&mock, MapCredential::Unconfigured)
            .fetch_earthquakes(date(2024, 1, 2))
            .await
            .unwrap();
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].quake.title, "M 1.5");
    }

    #[tokio::test]
    async fn test_geocode_without_credential_skips_request() {
        let mock = MockHttpClient::new();
        let result = api(&mock, MapCredential::Unconfigured).geocode("Oakland").await;
        assert!(matches!(result, Err(FetchError::Unconfigured(_))));
        assert!(mock.get_requests().is_empty());
    }

    #[tokio::test]
    async fn test_geocode_with_credential() {
        let mock = MockHttpClient::new();
        mock.set_response(
            "https://geo.test/forward",
            MockResponse::ok(
                r#"{"features":[{"id":"o","properties":{"full_address":"Oakland, CA"},
                    "geometry":{"coordinates":[-122.27,37.8]}}]}"#,
            ),
        );
        let results = api(&mock, MapCredential::from_token("pk.1"))
            .geocode("Oakland")
            .await
            .unwrap();
        assert_eq!(results[0].full_address, "Oakland, CA");
        assert_eq!(
            mock.get_requests()[0].url,
            "https://geo.test/forward?q=Oakland&access_token=pk.1"
        );
    }

    #[tokio::test]
    async fn test_status_and_decode_errors() {
        let mock = MockHttpClient::new();
        mock.set_response("https://plates.test", MockResponse::status(500));
        let result = api(&mock, MapCredential::Unconfigured)
            .fetch_plate_boundaries()
            .await;
        assert!(matches!(result, Err(FetchError::Status { status: 500, .. })));

        mock.set_response("https://plates.test", MockResponse::ok("<html>"));
        let result = api(&mock, MapCredential::Unconfigured)
            .fetch_plate_boundaries()
            .await;
        assert!(matches!(result, Err(FetchError::Decode { .. })));
    }
}
