//! Reqwest-based HTTP client adapter.

use async_trait::async_trait;
use std::time::Duration;

use crate::traits::{Headers, HttpClient, HttpError, Response};

/// Default per-request timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

/// HTTP client implementation using reqwest.
#[derive(Debug, Clone)]
pub struct ReqwestHttpClient {
    client: reqwest::Client,
}

impl ReqwestHttpClient {
    /// Create a new client with a request timeout and a descriptive user agent.
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("quakes/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_default();
        Self { client }
    }

    fn convert_error(err: reqwest::Error) -> HttpError {
        if err.is_timeout() {
            HttpError::Timeout(err.to_string())
        } else if err.is_connect() {
            HttpError::ConnectionFailed(err.to_string())
        } else if err.is_builder() {
            HttpError::InvalidUrl(err.to_string())
        } else {
            HttpError::Other(err.to_string())
        }
    }

    fn convert_headers(headers: &reqwest::header::HeaderMap) -> Headers {
        headers
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.to_string(), v.to_string()))
            })
            .collect()
    }
}

impl Default for ReqwestHttpClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn get(&self, url: &str, headers: &Headers) -> Result<Response, HttpError> {
        let mut builder = self.client.get(url);
        for (key, value) in headers {
            builder = builder.header(key, value);
        }

        let response = builder.send().await.map_err(Self::convert_error)?;

        let status = response.status().as_u16();
        let response_headers = Self::convert_headers(response.headers());
        let body = response.bytes().await.map_err(Self::convert_error)?;

        Ok(Response::with_headers(status, response_headers, body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_get_returns_status_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/fdsnws/event/1/query"))
            .and(query_param("format", "geojson"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"features":[]}"#))
            .mount(&server)
            .await;

        let client = ReqwestHttpClient::new();
        let url = format!("{}/fdsnws/event/1/query?format=geojson", server.uri());
        let response = client.get(&url, &Headers::new()).await.unwrap();

        assert_eq!(response.status, 200);
        assert_eq!(&response.body[..], br#"{"features":[]}"#);
    }

    #[tokio::test]
    async fn test_get_forwards_headers() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(header("accept", "application/geo+json"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let mut headers = Headers::new();
        headers.insert("accept".to_string(), "application/geo+json".to_string());
        let response = ReqwestHttpClient::new()
            .get(&server.uri(), &headers)
            .await
            .unwrap();
        assert_eq!(response.status, 204);
    }

    #[tokio::test]
    async fn test_error_status_is_not_a_transport_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let response = ReqwestHttpClient::new()
            .get(&server.uri(), &Headers::new())
            .await
            .unwrap();
        assert!(!response.is_success());
    }

    #[tokio::test]
    async fn test_invalid_url_is_an_error() {
        let result = ReqwestHttpClient::new()
            .get("not a url", &Headers::new())
            .await;
        assert!(result.is_err());
    }
}
