//! Client for the NDBC realtime observation feed.

use crate::clients::config::ClientConfig;
use crate::clients::error::FetchError;
use crate::clients::http::{build_client, send_checked};
use log::info;
use reqwest::Client;

/// Fetches the raw text feed of one buoy.
pub struct ObservationClient {
    http: Client,
    base_url: String,
}

impl ObservationClient {
    /// Creates a client for the configured feed base URL.
    pub fn new(config: &ClientConfig) -> Result<Self, FetchError> {
        Ok(Self {
            http: build_client(config)?,
            base_url: config.observation_base_url.trim_end_matches('/').to_string(),
        })
    }

    /// URL of the realtime text feed of one station.
    pub fn feed_url(&self, station_id: u32) -> String {
        format!("{}/{}.txt", self.base_url, station_id)
    }

    /// Downloads the feed text for `station_id`.
    ///
    /// # Errors
    ///
    /// [`FetchError::HttpStatus`] on a non-success status,
    /// [`FetchError::NetworkRequest`] if the request could not be sent, and
    /// [`FetchError::Body`] if the body is not readable text.
    pub async fn fetch(&self, station_id: u32) -> Result<String, FetchError> {
        let url = self.feed_url(station_id);
        let request = self
            .http
            .get(&url)
            .build()
            .map_err(|e| FetchError::NetworkRequest(url.clone(), e))?;
        let response = send_checked(&self.http, request).await?;
        let text = response
            .text()
            .await
            .map_err(|e| FetchError::Body(url.clone(), e))?;
        info!("Downloaded {} bytes of observations for buoy {}", text.len(), station_id);
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::http::test_server::serve_once;

    fn client_for(base_url: &str) -> ObservationClient {
        let config = ClientConfig::builder()
            .observation_base_url(base_url)
            .timeout(std::time::Duration::from_secs(5))
            .build();
        ObservationClient::new(&config).unwrap()
    }

    #[test]
    fn test_feed_url() {
        let client = client_for("https://www.ndbc.noaa.gov/data/realtime2/");
        assert_eq!(
            client.feed_url(46026),
            "https://www.ndbc.noaa.gov/data/realtime2/46026.txt"
        );
    }

    #[tokio::test]
    async fn test_fetch_returns_body() -> Result<(), Box<dyn std::error::Error>> {
        let body = "#YY  MM DD hh mm\n2024 01 01 10 00 290 7.0\n".to_string();
        let base = serve_once("200 OK", body.clone()).await;
        let text = client_for(&base).fetch(46026).await?;
        assert_eq!(text, body);
        Ok(())
    }

    #[tokio::test]
    async fn test_fetch_reports_status() {
        let base = serve_once("404 Not Found", String::new()).await;
        let error = client_for(&base).fetch(12345).await.unwrap_err();
        match error {
            FetchError::HttpStatus { status, url, .. } => {
                assert_eq!(status, reqwest::StatusCode::NOT_FOUND);
                assert!(url.ends_with("/12345.txt"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
