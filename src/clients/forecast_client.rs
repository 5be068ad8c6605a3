//! Client for the Open-Meteo marine forecast API.

use crate::clients::config::ClientConfig;
use crate::clients::error::FetchError;
use crate::clients::http::{build_client, send_checked};
use crate::types::forecast::{ForecastPayload, FORECAST_VARIABLES};
use crate::types::station::LatLon;
use log::info;
use reqwest::{Client, Request};

/// Fetches the hourly marine forecast for a coordinate.
pub struct ForecastClient {
    http: Client,
    url: String,
}

impl ForecastClient {
    /// Creates a client for the configured marine forecast endpoint.
    pub fn new(config: &ClientConfig) -> Result<Self, FetchError> {
        Ok(Self {
            http: build_client(config)?,
            url: config.forecast_url.clone(),
        })
    }

    /// The GET request for `location`: the six hourly wave and swell
    /// variables, timestamps in UTC.
    pub fn request(&self, location: LatLon) -> Result<Request, FetchError> {
        self.http
            .get(&self.url)
            .query(&[
                ("latitude", location.latitude().to_string()),
                ("longitude", location.longitude().to_string()),
                ("hourly", FORECAST_VARIABLES.join(",")),
                ("timezone", "UTC".to_string()),
            ])
            .build()
            .map_err(|e| FetchError::NetworkRequest(self.url.clone(), e))
    }

    /// Downloads and decodes the forecast for `location`.
    pub async fn fetch(&self, location: LatLon) -> Result<ForecastPayload, FetchError> {
        let request = self.request(location)?;
        let url = request.url().to_string();
        let response = send_checked(&self.http, request).await?;
        let bytes = response
            .bytes()
            .await
            .map_err(|e| FetchError::Body(url, e))?;
        let payload: ForecastPayload = serde_json::from_slice(&bytes)?;
        info!(
            "Received {} hourly forecast entries for {}",
            payload.hourly.time.len(),
            location
        );
        Ok(payload)
    }
}
