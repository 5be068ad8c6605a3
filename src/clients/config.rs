//! Endpoint and transport settings shared by the two clients.

use bon::Builder;
use log::warn;
use std::env;
use std::time::Duration;

pub const DEFAULT_OBSERVATION_BASE_URL: &str = "https://www.ndbc.noaa.gov/data/realtime2";
pub const DEFAULT_FORECAST_URL: &str = "https://marine-api.open-meteo.com/v1/marine";

pub const OBSERVATION_URL_VAR: &str = "BUOYCAST_OBSERVATION_URL";
pub const FORECAST_URL_VAR: &str = "BUOYCAST_FORECAST_URL";
pub const TIMEOUT_VAR: &str = "BUOYCAST_TIMEOUT_SECS";

/// Where observations and forecasts are fetched from.
///
/// # Examples
///
/// ```
/// use buoycast::ClientConfig;
/// use std::time::Duration;
///
/// let config = ClientConfig::builder()
///     .observation_base_url("http://localhost:8080/realtime2")
///     .timeout(Duration::from_secs(10))
///     .build();
/// assert_eq!(config.observation_base_url, "http://localhost:8080/realtime2");
/// assert_eq!(config.forecast_url, "https://marine-api.open-meteo.com/v1/marine");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Builder)]
pub struct ClientConfig {
    /// Directory holding `{station}.txt` realtime feeds.
    #[builder(into, default = DEFAULT_OBSERVATION_BASE_URL.to_string())]
    pub observation_base_url: String,
    /// Marine forecast endpoint.
    #[builder(into, default = DEFAULT_FORECAST_URL.to_string())]
    pub forecast_url: String,
    /// Per-request timeout. `None` leaves reqwest's default (no timeout).
    pub timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig::builder().build()
    }
}

impl ClientConfig {
    /// Defaults, overridden by `BUOYCAST_OBSERVATION_URL`, `BUOYCAST_FORECAST_URL`
    /// and `BUOYCAST_TIMEOUT_SECS` when set.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let timeout = lookup(TIMEOUT_VAR).and_then(|raw| match raw.trim().parse::<u64>() {
            Ok(secs) => Some(Duration::from_secs(secs)),
            Err(_) => {
                warn!("Ignoring {}='{}': not a whole number of seconds", TIMEOUT_VAR, raw);
                None
            }
        });
        ClientConfig::builder()
            .maybe_observation_base_url(lookup(OBSERVATION_URL_VAR))
            .maybe_forecast_url(lookup(FORECAST_URL_VAR))
            .maybe_timeout(timeout)
            .build()
    }
}
