//! The Open-Meteo marine forecast payload and its reshaping into a
//! forecast [`Series`].

use crate::types::field_value::FieldValue;
use crate::types::series::{Record, Series, SeriesKind};
use chrono::{DateTime, NaiveDateTime, Utc};
use log::debug;
use serde::Deserialize;

/// Maximum number of hourly forecast entries kept, counted from "now".
pub const FORECAST_HORIZON_HOURS: usize = 48;

/// Hourly variables requested from the forecast service, in request order.
pub const FORECAST_VARIABLES: [&str; 6] = [
    "wave_height",
    "wave_direction",
    "wave_period",
    "swell_wave_height",
    "swell_wave_direction",
    "swell_wave_period",
];

const TIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S"];

/// Top level of the marine forecast response. Only the hourly block is used.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ForecastPayload {
    pub hourly: HourlyBlock,
}

/// Column-oriented hourly arrays, aligned by index to `time`.
#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
pub struct HourlyBlock {
    pub time: Vec<String>,
    #[serde(default)]
    pub wave_height: Vec<Option<f64>>,
    #[serde(default)]
    pub wave_direction: Vec<Option<f64>>,
    #[serde(default)]
    pub wave_period: Vec<Option<f64>>,
    #[serde(default)]
    pub swell_wave_height: Vec<Option<f64>>,
    #[serde(default)]
    pub swell_wave_direction: Vec<Option<f64>>,
    #[serde(default)]
    pub swell_wave_period: Vec<Option<f64>>,
}

impl HourlyBlock {
    /// Values of entry `index`, in [`SeriesKind::Forecast`] field order.
    fn values_at(&self, index: usize) -> Vec<FieldValue> {
        [
            &self.wave_height,
            &self.wave_direction,
            &self.wave_period,
            &self.swell_wave_height,
            &self.swell_wave_direction,
            &self.swell_wave_period,
        ]
        .iter()
        .map(|column| FieldValue::from(column.get(index).copied().flatten()))
        .collect()
    }
}

/// Parses a naive ISO-8601 timestamp from the forecast service as UTC.
pub fn parse_forecast_time(raw: &str) -> Option<DateTime<Utc>> {
    TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(|naive| naive.and_utc())
}

impl ForecastPayload {
    /// Reshapes the payload into a forecast series restricted to entries at or
    /// after `now`, capped at [`FORECAST_HORIZON_HOURS`] entries.
    ///
    /// Entries whose timestamp does not parse are dropped.
    pub fn into_series(self, now: DateTime<Utc>) -> Series {
        let hourly = &self.hourly;
        let mut records: Vec<Record> = hourly
            .time
            .iter()
            .enumerate()
            .filter_map(|(index, raw)| match parse_forecast_time(raw) {
                Some(timestamp) => Some((index, timestamp)),
                None => {
                    debug!("Dropping forecast entry with unparseable time '{}'", raw);
                    None
                }
            })
            .filter(|(_, timestamp)| *timestamp >= now)
            .map(|(index, timestamp)| Record {
                timestamp,
                values: hourly.values_at(index),
            })
            .collect();
        records.sort_by_key(|record| record.timestamp);
        records.truncate(FORECAST_HORIZON_HOURS);
        Series::new(SeriesKind::Forecast, records)
    }
}
