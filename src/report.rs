//! Runs the observation and forecast pipelines for one buoy and assembles
//! their day sections for display.
//!
//! The two pipelines are independent: each ends in a `Result`, and a failed
//! fetch only removes that source's sections from the output. A section whose
//! table cannot be built is replaced by a notice without affecting the rest.

use crate::aggregation::hourly::group_hourly;
use crate::clients::config::ClientConfig;
use crate::clients::error::FetchError;
use crate::clients::forecast_client::ForecastClient;
use crate::clients::observation_client::ObservationClient;
use crate::error::BuoycastError;
use crate::parsing::feed_parser::parse_observations;
use crate::partition::{DayPartition, DayTarget};
use crate::render::chart::render_bar_chart;
use crate::render::table::render_table;
use crate::types::forecast::ForecastPayload;
use crate::types::hourly::HourlySeries;
use crate::types::series::SeriesKind;
use crate::types::station::LatLon;
use chrono::{DateTime, Utc};
use log::{error, info, warn};

/// Parse then aggregate a raw observation feed.
pub fn observation_pipeline(raw: &str, now: DateTime<Utc>) -> HourlySeries {
    let series = parse_observations(raw, now);
    let hourly = group_hourly(&series);
    info!(
        "Aggregated {} observations into {} hours",
        series.len(),
        hourly.len()
    );
    hourly
}

/// Reshape then aggregate a forecast payload.
pub fn forecast_pipeline(payload: ForecastPayload, now: DateTime<Utc>) -> HourlySeries {
    let series = payload.into_series(now);
    let hourly = group_hourly(&series);
    info!(
        "Aggregated {} forecast entries into {} hours",
        series.len(),
        hourly.len()
    );
    hourly
}

/// A non-empty day partition with its display titles.
#[derive(Debug, Clone, PartialEq)]
pub struct Section<'a> {
    pub title: String,
    pub chart_title: &'static str,
    pub partition: DayPartition<'a>,
}

impl Section<'_> {
    /// Table followed by bar chart.
    pub fn render(&self) -> Result<String, BuoycastError> {
        let table = render_table(&self.partition, &self.title)?;
        let chart = render_bar_chart(&self.partition, self.chart_title);
        Ok(format!("{table}\n{chart}"))
    }
}

fn titles(target: DayTarget, station_id: u32) -> (String, &'static str) {
    match target {
        DayTarget::Yesterday => (
            format!("Yesterday's Surf Conditions (NOAA Buoy {station_id})"),
            "Yesterday's Wave Height Chart",
        ),
        DayTarget::Today => (
            format!("Today's Surf Conditions So Far (NOAA Buoy {station_id})"),
            "Today's Wave Height Chart (Historical)",
        ),
        DayTarget::RestOfToday => (
            "Forecast for Rest of Today (Open-Meteo Model)".to_string(),
            "Rest of Today's Wave Height Forecast",
        ),
        DayTarget::Tomorrow => (
            "Tomorrow's Wave Forecast (Open-Meteo Model)".to_string(),
            "Tomorrow's Wave Height Forecast",
        ),
        DayTarget::DayAfterTomorrow => (
            "Day After Tomorrow's Wave Forecast (Open-Meteo Model)".to_string(),
            "Day After Tomorrow's Wave Height Forecast",
        ),
    }
}

/// The non-empty day sections of `series`, in display order.
pub fn sections(series: &HourlySeries, station_id: u32, now: DateTime<Utc>) -> Vec<Section<'_>> {
    DayTarget::for_kind(series.kind())
        .iter()
        .map(|&target| series.partition(target, now))
        .filter(|partition| !partition.is_empty())
        .map(|partition| {
            let (title, chart_title) = titles(partition.target, station_id);
            Section {
                title,
                chart_title,
                partition,
            }
        })
        .collect()
}

/// Outcome of one run: each source's hourly series or the reason it is absent.
#[derive(Debug)]
pub struct Report {
    pub station_id: u32,
    pub location: LatLon,
    pub now: DateTime<Utc>,
    pub observations: Result<HourlySeries, FetchError>,
    pub forecast: Result<HourlySeries, FetchError>,
}

impl Report {
    /// All sections as printable text. A failed source is replaced by a
    /// one-line notice; empty days are left out.
    pub fn render(&self) -> String {
        self.render_with(|section| section.render())
    }

    /// Like [`Report::render`], with `render_section` producing each
    /// section's text. A section that fails is replaced by a notice.
    fn render_with<F>(&self, mut render_section: F) -> String
    where
        F: FnMut(&Section<'_>) -> Result<String, BuoycastError>,
    {
        let mut out = String::new();
        for (kind, source) in [
            (SeriesKind::Historical, &self.observations),
            (SeriesKind::Forecast, &self.forecast),
        ] {
            self.render_source(&mut out, kind, source, &mut render_section);
        }
        out
    }

    fn render_source<F>(
        &self,
        out: &mut String,
        kind: SeriesKind,
        source: &Result<HourlySeries, FetchError>,
        render_section: &mut F,
    ) where
        F: FnMut(&Section<'_>) -> Result<String, BuoycastError>,
    {
        match source {
            Ok(series) => {
                for section in sections(series, self.station_id, self.now) {
                    match render_section(&section) {
                        Ok(text) => out.push_str(&text),
                        Err(e) => {
                            error!("Could not render '{}': {}", section.title, e);
                            out.push_str(&format!("Failed to display {}.\n", section.title));
                        }
                    }
                }
            }
            Err(_) => {
                let notice = match kind {
                    SeriesKind::Historical => "Failed to fetch conditions data.",
                    SeriesKind::Forecast => "Failed to fetch forecast data.",
                };
                out.push_str(notice);
                out.push('\n');
            }
        }
    }
}

/// Fetches both sources for one buoy, one after the other.
///
/// Clients are built per run, so a client that cannot be constructed only
/// fails its own source.
#[derive(Debug, Clone)]
pub struct SurfReporter {
    config: ClientConfig,
}

impl SurfReporter {
    /// Creates a reporter using `config` for both clients.
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }

    async fn fetch_observations(
        &self,
        station_id: u32,
        now: DateTime<Utc>,
    ) -> Result<HourlySeries, FetchError> {
        let raw = ObservationClient::new(&self.config)?.fetch(station_id).await?;
        Ok(observation_pipeline(&raw, now))
    }

    async fn fetch_forecast(
        &self,
        location: LatLon,
        now: DateTime<Utc>,
    ) -> Result<HourlySeries, FetchError> {
        let payload = ForecastClient::new(&self.config)?.fetch(location).await?;
        Ok(forecast_pipeline(payload, now))
    }

    /// Runs both pipelines. Never fails as a whole: each source carries its
    /// own result.
    pub async fn run(&self, station_id: u32, location: LatLon, now: DateTime<Utc>) -> Report {
        let observations = self.fetch_observations(station_id, now).await;
        if let Err(e) = &observations {
            warn!("Observations for buoy {} unavailable: {}", station_id, e);
        }

        let forecast = self.fetch_forecast(location, now).await;
        if let Err(e) = &forecast {
            warn!("Forecast for {} unavailable: {}", location, e);
        }

        Report {
            station_id,
            location,
            now,
            observations,
            forecast,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::http::test_server::serve_once;
    use crate::types::forecast::HourlyBlock;
    use chrono::{Duration, TimeZone};

    const FEED: &str = "\
#YY  MM DD hh mm WDIR WSPD GST  WVHT   DPD   APD MWD   PRES  ATMP  WTMP  DEWP  VIS PTDY  TIDE
#yr  mo dy hr mn degT m/s  m/s     m   sec   sec degT   hPa  degC  degC  degC  nmi  hPa    ft
2024 01 01 10 00 290  7.0  9.0   1.5  12.0   8.1 285 1019.0  12.1    MM  10.0   MM   MM    MM
";

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap()
    }

    fn forecast_payload(start: DateTime<Utc>, hours: i64) -> ForecastPayload {
        ForecastPayload {
            hourly: HourlyBlock {
                time: (0..hours)
                    .map(|h| (start + Duration::hours(h)).format("%Y-%m-%dT%H:%M").to_string())
                    .collect(),
                wave_height: (0..hours).map(|_| Some(1.5)).collect(),
                wave_direction: (0..hours).map(|_| Some(280.0)).collect(),
                ..Default::default()
            },
        }
    }

    #[test]
    fn test_single_row_end_to_end() {
        let hourly = observation_pipeline(FEED, now());
        let date = chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let rows = hourly.rows_on(date);

        assert_eq!(rows.len(), 1);
        let hour = Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap();
        assert_eq!(rows[0].hour, hour);
        assert_eq!(hourly.value_at(hour, "wave_height"), Some(1.5));
        assert_eq!(hourly.value_at(hour, "water_temp"), None);
    }

    #[test]
    fn test_forecast_truncated_to_48_hours() {
        let hourly = forecast_pipeline(forecast_payload(now(), 50), now());
        assert_eq!(hourly.len(), 48);
        assert_eq!(hourly.hours()[47].hour, now() + Duration::hours(47));
    }

    #[test]
    fn test_sections_skip_empty_days() {
        let hourly = observation_pipeline(FEED, now());
        let sections = sections(&hourly, 46026, now());
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].partition.target, DayTarget::Today);
        assert_eq!(
            sections[0].title,
            "Today's Surf Conditions So Far (NOAA Buoy 46026)"
        );
        assert_eq!(sections[0].chart_title, "Today's Wave Height Chart (Historical)");
    }

    #[test]
    fn test_forecast_sections_cover_three_days() {
        let hourly = forecast_pipeline(forecast_payload(now(), 48), now());
        let sections = sections(&hourly, 46026, now());
        let targets: Vec<_> = sections.iter().map(|s| s.partition.target).collect();
        assert_eq!(
            targets,
            vec![
                DayTarget::RestOfToday,
                DayTarget::Tomorrow,
                DayTarget::DayAfterTomorrow
            ]
        );
        let hours: usize = sections.iter().map(|s| s.partition.len()).sum();
        assert_eq!(hours, 48);
    }

    #[tokio::test]
    async fn test_failed_source_does_not_block_the_other() -> Result<(), Box<dyn std::error::Error>> {
        let observation_base = serve_once("503 Service Unavailable", String::new()).await;
        let start = Utc::now();
        let payload = forecast_payload(start - Duration::hours(1), 6);
        let hourly = &payload.hourly;
        let body = serde_json::json!({
            "hourly": {
                "time": hourly.time,
                "wave_height": hourly.wave_height,
                "wave_direction": hourly.wave_direction,
            }
        })
        .to_string();
        let forecast_url = serve_once("200 OK", body).await;

        let config = ClientConfig::builder()
            .observation_base_url(observation_base)
            .forecast_url(forecast_url)
            .timeout(std::time::Duration::from_secs(5))
            .build();
        let report = SurfReporter::new(config)
            .run(46026, LatLon(37.75, -122.84), start)
            .await;

        assert!(matches!(report.observations, Err(FetchError::HttpStatus { .. })));
        let forecast = report.forecast.as_ref().map_err(|e| e.to_string())?;
        assert!(!forecast.is_empty());

        let rendered = report.render();
        assert!(rendered.starts_with("Failed to fetch conditions data.\n"));
        assert!(!rendered.contains("Failed to fetch forecast data."));
        Ok(())
    }

    #[test]
    fn test_render_with_both_failed() {
        let bad_json = || {
            FetchError::JsonParse(serde_json::from_str::<ForecastPayload>("{").unwrap_err())
        };
        let report = Report {
            station_id: 46026,
            location: LatLon(37.75, -122.84),
            now: now(),
            observations: Err(bad_json()),
            forecast: Err(bad_json()),
        };
        assert_eq!(
            report.render(),
            "Failed to fetch conditions data.\nFailed to fetch forecast data.\n"
        );
    }

    #[tokio::test]
    async fn test_unusable_observation_url_keeps_forecast() {
        let start = Utc::now();
        let payload = forecast_payload(start - Duration::hours(1), 6);
        let body = serde_json::json!({
            "hourly": {
                "time": payload.hourly.time,
                "wave_height": payload.hourly.wave_height,
            }
        })
        .to_string();
        let forecast_url = serve_once("200 OK", body).await;

        let config = ClientConfig::builder()
            .observation_base_url("not a url")
            .forecast_url(forecast_url)
            .timeout(std::time::Duration::from_secs(5))
            .build();
        let report = SurfReporter::new(config)
            .run(46026, LatLon(37.75, -122.84), start)
            .await;

        assert!(matches!(report.observations, Err(FetchError::NetworkRequest(..))));
        assert!(report.forecast.is_ok());
        assert!(report.render().starts_with("Failed to fetch conditions data.\n"));
    }

    #[test]
    fn test_failed_section_does_not_drop_the_others() {
        let report = Report {
            station_id: 46026,
            location: LatLon(37.75, -122.84),
            now: now(),
            observations: Ok(observation_pipeline(FEED, now())),
            forecast: Ok(forecast_pipeline(forecast_payload(now(), 48), now())),
        };
        let rendered = report.render_with(|section| match section.partition.target {
            DayTarget::Tomorrow => Err(BuoycastError::Table(
                polars::error::PolarsError::ComputeError("no frame".into()),
            )),
            _ => Ok(format!("[{}]\n", section.title)),
        });

        assert_eq!(
            rendered,
            "[Today's Surf Conditions So Far (NOAA Buoy 46026)]\n\
             [Forecast for Rest of Today (Open-Meteo Model)]\n\
             Failed to display Tomorrow's Wave Forecast (Open-Meteo Model).\n\
             [Day After Tomorrow's Wave Forecast (Open-Meteo Model)]\n"
        );
    }
}
