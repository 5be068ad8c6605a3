//! Recent buoy observations and marine forecasts as hourly series.
//!
//! The pipeline parses the NDBC realtime feed of a buoy, aggregates it onto
//! UTC clock hours (circular mean for directions), does the same for an
//! Open-Meteo marine forecast, and splits both into calendar days for display.
//!
//! ```
//! use buoycast::{observation_pipeline, DayTarget};
//! use chrono::{TimeZone, Utc};
//!
//! let feed = "#YY  MM DD hh mm WDIR WSPD GST  WVHT   DPD   APD MWD   PRES  ATMP  WTMP  DEWP  VIS PTDY  TIDE\n\
//!             2024 01 01 10 00 290  7.0  9.0   1.5  12.0   8.1 285 1019.0  12.1    MM  10.0   MM   MM    MM\n";
//! let now = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
//!
//! let hourly = observation_pipeline(feed, now);
//! let today = hourly.partition(DayTarget::Today, now);
//! assert_eq!(today.column("wave_height"), Some(vec![Some(1.5)]));
//! assert_eq!(today.column("water_temp"), Some(vec![None]));
//! ```

mod aggregation;
mod clients;
mod error;
mod parsing;
mod partition;
mod prompt;
mod render;
mod report;
mod stations;
mod stats;
mod types;

pub use error::BuoycastError;

pub use aggregation::hourly::{group_hourly, hour_start, GAP_FILL_LIMIT};
pub use parsing::feed_parser::{parse_observations, MIN_COLUMNS, OBSERVATION_WINDOW_HOURS};
pub use partition::{partition_days, DayPartition, DayTarget};
pub use stats::circular::{arithmetic_mean, circular_mean};

pub use types::field_value::FieldValue;
pub use types::forecast::{
    parse_forecast_time, ForecastPayload, HourlyBlock, FORECAST_HORIZON_HOURS, FORECAST_VARIABLES,
};
pub use types::hourly::{HourlyRow, HourlySeries};
pub use types::series::{Aggregation, FieldSpec, Record, Series, SeriesKind};
pub use types::station::{LatLon, Station};

pub use clients::config::ClientConfig;
pub use clients::error::FetchError;
pub use clients::forecast_client::ForecastClient;
pub use clients::observation_client::ObservationClient;

pub use stations::registry::{StationRegistry, DEFAULT_LOCATION, DEFAULT_STATION_ID};

pub use prompt::{parse_coordinates, parse_station_id, Prompter};
pub use render::chart::{height_color, render_bar_chart};
pub use render::table::{configure_table_display, partition_to_dataframe, render_table};
pub use report::{forecast_pipeline, observation_pipeline, sections, Report, Section, SurfReporter};
