//! Time-indexed record series and the field sets of the two data sources.

use crate::types::field_value::FieldValue;
use chrono::{DateTime, Utc};
use std::fmt;

/// How the values of one field are combined inside an hour bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Aggregation {
    /// Arithmetic mean, for magnitudes (heights, periods, speeds, temperatures).
    Mean,
    /// Vector mean of angles in degrees, for directions.
    CircularMean,
}

/// A named field of a series together with its hourly aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub aggregation: Aggregation,
}

const fn mean(name: &'static str) -> FieldSpec {
    FieldSpec {
        name,
        aggregation: Aggregation::Mean,
    }
}

const fn circular(name: &'static str) -> FieldSpec {
    FieldSpec {
        name,
        aggregation: Aggregation::CircularMean,
    }
}

const HISTORICAL_FIELDS: [FieldSpec; 8] = [
    circular("wind_direction"),
    mean("wind_speed"),
    mean("wave_height"),
    mean("dominant_wave_period"),
    mean("average_wave_period"),
    circular("wave_direction"),
    mean("water_temp"),
    mean("tide"),
];

const FORECAST_FIELDS: [FieldSpec; 6] = [
    mean("wave_height"),
    circular("wave_direction"),
    mean("wave_period"),
    mean("swell_height"),
    circular("swell_direction"),
    mean("swell_period"),
];

/// Which source a series came from. Selects the field set and the
/// aggregation applied to each field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SeriesKind {
    /// Buoy observations.
    Historical,
    /// Model forecast.
    Forecast,
}

impl SeriesKind {
    /// The ordered field list. Record and hourly values are aligned to it.
    pub fn fields(&self) -> &'static [FieldSpec] {
        match self {
            SeriesKind::Historical => &HISTORICAL_FIELDS,
            SeriesKind::Forecast => &FORECAST_FIELDS,
        }
    }

    /// Position of `name` in [`SeriesKind::fields`].
    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.fields().iter().position(|field| field.name == name)
    }
}

impl fmt::Display for SeriesKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeriesKind::Historical => write!(f, "historical"),
            SeriesKind::Forecast => write!(f, "forecast"),
        }
    }
}

/// One timestamped set of measurements, aligned to a [`SeriesKind`]'s fields.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// Observation or forecast time, UTC.
    pub timestamp: DateTime<Utc>,
    /// One value per field of the series kind, in field order.
    pub values: Vec<FieldValue>,
}

/// An ordered-by-time run of records from one source.
///
/// Observation series come out of [`crate::parse_observations`], forecast
/// series out of [`crate::ForecastPayload::into_series`]. Both feed
/// [`crate::group_hourly`].
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    kind: SeriesKind,
    records: Vec<Record>,
}

impl Series {
    /// Builds a series, sorting the records by timestamp.
    pub fn new(kind: SeriesKind, mut records: Vec<Record>) -> Self {
        records.sort_by_key(|record| record.timestamp);
        Self { kind, records }
    }

    /// Source of the records, which fixes their field layout.
    pub fn kind(&self) -> SeriesKind {
        self.kind
    }

    /// Records in ascending timestamp order.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when no record survived parsing or filtering.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Looks up a field of one record by name. Unknown names yield `None`.
    pub fn value(&self, index: usize, field: &str) -> Option<&FieldValue> {
        let column = self.kind.field_index(field)?;
        self.records.get(index)?.values.get(column)
    }
}
