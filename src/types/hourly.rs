//! Hour-bucketed series produced by the aggregator.

use crate::types::series::{FieldSpec, SeriesKind};
use chrono::{DateTime, NaiveDate, Utc};

/// One aggregated UTC clock hour. `hour` is the bucket start, `values` are
/// aligned to the owning series' [`SeriesKind::fields`].
#[derive(Debug, Clone, PartialEq)]
pub struct HourlyRow {
    /// Start of the hour bucket, UTC.
    pub hour: DateTime<Utc>,
    /// Aggregated value per field, `None` where the hour had no reading.
    pub values: Vec<Option<f64>>,
}

impl HourlyRow {
    /// UTC calendar date of the bucket.
    pub fn date(&self) -> NaiveDate {
        self.hour.date_naive()
    }

    /// True when every field is `None`. Such rows are never stored.
    pub fn is_empty(&self) -> bool {
        self.values.iter().all(Option::is_none)
    }
}

/// An ascending run of hourly rows, one per hour that has at least one value.
#[derive(Debug, Clone, PartialEq)]
pub struct HourlySeries {
    kind: SeriesKind,
    hours: Vec<HourlyRow>,
}

impl HourlySeries {
    /// Wraps already ordered rows. Used by the aggregator.
    pub(crate) fn new(kind: SeriesKind, hours: Vec<HourlyRow>) -> Self {
        debug_assert!(hours.windows(2).all(|w| w[0].hour < w[1].hour));
        Self { kind, hours }
    }

    /// A series with no hours.
    pub fn empty(kind: SeriesKind) -> Self {
        Self {
            kind,
            hours: Vec::new(),
        }
    }

    /// Source the hours were aggregated from.
    pub fn kind(&self) -> SeriesKind {
        self.kind
    }

    /// Field layout of every row's `values`.
    pub fn fields(&self) -> &'static [FieldSpec] {
        self.kind.fields()
    }

    /// Rows in ascending hour order.
    pub fn hours(&self) -> &[HourlyRow] {
        &self.hours
    }

    /// Number of stored hours.
    pub fn len(&self) -> usize {
        self.hours.len()
    }

    /// True when no hour has any value.
    pub fn is_empty(&self) -> bool {
        self.hours.is_empty()
    }

    /// Value of `field` in the row starting at `hour`.
    pub fn value_at(&self, hour: DateTime<Utc>, field: &str) -> Option<f64> {
        let column = self.kind.field_index(field)?;
        let position = self.hours.binary_search_by_key(&hour, |row| row.hour).ok()?;
        self.hours[position].values[column]
    }

    /// All values of one field in row order.
    pub fn column(&self, field: &str) -> Option<Vec<Option<f64>>> {
        let column = self.kind.field_index(field)?;
        Some(self.hours.iter().map(|row| row.values[column]).collect())
    }
}
