//! Resampling of record series onto UTC clock-hour buckets.

use crate::stats::circular::{arithmetic_mean, circular_mean};
use crate::types::hourly::{HourlyRow, HourlySeries};
use crate::types::series::{Aggregation, FieldSpec, Record, Series, SeriesKind};
use chrono::{DateTime, Duration, Timelike, Utc};
use log::debug;
use std::collections::BTreeMap;

/// Number of consecutive empty hours that may be filled from the hour before.
pub const GAP_FILL_LIMIT: usize = 1;

/// Start of the UTC clock hour containing `timestamp`.
pub fn hour_start(timestamp: DateTime<Utc>) -> DateTime<Utc> {
    timestamp
        .with_minute(0)
        .and_then(|t| t.with_second(0))
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(timestamp)
}

/// Aggregates `series` into one row per UTC hour.
///
/// Each field is combined with the aggregation its [`crate::SeriesKind`]
/// assigns (mean or circular mean) over the numeric values present in the
/// bucket. An hour without any input record takes the values of the hour
/// before it, for at most [`GAP_FILL_LIMIT`] consecutive hours. Hours left
/// with no value at all are dropped.
pub fn group_hourly(series: &Series) -> HourlySeries {
    let kind = series.kind();
    let fields = kind.fields();

    let mut buckets: BTreeMap<DateTime<Utc>, Vec<&Record>> = BTreeMap::new();
    for record in series.records() {
        buckets
            .entry(hour_start(record.timestamp))
            .or_default()
            .push(record);
    }

    let mut rows = Vec::with_capacity(buckets.len() * (1 + GAP_FILL_LIMIT));
    let mut populated = buckets.iter().peekable();
    while let Some((&hour, records)) = populated.next() {
        let values = aggregate_bucket(fields, records);
        let next = populated.peek().map(|(next, _)| **next);

        // Empty hours directly after this one, up to the next populated hour.
        // Nothing is filled past the last record.
        let fills: Vec<_> = match next {
            Some(next) => (1..=GAP_FILL_LIMIT)
                .map_while(|offset| hour.checked_add_signed(Duration::hours(offset as i64)))
                .take_while(|gap| *gap < next)
                .collect(),
            None => Vec::new(),
        };

        push_row(&mut rows, HourlyRow { hour, values: values.clone() }, kind);
        for gap in fills {
            push_row(&mut rows, HourlyRow { hour: gap, values: values.clone() }, kind);
        }
    }

    HourlySeries::new(kind, rows)
}

fn push_row(rows: &mut Vec<HourlyRow>, row: HourlyRow, kind: SeriesKind) {
    if row.is_empty() {
        debug!("No {} values for hour {}", kind, row.hour);
    } else {
        rows.push(row);
    }
}

fn aggregate_bucket(fields: &[FieldSpec], records: &[&Record]) -> Vec<Option<f64>> {
    fields
        .iter()
        .enumerate()
        .map(|(column, field)| {
            let present = records
                .iter()
                .map(|record| record.values.get(column).and_then(|value| value.as_number()));
            match field.aggregation {
                Aggregation::Mean => arithmetic_mean(present),
                Aggregation::CircularMean => circular_mean(present),
            }
        })
        .collect()
}
