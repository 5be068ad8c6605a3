//! Parser for the NDBC realtime2 standard meteorological feed
//! (`https://www.ndbc.noaa.gov/data/realtime2/{station}.txt`).
//!
//! The feed is whitespace separated, newest row first, with `#` header lines:
//!
//! ```text
//! #YY  MM DD hh mm WDIR WSPD GST  WVHT   DPD   APD MWD   PRES  ATMP  WTMP  DEWP  VIS PTDY  TIDE
//! 2024 01 01 10 00 290  7.0  9.0   1.5  12.0   8.1 285 1019.0  12.1    MM  10.0   MM   MM    MM
//! ```

use crate::types::field_value::FieldValue;
use crate::types::series::{Record, Series, SeriesKind};
use chrono::{DateTime, Duration, TimeZone, Utc};
use log::{debug, info};
use std::collections::BTreeMap;

/// Lines starting with this are headers or comments.
pub const COMMENT_MARKER: char = '#';

/// Rows with fewer columns are incomplete and skipped.
pub const MIN_COLUMNS: usize = 19;

/// How far back observations are kept, relative to "now".
pub const OBSERVATION_WINDOW_HOURS: i64 = 24;

/// Feed column of each tracked field, in [`SeriesKind::Historical`] field order:
/// WDIR, WSPD, WVHT, DPD, APD, MWD, WTMP, TIDE.
const TRACKED_COLUMNS: [usize; 8] = [5, 6, 8, 9, 10, 11, 14, 18];

/// Parses raw feed text into an observation series.
///
/// Rows are kept when they are complete, carry a valid UTC timestamp in their
/// first five columns and are no older than [`OBSERVATION_WINDOW_HOURS`]
/// before `now`. Anything else is dropped without error. When two rows share
/// a timestamp, the one further down the feed wins.
pub fn parse_observations(raw: &str, now: DateTime<Utc>) -> Series {
    let cutoff = now - Duration::hours(OBSERVATION_WINDOW_HOURS);
    let mut by_time: BTreeMap<DateTime<Utc>, Vec<FieldValue>> = BTreeMap::new();
    let mut dropped = 0usize;

    for line in raw.lines() {
        if line.starts_with(COMMENT_MARKER) || line.trim().is_empty() {
            continue;
        }
        let columns: Vec<&str> = line.split_whitespace().collect();
        match parse_row(&columns) {
            Some((timestamp, _)) if timestamp < cutoff => continue,
            Some((timestamp, values)) => {
                by_time.insert(timestamp, values);
            }
            None => {
                debug!("Dropping malformed feed row: {}", line);
                dropped += 1;
            }
        }
    }

    info!(
        "Parsed {} observations since {} ({} malformed rows dropped)",
        by_time.len(),
        cutoff,
        dropped
    );

    let records = by_time
        .into_iter()
        .map(|(timestamp, values)| Record { timestamp, values })
        .collect();
    Series::new(SeriesKind::Historical, records)
}

/// Parses one split row, `None` if it is incomplete or its timestamp is invalid.
fn parse_row(columns: &[&str]) -> Option<(DateTime<Utc>, Vec<FieldValue>)> {
    if columns.len() < MIN_COLUMNS {
        return None;
    }
    let timestamp = parse_timestamp(columns)?;
    let values = TRACKED_COLUMNS
        .iter()
        .map(|&index| columns.get(index).map(|raw| FieldValue::clean(raw)))
        .collect::<Option<Vec<_>>>()?;
    Some((timestamp, values))
}

fn parse_timestamp(columns: &[&str]) -> Option<DateTime<Utc>> {
    let year = columns.first()?.parse::<i32>().ok()?;
    let [month, day, hour, minute] = [1, 2, 3, 4].map(|index| {
        columns
            .get(index)
            .and_then(|raw| raw.parse::<u32>().ok())
    });
    Utc.with_ymd_and_hms(year, month?, day?, hour?, minute?, 0)
        .single()
}
