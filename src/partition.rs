//! Calendar-day views over an [`HourlySeries`], relative to "now".

use crate::types::hourly::{HourlyRow, HourlySeries};
use crate::types::series::{FieldSpec, SeriesKind};
use chrono::{DateTime, Duration, NaiveDate, Utc};
use std::fmt;

/// A day relative to the run's reference instant.
///
/// `Today` and `RestOfToday` share a date; the first labels the observed part
/// of the day, the second the forecast part.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DayTarget {
    Yesterday,
    Today,
    RestOfToday,
    Tomorrow,
    DayAfterTomorrow,
}

impl DayTarget {
    /// Days shown for observations.
    pub const HISTORICAL: [DayTarget; 2] = [DayTarget::Yesterday, DayTarget::Today];
    /// Days shown for the forecast.
    pub const FORECAST: [DayTarget; 3] = [
        DayTarget::RestOfToday,
        DayTarget::Tomorrow,
        DayTarget::DayAfterTomorrow,
    ];

    /// Targets that apply to a series of the given kind.
    pub fn for_kind(kind: SeriesKind) -> &'static [DayTarget] {
        match kind {
            SeriesKind::Historical => &Self::HISTORICAL,
            SeriesKind::Forecast => &Self::FORECAST,
        }
    }

    fn offset_days(&self) -> i64 {
        match self {
            DayTarget::Yesterday => -1,
            DayTarget::Today | DayTarget::RestOfToday => 0,
            DayTarget::Tomorrow => 1,
            DayTarget::DayAfterTomorrow => 2,
        }
    }

    /// UTC calendar date this target refers to.
    pub fn date(&self, now: DateTime<Utc>) -> NaiveDate {
        (now + Duration::days(self.offset_days())).date_naive()
    }
}

impl fmt::Display for DayTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DayTarget::Yesterday => "yesterday",
            DayTarget::Today => "today",
            DayTarget::RestOfToday => "rest of today",
            DayTarget::Tomorrow => "tomorrow",
            DayTarget::DayAfterTomorrow => "day after tomorrow",
        };
        f.write_str(label)
    }
}

/// The hours of one UTC date, borrowed from an [`HourlySeries`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DayPartition<'a> {
    pub target: DayTarget,
    pub date: NaiveDate,
    fields: &'static [FieldSpec],
    rows: &'a [HourlyRow],
}

impl<'a> DayPartition<'a> {
    /// Field layout of the rows.
    pub fn fields(&self) -> &'static [FieldSpec] {
        self.fields
    }

    /// The hours of [`DayPartition::date`], borrowed from the series.
    pub fn rows(&self) -> &'a [HourlyRow] {
        self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// An empty partition is skipped when presenting.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Values of one field in row order.
    pub fn column(&self, field: &str) -> Option<Vec<Option<f64>>> {
        let column = self.fields.iter().position(|spec| spec.name == field)?;
        Some(self.rows.iter().map(|row| row.values[column]).collect())
    }
}

impl HourlySeries {
    /// Rows whose bucket falls on `date` (UTC). Rows are sorted, so the
    /// matching hours form one contiguous slice.
    pub fn rows_on(&self, date: NaiveDate) -> &[HourlyRow] {
        let hours = self.hours();
        let start = hours.partition_point(|row| row.date() < date);
        let end = hours.partition_point(|row| row.date() <= date);
        &hours[start..end]
    }

    /// View of the series for one target day.
    pub fn partition(&self, target: DayTarget, now: DateTime<Utc>) -> DayPartition<'_> {
        let date = target.date(now);
        DayPartition {
            target,
            date,
            fields: self.fields(),
            rows: self.rows_on(date),
        }
    }

    /// Splits the series into one slice per distinct UTC date, in order.
    /// The slices are disjoint and together cover every row.
    pub fn split_by_date(&self) -> Vec<(NaiveDate, &[HourlyRow])> {
        self.hours()
            .chunk_by(|a, b| a.date() == b.date())
            .map(|chunk| (chunk[0].date(), chunk))
            .collect()
    }
}

/// Views of `series` for each of `targets`, empty ones included.
pub fn partition_days<'a>(
    series: &'a HourlySeries,
    targets: &[DayTarget],
    now: DateTime<Utc>,
) -> Vec<DayPartition<'a>> {
    targets
        .iter()
        .map(|&target| series.partition(target, now))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregation::hourly::group_hourly;
    use crate::types::field_value::FieldValue;
    use crate::types::series::{Record, Series};
    use chrono::TimeZone;

    /// Hourly forecast-shaped series from 2024-01-01 20:00 to 2024-01-02 03:00.
    fn two_day_series() -> HourlySeries {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 20, 0, 0).unwrap();
        let records = (0..8)
            .map(|h| {
                let mut values = vec![FieldValue::Missing; 6];
                values[0] = FieldValue::Number(1.0 + h as f64 * 0.5);
                Record {
                    timestamp: start + Duration::hours(h),
                    values,
                }
            })
            .collect();
        group_hourly(&Series::new(SeriesKind::Forecast, records))
    }

    #[test]
    fn test_target_dates() {
        let now = Utc.with_ymd_and_hms(2024, 2, 28, 23, 30, 0).unwrap();
        let date = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap();
        assert_eq!(DayTarget::Yesterday.date(now), date(2024, 2, 27));
        assert_eq!(DayTarget::Today.date(now), date(2024, 2, 28));
        assert_eq!(DayTarget::RestOfToday.date(now), date(2024, 2, 28));
        assert_eq!(DayTarget::Tomorrow.date(now), date(2024, 2, 29));
        assert_eq!(DayTarget::DayAfterTomorrow.date(now), date(2024, 3, 1));
    }

    #[test]
    fn test_partitions_match_dates_and_cover_input() {
        let series = two_day_series();
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 20, 0, 0).unwrap();
        let parts = partition_days(&series, &DayTarget::FORECAST, now);

        let today = &parts[0];
        let tomorrow = &parts[1];
        assert_eq!(today.len(), 4);
        assert_eq!(tomorrow.len(), 4);
        assert!(today.rows().iter().all(|row| row.date() == today.date));
        assert!(tomorrow.rows().iter().all(|row| row.date() == tomorrow.date));
        assert!(parts[2].is_empty());

        let total: usize = parts.iter().map(DayPartition::len).sum();
        assert_eq!(total, series.len());
        assert!(today.rows().last().unwrap().hour < tomorrow.rows()[0].hour);
    }

    #[test]
    fn test_split_by_date() {
        let series = two_day_series();
        let days = series.split_by_date();
        assert_eq!(days.len(), 2);
        assert_eq!(days[0].1.len() + days[1].1.len(), series.len());
        assert_eq!(days[1].0, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
    }

    #[test]
    fn test_partition_column() {
        let series = two_day_series();
        let now = Utc.with_ymd_and_hms(2024, 1, 2, 1, 0, 0).unwrap();
        let today = series.partition(DayTarget::Today, now);
        assert_eq!(
            today.column("wave_height").unwrap(),
            vec![Some(3.0), Some(3.5), Some(4.0), Some(4.5)]
        );
        assert_eq!(today.column("tide"), None);
    }
}
