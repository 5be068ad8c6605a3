//! ASCII bar chart of wave height per hour.

use crate::partition::DayPartition;
use crate::render::{BOLD, GREEN, RED, RESET, YELLOW};
use ordered_float::OrderedFloat;
use std::fmt::Write;

/// Field plotted by [`render_bar_chart`].
pub const CHART_FIELD: &str = "wave_height";

/// Length in characters of the longest bar.
pub const MAX_BAR_LENGTH: f64 = 10.0;

/// Colour for a wave height in meters: red below 1 m, yellow below 2 m,
/// green from 2 m up.
pub fn height_color(meters: f64) -> &'static str {
    if meters < 1.0 {
        RED
    } else if meters < 2.0 {
        YELLOW
    } else {
        GREEN
    }
}

/// Renders one `HH:MM: ||||| (x.xm)` line per hour that has a wave height.
/// Bars are scaled so the day's highest value spans [`MAX_BAR_LENGTH`].
pub fn render_bar_chart(partition: &DayPartition<'_>, title: &str) -> String {
    let Some(heights) = partition.column(CHART_FIELD) else {
        return format!("No {CHART_FIELD} column to display.\n");
    };
    let points: Vec<_> = partition
        .rows()
        .iter()
        .zip(heights)
        .filter_map(|(row, height)| height.filter(|h| h.is_finite()).map(|h| (row.hour, h)))
        .collect();
    if points.is_empty() {
        return format!("No valid {CHART_FIELD} data to display.\n");
    }

    let max = points
        .iter()
        .map(|&(_, height)| OrderedFloat(height))
        .max()
        .map_or(0.0, |max| max.0);
    let scale = if max > 0.0 { MAX_BAR_LENGTH / max } else { 1.0 };

    let mut out = format!("\n{BOLD}{title}:{RESET}\n");
    for (hour, height) in points {
        let length = (height * scale).max(0.0) as usize;
        let _ = writeln!(
            out,
            "{}: {}{}{} ({:.1}m)",
            hour.format("%H:%M"),
            height_color(height),
            "|".repeat(length),
            RESET,
            height
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregation::hourly::group_hourly;
    use crate::partition::DayTarget;
    use crate::types::field_value::FieldValue;
    use crate::types::series::{Record, Series, SeriesKind};
    use chrono::{Duration, TimeZone, Utc};

    fn forecast_chart(heights: &[Option<f64>]) -> String {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let records = heights
            .iter()
            .enumerate()
            .map(|(h, &height)| {
                let mut values = vec![FieldValue::Missing; 6];
                values[0] = height.into();
                values[2] = FieldValue::Number(10.0);
                Record {
                    timestamp: start + Duration::hours(h as i64),
                    values,
                }
            })
            .collect();
        let hourly = group_hourly(&Series::new(SeriesKind::Forecast, records));
        render_bar_chart(&hourly.partition(DayTarget::RestOfToday, start), "Chart")
    }

    #[test]
    fn test_height_color_thresholds() {
        assert_eq!(height_color(0.9), RED);
        assert_eq!(height_color(1.0), YELLOW);
        assert_eq!(height_color(1.99), YELLOW);
        assert_eq!(height_color(2.0), GREEN);
    }

    #[test]
    fn test_bars_scale_to_max() {
        let chart = forecast_chart(&[Some(1.0), Some(2.0)]);
        assert!(chart.contains("Chart:"));
        assert!(chart.contains(&format!("00:00: {YELLOW}|||||{RESET} (1.0m)")));
        assert!(chart.contains(&format!("01:00: {GREEN}||||||||||{RESET} (2.0m)")));
    }

    #[test]
    fn test_hours_without_height_are_skipped() {
        let chart = forecast_chart(&[Some(0.5), None]);
        assert_eq!(chart.matches("m)").count(), 1);
        assert!(chart.contains(&format!("00:00: {RED}||||||||||{RESET} (0.5m)")));
    }

    #[test]
    fn test_nan_height_does_not_change_scale() {
        let chart = forecast_chart(&[Some(1.0), Some(f64::NAN)]);
        assert_eq!(chart.matches("m)").count(), 1);
        assert!(chart.contains(&format!("00:00: {YELLOW}||||||||||{RESET} (1.0m)")));
    }

    #[test]
    fn test_no_valid_heights() {
        let chart = forecast_chart(&[None, None]);
        assert_eq!(chart, "No valid wave_height data to display.\n");
    }

    #[test]
    fn test_zero_heights_use_unit_scale() {
        let chart = forecast_chart(&[Some(0.0)]);
        assert!(chart.contains(&format!("00:00: {RED}{RESET} (0.0m)")));
    }
}
