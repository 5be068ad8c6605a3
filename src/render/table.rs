//! Tabular rendering of a day partition through a polars `DataFrame`.

use crate::partition::DayPartition;
use crate::render::{BOLD, RESET};
use polars::prelude::*;
use std::env;

/// Lifts polars' default row and column limits so every hour is printed, and
/// drops the shape and dtype header lines.
pub fn configure_table_display() {
    env::set_var("POLARS_FMT_MAX_COLS", "-1");
    env::set_var("POLARS_FMT_MAX_ROWS", "-1");
    env::set_var("POLARS_FMT_TABLE_HIDE_DATAFRAME_SHAPE_INFORMATION", "1");
    env::set_var("POLARS_FMT_TABLE_HIDE_COLUMN_DATA_TYPES", "1");
}

fn round_one_decimal(value: Option<f64>) -> Option<f64> {
    value.map(|v| (v * 10.0).round() / 10.0)
}

/// Builds a frame with a `datetime` column followed by one column per field,
/// values rounded to one decimal place.
pub fn partition_to_dataframe(partition: &DayPartition<'_>) -> PolarsResult<DataFrame> {
    let datetimes: Vec<_> = partition
        .rows()
        .iter()
        .map(|row| row.hour.naive_utc())
        .collect();

    let mut columns: Vec<Column> = Vec::with_capacity(partition.fields().len() + 1);
    columns.push(Series::new("datetime".into(), datetimes).into());
    for (index, field) in partition.fields().iter().enumerate() {
        let values: Vec<Option<f64>> = partition
            .rows()
            .iter()
            .map(|row| round_one_decimal(row.values[index]))
            .collect();
        columns.push(Series::new(field.name.into(), values).into());
    }
    DataFrame::new(columns)
}

/// Bold title line followed by the table.
pub fn render_table(partition: &DayPartition<'_>, title: &str) -> PolarsResult<String> {
    let frame = partition_to_dataframe(partition)?;
    Ok(format!("\n{BOLD}{title}{RESET}\n\n{frame}"))
}
