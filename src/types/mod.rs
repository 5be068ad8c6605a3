pub mod field_value;
pub mod forecast;
pub mod hourly;
pub mod series;
pub mod station;
