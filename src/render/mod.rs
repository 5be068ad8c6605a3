//! Terminal presentation of day partitions.

pub mod chart;
pub mod table;

pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[93m";
pub const RED: &str = "\x1b[91m";
