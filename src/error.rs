use polars::error::PolarsError;
use thiserror::Error;

/// Errors that end a run or a single section's rendering. Fetch failures
/// are not among them: they stay with their source in [`crate::Report`].
#[derive(Debug, Error)]
pub enum BuoycastError {
    #[error("Failed to build table")]
    Table(#[from] PolarsError),

    #[error("Failed to read interactive input")]
    Input(#[from] std::io::Error),
}
