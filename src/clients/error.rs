use thiserror::Error;

/// Failure to retrieve or decode data from one of the remote sources.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The HTTP client could not be constructed from the configuration.
    #[error("Failed to build HTTP client")]
    ClientBuild(#[source] reqwest::Error),

    /// The request produced no response, for example after a timeout.
    #[error("Network request failed for {0}")]
    NetworkRequest(String, #[source] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("HTTP request failed for {url} with status {status}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
        #[source]
        source: reqwest::Error,
    },

    /// The response body could not be read.
    #[error("Failed to read response body from {0}")]
    Body(String, #[source] reqwest::Error),

    /// The forecast body was not the expected JSON shape.
    #[error("Failed to parse JSON data")]
    JsonParse(#[from] serde_json::Error),
}
