use crate::clients::config::ClientConfig;
use crate::clients::error::FetchError;
use log::{info, warn};
use reqwest::{Client, Request, Response};

pub(crate) fn build_client(config: &ClientConfig) -> Result<Client, FetchError> {
    let mut builder = Client::builder();
    if let Some(timeout) = config.timeout {
        builder = builder.timeout(timeout);
    }
    builder.build().map_err(FetchError::ClientBuild)
}

/// Sends `request` and turns any non-success status into [`FetchError::HttpStatus`].
pub(crate) async fn send_checked(client: &Client, request: Request) -> Result<Response, FetchError> {
    let url = request.url().to_string();
    info!("Downloading data from {}", url);

    let response = client
        .execute(request)
        .await
        .map_err(|e| FetchError::NetworkRequest(url.clone(), e))?;

    match response.error_for_status() {
        Ok(response) => Ok(response),
        Err(e) => {
            warn!("HTTP error for {}: {:?}", url, e);
            Err(if let Some(status) = e.status() {
                FetchError::HttpStatus {
                    url,
                    status,
                    source: e,
                }
            } else {
                FetchError::NetworkRequest(url, e)
            })
        }
    }
}
