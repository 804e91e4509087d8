//! Client flow: URL in, body delivered

use crate::config::ClientConfig;
use crate::http::session::FdSessionOps;
use crate::http::{HttpClient, HttpRequest, HttpResponse, Result};
use crate::net;
use crate::url::ParsedUrl;
use std::path::PathBuf;

/// Connect to the URL's host on `port`, send a GET for its path and return
/// the validated `200` response.
pub fn get(url: &ParsedUrl, port: u16) -> Result<HttpResponse> {
    tracing::info!(host = url.host(), port, "connecting");
    let stream = net::connect(url.host(), port)?;

    let mut client = HttpClient::new(FdSessionOps::new(stream));
    client.send_request(&HttpRequest::get(url.host(), url.request_path()))?;
    tracing::debug!(path = url.request_path(), "request sent");

    let response = client.receive_response()?;
    if let Err(e) = client.close() {
        tracing::debug!(error = %e, "close failed");
    }

    tracing::info!(
        status = response.status().code(),
        bytes = response.body().len(),
        "response received"
    );
    Ok(response)
}

/// Fetch the configured URL and write the body to the configured
/// destination. Returns the file written, or `None` for standard output.
pub fn fetch(config: &ClientConfig) -> Result<Option<PathBuf>> {
    let response = get(&config.url, config.port)?;
    let written = config.destination.deliver(&config.url, response.body())?;

    if let Some(path) = &written {
        tracing::info!(path = %path.display(), "body saved");
    }
    Ok(written)
}
