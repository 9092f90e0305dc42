//! Introspection payload retrieval.

use anyhow::{Context, Result};
use std::path::Path;
use std::time::Duration;

/// Returns the introspection URL for a HelixDB base URL.
pub fn introspect_url(endpoint: &str) -> String {
    format!("{}/introspect", endpoint.trim_end_matches('/'))
}

/// Fetches the introspection payload over HTTP.
///
/// # Errors
/// Fails on connection errors, timeouts and non-success statuses.
pub async fn fetch_introspection(endpoint: &str, timeout: Duration) -> Result<String> {
    let url = introspect_url(endpoint);
    let client = reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .context("failed to build HTTP client")?;

    tracing::info!(%url, "fetching schema");
    let response = client
        .get(&url)
        .send()
        .await
        .with_context(|| format!("request to {url} failed"))?
        .error_for_status()
        .with_context(|| format!("{url} returned an error status"))?;

    let body = response
        .text()
        .await
        .context("failed to read introspection response")?;
    tracing::debug!(bytes = body.len(), "received introspection payload");
    Ok(body)
}

/// Reads the introspection payload from a file.
///
/// # Errors
/// Fails if the file cannot be read.
pub fn read_introspection(path: &Path) -> Result<String> {
    tracing::info!(path = %path.display(), "reading schema");
    std::fs::read_to_string(path)
        .with_context(|| format!("failed to read introspection payload from {}", path.display()))
}
