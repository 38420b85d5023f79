//! Downloads the survey workbook.
//!
//! Sources starting with `http` go through an [`HttpClient`]; anything else
//! is treated as a local file path.

mod basic;
mod client;

pub use basic::BasicClient;
pub use client::HttpClient;

use anyhow::{Context, Result};
use tracing::debug;

/// Fetches the body of `url` with a single GET.
///
/// # Errors
///
/// Returns an error if the URL does not parse, the request fails, the server
/// answers with a non-success status, or the body cannot be read.
pub async fn fetch_bytes<C: HttpClient>(client: &C, url: &str) -> Result<Vec<u8>> {
    let req = reqwest::Request::new(reqwest::Method::GET, url.parse()?);

    let resp = client.execute(req).await?.error_for_status()?;
    debug!(status = %resp.status(), "Workbook response received");

    Ok(resp.bytes().await?.to_vec())
}

/// Loads workbook bytes from a URL or a local path.
#[tracing::instrument(skip(client))]
pub async fn fetch_source<C: HttpClient>(client: &C, source: &str) -> Result<Vec<u8>> {
    let bytes = if source.starts_with("http") {
        fetch_bytes(client, source).await?
    } else {
        std::fs::read(source).with_context(|| format!("reading {source}"))?
    };
    debug!(bytes = bytes.len(), "Workbook bytes loaded");
    Ok(bytes)
}
