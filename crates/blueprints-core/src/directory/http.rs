//! HTTP directory client for native platforms.
//!
//! Talks to a directory service exposing `GET /blueprints/{author}`.

use super::{BlueprintDirectory, DirectoryError, DirectoryResult};
use crate::blueprint::Blueprint;
use reqwest::StatusCode;
use std::time::Duration;
use url::Url;

/// Default request timeout.
const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Build the lookup URL for an author.
///
/// The author is pushed as a single path segment, so it is percent-encoded
/// and cannot escape the `/blueprints/` prefix.
pub fn lookup_url(base: &Url, author: &str) -> DirectoryResult<Url> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| DirectoryError::Other(format!("Base URL cannot have a path: {}", base)))?
        .pop_if_empty()
        .push("blueprints")
        .push(author);
    Ok(url)
}

/// Directory backed by a remote HTTP service.
pub struct HttpDirectory {
    base_url: Url,
    client: reqwest::blocking::Client,
}

impl HttpDirectory {
    /// Create a client for the service rooted at `base_url`
    /// (e.g. `http://localhost:8080`).
    pub fn new(base_url: &str) -> DirectoryResult<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| DirectoryError::Other(format!("Invalid directory URL: {}", e)))?;
        if base_url.scheme() != "http" && base_url.scheme() != "https" {
            return Err(DirectoryError::Other(format!(
                "Invalid directory URL scheme: {}",
                base_url.scheme()
            )));
        }

        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| DirectoryError::Transport(e.to_string()))?;

        Ok(Self { base_url, client })
    }

    /// Base URL of the service.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }
}

impl BlueprintDirectory for HttpDirectory {
    fn blueprints_by_author(&self, author: &str) -> DirectoryResult<Vec<Blueprint>> {
        let url = lookup_url(&self.base_url, author)?;
        log::info!("Looking up blueprints of {} at {}", author, url);

        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| DirectoryError::Transport(e.to_string()))?;

        match response.status() {
            StatusCode::NOT_FOUND => Err(DirectoryError::NotFound(author.to_string())),
            status if status.is_success() => response
                .json::<Vec<Blueprint>>()
                .map_err(|e| DirectoryError::Decode(e.to_string())),
            status => Err(DirectoryError::Status {
                code: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("unknown").to_string(),
            }),
        }
    }
}
