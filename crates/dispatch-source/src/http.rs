//! [`HttpRobotSource`] – remote robot listing over HTTP.
//!
//! Issues a single `GET` against the listing endpoint and decodes a JSON
//! array of robots:
//!
//! ```json
//! [{ "robotId": "1", "batteryLevel": 99, "y": 92, "x": 48 }, ...]
//! ```
//!
//! The request timeout is the only cancellation point in a dispatch request.

use std::time::Duration;

use async_trait::async_trait;
use dispatch_types::{DispatchError, Robot};
use thiserror::Error;
use tracing::{debug, warn};

use crate::RobotSource;

/// Mock listing endpoint the service was originally deployed against.
pub const DEFAULT_ROBOTS_URL: &str = "https://svtrobotics.free.beeceptor.com/robots";

/// Default cap on the listing body.  The 100-robot fixture is under 8 KiB.
pub const MAX_LISTING_BYTES: usize = 4 * 1024 * 1024;

// ─────────────────────────────────────────────────────────────────────────────
// Error type
// ─────────────────────────────────────────────────────────────────────────────

/// Errors that can arise while talking to the listing endpoint.
#[derive(Error, Debug)]
pub enum SourceError {
    /// The HTTP request failed, timed out, or returned a non-2xx status.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    /// The body was not a JSON array of robots.
    #[error("Unexpected response format: {0}")]
    BadResponse(String),
}

impl From<SourceError> for DispatchError {
    fn from(err: SourceError) -> Self {
        DispatchError::SourceUnavailable(err.to_string())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// HttpRobotSource
// ─────────────────────────────────────────────────────────────────────────────

/// Fetches the robot listing from a remote JSON endpoint.
///
/// Construct once and share across requests; the inner client pools
/// connections.
pub struct HttpRobotSource {
    url: String,
    client: reqwest::Client,
    max_body_bytes: usize,
}

impl HttpRobotSource {
    /// Create a source for `url` whose requests give up after `timeout`.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Http`] if the HTTP client cannot be built.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, SourceError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            url: url.into(),
            client,
            max_body_bytes: MAX_LISTING_BYTES,
        })
    }

    /// Override the largest listing body accepted (builder-style).
    pub fn with_max_body_bytes(mut self, max_body_bytes: usize) -> Self {
        self.max_body_bytes = max_body_bytes;
        self
    }

    /// The listing endpoint this source reads from.
    pub fn url(&self) -> &str {
        &self.url
    }

    async fn fetch(&self) -> Result<Vec<Robot>, SourceError> {
        let mut response = self
            .client
            .get(&self.url)
            .send()
            .await?
            .error_for_status()?;

        let too_large = || {
            SourceError::BadResponse(format!(
                "listing exceeds {} bytes",
                self.max_body_bytes
            ))
        };
        if response
            .content_length()
            .is_some_and(|len| len > self.max_body_bytes as u64)
        {
            return Err(too_large());
        }

        let mut body = Vec::new();
        while let Some(chunk) = response.chunk().await? {
            if body.len() + chunk.len() > self.max_body_bytes {
                return Err(too_large());
            }
            body.extend_from_slice(&chunk);
        }

        serde_json::from_slice(&body).map_err(|e| SourceError::BadResponse(e.to_string()))
    }
}

#[async_trait]
impl RobotSource for HttpRobotSource {
    async fn fetch_available(&self) -> Result<Vec<Robot>, DispatchError> {
        match self.fetch().await {
            Ok(robots) => {
                debug!(url = %self.url, count = robots.len(), "fetched robot listing");
                Ok(robots)
            }
            Err(e) => {
                warn!(url = %self.url, error = %e, "robot listing unavailable");
                Err(e.into())
            }
        }
    }
}
