//! Uploader — single-attempt JSON delivery to the collector.
//!
//! [`Uploader::upload`] serializes an [`UploadPayload`] and POSTs it to
//! `<base-url>/v1/diagnostics`. Any 2xx response is success and its body is
//! returned to the caller; any other status or transport failure is an
//! [`UploadError`]. There is exactly one delivery attempt per call — retry
//! policy, if wanted, belongs to the caller.
//!
//! The returned future resolves exactly once and never panics across the
//! boundary; it is the async re-expression of the original success/error
//! callback pair.

use std::time::Duration;

use crate::report::UploadPayload;

/// Collector endpoint path, appended to the configured base URL.
pub const UPLOAD_PATH: &str = "/v1/diagnostics";

/// Bound on establishing the TCP/TLS connection.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Bound on the whole request, send through response read.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(8);

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Error type for upload failures.
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    /// The transport failed (connect, DNS, timeout, write, read).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The collector answered with a non-2xx status.
    #[error("collector returned HTTP {code}: {body}")]
    Status { code: u16, body: String },
}

// ---------------------------------------------------------------------------
// Uploader
// ---------------------------------------------------------------------------

/// Delivers diagnostic payloads to a collector endpoint.
pub struct Uploader {
    client: reqwest::Client,
    base_url: String,
}

impl Uploader {
    /// Create an uploader for a collector base URL (e.g.
    /// `https://collector.example.com`).
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("failed to build reqwest HTTP client");
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Upload one payload. At most one delivery attempt.
    ///
    /// On 2xx the response body is returned; otherwise the error carries the
    /// status code and body, or the underlying transport cause.
    pub async fn upload(&self, payload: &UploadPayload) -> Result<String, UploadError> {
        let url = format!("{}{}", self.base_url, UPLOAD_PATH);
        log::info!("uploading diagnostics for {} to {url}", payload.device_model);

        let response = self.client.post(&url).json(payload).send().await?;
        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        if status.is_success() {
            log::info!("upload accepted ({status})");
            Ok(body)
        } else {
            log::warn!("upload rejected: HTTP {status}");
            Err(UploadError::Status {
                code: status.as_u16(),
                body,
            })
        }
    }
}
