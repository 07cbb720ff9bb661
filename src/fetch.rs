//! HTTP fetcher for remote PDF tasks.
//!
//! Issues a GET with a fixed per-attempt timeout and a bounded number of
//! attempts. A response only counts as success when the status is 2xx AND
//! the `Content-Type` header declares a PDF; an HTML error page served
//! with 200 is a failure and its bytes are discarded.

use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::Client;

/// Per-attempt request timeout.
const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Media-type marker a response's `Content-Type` must contain.
const PDF_CONTENT_MARKER: &str = "pdf";

/// Fetch failure. Captured per task by the batch aggregator.
#[derive(Debug)]
pub enum FetchError {
    /// Network / timeout / protocol failure before a usable response.
    Request(String),
    /// Non-2xx HTTP status.
    Status(u16),
    /// 2xx response whose `Content-Type` does not declare a PDF.
    ContentKind(String),
}

impl std::fmt::Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchError::Request(e) => write!(f, "request failed: {}", e),
            FetchError::Status(code) => write!(f, "unexpected HTTP status {}", code),
            FetchError::ContentKind(ct) => {
                write!(f, "response is not a PDF (content-type: {})", ct)
            }
        }
    }
}

impl std::error::Error for FetchError {}

/// Retry policy: a fixed number of attempts, no backoff. Intermediate
/// failures are swallowed; only the final attempt's error surfaces.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_attempts: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self { max_attempts: 2 }
    }
}

/// Build the shared HTTP client used for every fetch in a batch.
pub fn build_client() -> reqwest::Result<Client> {
    Client::builder().timeout(FETCH_TIMEOUT).build()
}

/// Fetch `url`, returning the PDF bytes on success.
pub async fn fetch_pdf(
    client: &Client,
    url: &str,
    policy: RetryPolicy,
) -> Result<Vec<u8>, FetchError> {
    let mut last_err = FetchError::Request("no attempt made".to_string());

    for _attempt in 0..policy.max_attempts {
        match fetch_once(client, url).await {
            Ok(bytes) => return Ok(bytes),
            Err(e) => last_err = e,
        }
    }

    Err(last_err)
}

async fn fetch_once(client: &Client, url: &str) -> Result<Vec<u8>, FetchError> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| FetchError::Request(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status(status.as_u16()));
    }

    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();
    if !content_type.to_ascii_lowercase().contains(PDF_CONTENT_MARKER) {
        return Err(FetchError::ContentKind(if content_type.is_empty() {
            "missing".to_string()
        } else {
            content_type
        }));
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|e| FetchError::Request(e.to_string()))?;
    Ok(bytes.to_vec())
}
