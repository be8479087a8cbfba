//! Fetching activation tokens over HTTP.

use std::io::Read;
use std::time::Duration;

use url::Url;

use crate::error::{ImportError, Result};

/// Default bound on a single token fetch.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(5);

/// Largest token body accepted from a remote endpoint.
pub const MAX_TOKEN_BYTES: usize = 64 * 1024;

/// Retrieves token text from a URL.
///
/// Implementations must bound the time they spend; a fetch that cannot
/// complete in time returns an error instead of waiting.
pub trait TokenFetcher: Send + Sync {
    fn fetch(&self, url: &Url) -> Result<String>;
}

/// Blocking HTTP(S) fetcher with a per-request timeout.
///
/// Uses `reqwest::blocking`, so it must not be called from inside an
/// async runtime.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    timeout: Duration,
}

impl HttpFetcher {
    pub fn new() -> Self {
        Self::with_timeout(DEFAULT_FETCH_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self { timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenFetcher for HttpFetcher {
    fn fetch(&self, url: &Url) -> Result<String> {
        log::debug!("fetching activation token from {url}");

        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| ImportError::FetchFailed(format!("client setup: {e}")))?;

        let resp = client
            .get(url.clone())
            .send()
            .map_err(|e| ImportError::FetchFailed(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ImportError::HttpStatus(status.as_u16()));
        }

        let mut body = Vec::new();
        resp.take(MAX_TOKEN_BYTES as u64 + 1)
            .read_to_end(&mut body)
            .map_err(|e| ImportError::FetchFailed(format!("reading body: {e}")))?;
        if body.len() > MAX_TOKEN_BYTES {
            return Err(ImportError::TokenTooLarge {
                limit: MAX_TOKEN_BYTES,
            });
        }

        String::from_utf8(body)
            .map_err(|_| ImportError::FetchFailed("token body is not UTF-8".into()))
    }
}
