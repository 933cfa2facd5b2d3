//! The single bounded HTTP probe against the reported URL.
//!
//! Every call builds its own client, so no connection or pool outlives the
//! probe on any exit path, including timeouts.

pub(crate) mod client;


use std::time::{Duration, Instant};

use crate::config::{MAX_BODY_BYTES, MAX_REDIRECTS, PROBE_TIMEOUT};
use crate::error::ProbeFailure;

use client::{create_http_client, decode_lossy, read_body_with_limit, validate_response_status};

/// Fetches the body behind a URL.
pub trait Fetcher {
    fn fetch(&self, url: &str) -> Result<String, ProbeFailure>;
}

/// Blocking HTTP GET prober.
#[derive(Debug, Clone)]
pub struct HttpProber {
    timeout: Duration,
    max_redirects: usize,
    max_body_bytes: u64,
}

impl HttpProber {
    pub fn new() -> Self {
        Self {
            timeout: PROBE_TIMEOUT,
            max_redirects: MAX_REDIRECTS,
            max_body_bytes: MAX_BODY_BYTES,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_body_bytes(mut self, max_body_bytes: u64) -> Self {
        self.max_body_bytes = max_body_bytes;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl Default for HttpProber {
    fn default() -> Self {
        Self::new()
    }
}

impl Fetcher for HttpProber {
    fn fetch(&self, url: &str) -> Result<String, ProbeFailure> {
        let started = Instant::now();
        let client = create_http_client(self.timeout, self.max_redirects)?;

        let response = client.get(url).send()?;
        validate_response_status(&response)?;

        let status = response.status().as_u16();
        let bytes = read_body_with_limit(response, self.max_body_bytes)?;

        tracing::debug!(
            url,
            status,
            bytes = bytes.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "probe completed"
        );

        Ok(decode_lossy(&bytes))
    }
}
