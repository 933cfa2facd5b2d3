//! HTTP client plumbing for the probe.
//!
//! Provides client creation with a total timeout and size-limited body reads.

use std::io::Read;
use std::time::Duration;

use reqwest::blocking::{Client, Response};
use reqwest::redirect::Policy;

use crate::error::ProbeFailure;

const USER_AGENT: &str = concat!("hydro-verify/", env!("CARGO_PKG_VERSION"));

/// Create a client whose `timeout` bounds the whole request, connection and
/// body transfer included. Idle connections are not kept.
pub(crate) fn create_http_client(
    timeout: Duration,
    max_redirects: usize,
) -> Result<Client, ProbeFailure> {
    let client = Client::builder()
        .timeout(timeout)
        .connect_timeout(timeout)
        .redirect(Policy::limited(max_redirects))
        .pool_max_idle_per_host(0)
        .user_agent(USER_AGENT)
        .build()?;
    Ok(client)
}

/// Reject any final status outside 2xx.
pub(crate) fn validate_response_status(response: &Response) -> Result<(), ProbeFailure> {
    let status = response.status();
    if !status.is_success() {
        return Err(ProbeFailure::Status {
            code: status.as_u16(),
            reason: status.canonical_reason().unwrap_or("Unknown error").to_string(),
        });
    }
    Ok(())
}

/// Read at most `max_size` bytes of the body. Anything beyond is left
/// unread and dropped with the response.
pub(crate) fn read_body_with_limit(
    response: Response,
    max_size: u64,
) -> Result<Vec<u8>, ProbeFailure> {
    let mut bytes = Vec::new();
    response
        .take(max_size)
        .read_to_end(&mut bytes)
        .map_err(ProbeFailure::from_body_error)?;

    if bytes.len() as u64 == max_size {
        tracing::debug!(max_size, "response body reached size limit, evaluating prefix");
    }
    Ok(bytes)
}

/// Decode as UTF-8, dropping invalid sequences.
pub(crate) fn decode_lossy(bytes: &[u8]) -> String {
    let mut text = String::with_capacity(bytes.len());
    for chunk in bytes.utf8_chunks() {
        text.push_str(chunk.valid());
    }
    text
}
