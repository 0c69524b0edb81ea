//! Blocking HTTP transport seam.
//!
//! # Design
//! The client consumes the network through the narrow `Transport` trait, so
//! unit tests substitute a recording double and never open a socket.
//! `UreqTransport` executes requests with ureq; status codes are returned as
//! data (`http_status_as_error(false)`) and interpreted here rather than
//! surfaced as ureq errors.

use log::debug;

use crate::error::VkError;
use crate::http::HttpRequest;

/// Blocking HTTP seam used by `VkClient`.
pub trait Transport {
    /// Execute `request` and return the raw response body.
    fn send(&self, request: &HttpRequest) -> Result<Vec<u8>, VkError>;
}

/// `ureq`-backed transport. The agent is built once and reused; the per-call
/// timeout comes from the request itself.
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for UreqTransport {
    fn send(&self, request: &HttpRequest) -> Result<Vec<u8>, VkError> {
        let mut response = self
            .agent
            .get(&request.url)
            .config()
            .timeout_global(Some(request.timeout))
            .build()
            .call()
            .map_err(map_ureq_error)?;

        let status = response.status().as_u16();
        if !(200..300).contains(&status) {
            return Err(VkError::Transport(format!("unexpected HTTP status {status}")));
        }

        let body = response
            .body_mut()
            .read_to_vec()
            .map_err(|e| VkError::Transport(e.to_string()))?;
        debug!("received {} bytes", body.len());
        Ok(body)
    }
}

fn map_ureq_error(err: ureq::Error) -> VkError {
    match err {
        ureq::Error::Timeout(_) => VkError::Timeout,
        ureq::Error::Io(e) if e.kind() == std::io::ErrorKind::TimedOut => VkError::Timeout,
        other => VkError::Transport(other.to_string()),
    }
}
