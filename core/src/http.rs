//! HTTP request described as plain data.
//!
//! # Design
//! The client builds `HttpRequest` values and hands them to a `Transport`
//! for execution. Keeping the request as owned data keeps the I/O seam
//! narrow and lets unit tests inspect exactly what would hit the wire.
//! Every call is a GET; the method name lives in the URL path and all
//! parameters travel in the query string.

use std::time::Duration;

/// A fully composed API request.
///
/// `timeout` is the time budget the transport may spend on the whole
/// round-trip before failing with `VkError::Timeout`.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub url: String,
    pub timeout: Duration,
}
