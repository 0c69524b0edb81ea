//! Error types for the VK API client.
//!
//! # Design
//! `Timeout` gets a dedicated variant because callers frequently distinguish
//! "the call ran out of time" from "the connection failed." Remote `"error"`
//! envelopes land in `Api` with the server-supplied code and message rather
//! than a generic failure.

use thiserror::Error;

/// Errors surfaced by `VkClient` construction and calls.
#[derive(Error, Debug)]
pub enum VkError {
    /// Neither an application id nor a secret was supplied at construction.
    #[error("app_id and app_secret are both empty")]
    MissingCredentials,

    /// The base URL and method name do not form a valid request URL.
    #[error("invalid request URL: {0}")]
    InvalidUrl(String),

    /// A structured parameter value could not be serialized to JSON.
    #[error("parameter serialization failed: {0}")]
    Serialization(String),

    /// Connection or I/O failure, or an unexpected HTTP status.
    #[error("transport error: {0}")]
    Transport(String),

    /// The call exceeded its allotted duration.
    #[error("request timed out")]
    Timeout,

    /// The response body is not valid JSON or not a valid envelope.
    #[error("response decoding failed: {0}")]
    Decode(String),

    /// The remote API answered with an `"error"` envelope.
    #[error("VK API error {code}: {message}")]
    Api {
        /// Remote-supplied error code.
        code: i64,
        /// Remote-supplied error message.
        message: String,
    },
}
