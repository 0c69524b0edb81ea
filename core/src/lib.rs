//! Synchronous signed-request client for the VK HTTP API.
//!
//! # Overview
//! Composes GET requests against `https://api.vk.com/method/<name>`, signs
//! them with the shared application secret, and unwraps the JSON
//! `{"response": ...}` / `{"error": ...}` envelope. Remote methods are
//! addressed either directly (`client.call("friends.get", params)`) or
//! through a dotted path accumulator
//! (`client.method("friends").segment("get").invoke(params)`).
//!
//! # Design
//! - `VkClient` is immutable after construction — credentials, default
//!   timeout and transport only; every call is stateless and blocking.
//! - Request building and envelope parsing are public seams around the
//!   `Transport` trait, so the deterministic halves are testable without
//!   the network.
//! - The signature is MD5 over the sorted `key=value` concatenation plus
//!   the secret; identical inputs always produce identical digests.

pub mod client;
pub mod error;
pub mod http;
pub mod method;
pub mod params;
pub mod sig;
pub mod transport;

pub use client::{VkClient, DEFAULT_TIMEOUT};
pub use error::VkError;
pub use http::HttpRequest;
pub use method::{Method, COMPLEX_METHODS};
pub use params::{ParamValue, Params};
pub use sig::signature;
pub use transport::{Transport, UreqTransport};
