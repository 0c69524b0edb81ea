//! Dotted method-path dispatch.
//!
//! # Design
//! `Method` is an immutable path accumulator: `segment` extends the dotted
//! name and returns a new value, `invoke` forwards the accumulated name to
//! the client's direct-call path. Namespaces listed in `COMPLEX_METHODS`
//! take the exact same path as any other name; the list records which
//! remote namespaces are known to fan out into sub-methods.

use std::time::Duration;

use serde_json::Value;

use crate::client::VkClient;
use crate::error::VkError;
use crate::params::Params;

/// Remote namespaces known to expose multiple sub-methods
/// (`friends.get`, `ads.getStat`, ...).
pub const COMPLEX_METHODS: &[&str] = &[
    "secure",
    "ads",
    "messages",
    "likes",
    "friends",
    "groups",
    "photos",
    "audio",
    "video",
    "wall",
    "newsfeed",
    "notes",
    "pages",
    "places",
    "polls",
    "users",
    "storage",
    "notifications",
    "gifts",
    "docs",
    "fave",
    "stats",
    "subscriptions",
];

/// Accumulated dotted method path, bound to the client that created it.
///
/// A bare name is directly invokable (`client.method("getServerTime")`);
/// `segment` nests it under a namespace to any depth.
#[derive(Debug, Clone)]
pub struct Method<'a> {
    client: &'a VkClient,
    path: String,
}

impl<'a> Method<'a> {
    pub(crate) fn new(client: &'a VkClient, name: &str) -> Self {
        Self {
            client,
            path: name.to_string(),
        }
    }

    /// Extend the dotted path with one more segment.
    pub fn segment(mut self, name: &str) -> Self {
        self.path.push('.');
        self.path.push_str(name);
        self
    }

    /// The full dotted method name accumulated so far.
    pub fn name(&self) -> &str {
        &self.path
    }

    /// Invoke the accumulated method with the client's default timeout.
    pub fn invoke(&self, params: Params) -> Result<Value, VkError> {
        self.client.call(&self.path, params)
    }

    /// Invoke the accumulated method, blocking for at most `timeout`.
    pub fn invoke_with_timeout(&self, timeout: Duration, params: Params) -> Result<Value, VkError> {
        self.client.call_with_timeout(&self.path, timeout, params)
    }
}
