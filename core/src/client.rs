//! Signed-request client for the VK HTTP API.
//!
//! # Design
//! `VkClient` is immutable after construction — it holds the credentials, a
//! default timeout and the transport, and carries no state between calls.
//! Each call is split into `build_request` (URL + query + signature) and
//! `parse_response` (envelope unwrap); `call` composes the two around
//! `Transport::send`. The split keeps the I/O boundary explicit and the
//! deterministic halves independently testable.

use std::time::Duration;

use log::debug;
use serde::Deserialize;
use serde_json::Value;
use url::Url;

use crate::error::VkError;
use crate::http::HttpRequest;
use crate::method::Method;
use crate::params::Params;
use crate::sig::signature;
use crate::transport::{Transport, UreqTransport};

/// Per-call timeout used when none is configured or supplied.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

const BASE_URL: &str = "https://api.vk.com/method/";

/// Shape of the remote `"error"` envelope payload.
#[derive(Debug, Deserialize)]
struct RemoteError {
    #[serde(default)]
    error_code: i64,
    #[serde(default)]
    error_msg: String,
}

/// Synchronous client for the VK API.
pub struct VkClient {
    app_id: String,
    app_secret: String,
    base_url: Url,
    timeout: Duration,
    transport: Box<dyn Transport + Send + Sync>,
}

impl std::fmt::Debug for VkClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VkClient")
            .field("app_id", &self.app_id)
            .field("base_url", &self.base_url.as_str())
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl VkClient {
    /// Create a client bound to the public VK endpoint.
    ///
    /// Fails with `VkError::MissingCredentials` when both `app_id` and
    /// `app_secret` are empty; the remote API needs at least minimal
    /// identification. A lone `app_id` is accepted and simply sends no
    /// signature.
    pub fn new(app_id: &str, app_secret: &str) -> Result<Self, VkError> {
        if app_id.is_empty() && app_secret.is_empty() {
            return Err(VkError::MissingCredentials);
        }
        let base_url = Url::parse(BASE_URL).map_err(|e| VkError::InvalidUrl(e.to_string()))?;
        Ok(Self {
            app_id: app_id.to_string(),
            app_secret: app_secret.to_string(),
            base_url,
            timeout: DEFAULT_TIMEOUT,
            transport: Box::new(UreqTransport::new()),
        })
    }

    /// Replace the default per-call timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Point the client at a different endpoint, e.g. a local emulator.
    /// The URL must end with `/` so method names join onto it as path
    /// segments.
    pub fn with_base_url(mut self, base_url: &str) -> Result<Self, VkError> {
        self.base_url = Url::parse(base_url).map_err(|e| VkError::InvalidUrl(e.to_string()))?;
        Ok(self)
    }

    /// Replace the transport. Tests substitute a recording double here.
    pub fn with_transport(mut self, transport: Box<dyn Transport + Send + Sync>) -> Self {
        self.transport = transport;
        self
    }

    /// Begin a dotted method path: `client.method("friends").segment("get")`.
    pub fn method(&self, name: &str) -> Method<'_> {
        Method::new(self, name)
    }

    /// Call `method_name` with the default timeout and return the unwrapped
    /// `"response"` payload.
    pub fn call(&self, method_name: &str, params: Params) -> Result<Value, VkError> {
        self.call_with_timeout(method_name, self.timeout, params)
    }

    /// Call `method_name`, blocking for at most `timeout`.
    pub fn call_with_timeout(
        &self,
        method_name: &str,
        timeout: Duration,
        params: Params,
    ) -> Result<Value, VkError> {
        let request = self.build_request(method_name, timeout, &params)?;
        let raw = self.transport.send(&request)?;
        self.parse_response(&raw)
    }

    /// Compose the GET request for `method_name`.
    ///
    /// The query carries the rendered params in sorted key order, `api_id`
    /// when the app id is present, and `sig` over every other pair when the
    /// secret is present. The method name itself lives in the URL path and
    /// is not signed.
    pub fn build_request(
        &self,
        method_name: &str,
        timeout: Duration,
        params: &Params,
    ) -> Result<HttpRequest, VkError> {
        let mut url = self
            .base_url
            .join(method_name)
            .map_err(|e| VkError::InvalidUrl(e.to_string()))?;

        let mut pairs = params.render()?;
        if !self.app_id.is_empty() {
            pairs.push(("api_id".to_string(), self.app_id.clone()));
        }
        pairs.sort_by(|a, b| a.0.cmp(&b.0));

        {
            let mut query = url.query_pairs_mut();
            for (key, value) in &pairs {
                query.append_pair(key, value);
            }
            if !self.app_secret.is_empty() {
                let sig = signature(
                    &self.app_secret,
                    pairs.iter().map(|(k, v)| (k.as_str(), v.as_str())),
                );
                query.append_pair("sig", &sig);
            }
        }

        debug!("built request for {method_name} ({} params)", pairs.len());
        Ok(HttpRequest {
            url: url.to_string(),
            timeout,
        })
    }

    /// Decode `raw` as JSON and unwrap the response envelope.
    ///
    /// `{"response": v}` yields `v` unmodified; `{"error": {...}}` yields
    /// `VkError::Api`; anything else is a decode failure.
    pub fn parse_response(&self, raw: &[u8]) -> Result<Value, VkError> {
        let value: Value =
            serde_json::from_slice(raw).map_err(|e| VkError::Decode(e.to_string()))?;
        let Value::Object(mut envelope) = value else {
            return Err(VkError::Decode("envelope is not a JSON object".to_string()));
        };

        if let Some(error) = envelope.remove("error") {
            let remote: RemoteError =
                serde_json::from_value(error).map_err(|e| VkError::Decode(e.to_string()))?;
            return Err(VkError::Api {
                code: remote.error_code,
                message: remote.error_msg,
            });
        }

        match envelope.remove("response") {
            Some(payload) => Ok(payload),
            None => Err(VkError::Decode(
                "envelope has neither \"response\" nor \"error\"".to_string(),
            )),
        }
    }
}
