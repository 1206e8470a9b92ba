//! Per-call invocation options.

use bytes::Bytes;
use serde::Serialize;
use std::collections::HashMap;

const CONTENT_TYPE: &str = "content-type";

/// Per-call options for one invocation: an optional raw body plus header
/// overrides.
///
/// Consumed once per `invoke` call. On a header-name collision with the
/// client's stored headers, the per-call value wins; this is the intended
/// way to override `authorization` or `content-type` for a single call.
#[derive(Debug, Clone, Default)]
pub struct InvokeOptions {
    /// Per-call header overrides, names lowercased.
    pub headers: HashMap<String, String>,
    /// Request body. `None` sends an empty body.
    pub body: Option<Bytes>,
}

impl InvokeOptions {
    /// Create empty options: no body, no header overrides.
    pub fn new() -> Self {
        Self::default()
    }

    /// Options with a JSON-serialized body and a `content-type:
    /// application/json` default.
    pub fn json<T: Serialize>(payload: &T) -> Result<Self, serde_json::Error> {
        let body = serde_json::to_vec(payload)?;
        Ok(Self::new()
            .header(CONTENT_TYPE, "application/json")
            .body(body))
    }

    /// Options with a text body and a `content-type: text/plain` default.
    pub fn text(content: impl Into<String>) -> Self {
        Self::new()
            .header(CONTENT_TYPE, "text/plain")
            .body(content.into())
    }

    /// Options with a raw byte body and a `content-type:
    /// application/octet-stream` default.
    pub fn bytes(body: impl Into<Bytes>) -> Self {
        Self::new()
            .header(CONTENT_TYPE, "application/octet-stream")
            .body(body)
    }

    /// Add a per-call header. Overwrites any earlier value for the same
    /// name, including the content-type defaults set by the body helpers.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .insert(key.into().to_ascii_lowercase(), value.into());
        self
    }

    /// Set the request body.
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
        self
    }
}
