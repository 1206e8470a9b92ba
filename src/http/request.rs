//! Outgoing function invocation request.

use bytes::Bytes;
use std::collections::HashMap;

/// The request handed to the HTTP transport for one invocation.
///
/// The method is always `POST` by contract, so it is not carried here.
/// Header names are stored lowercased; lookup is case-insensitive either way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionRequest {
    /// Fully composed target URL (`<base_url>/<function_name>`).
    pub url: String,
    /// HTTP headers, names lowercased.
    pub headers: HashMap<String, String>,
    /// Request body. May be empty.
    pub body: Bytes,
}

impl FunctionRequest {
    /// Create a new request with no headers and an empty body.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            headers: HashMap::new(),
            body: Bytes::new(),
        }
    }

    /// Add a header to the request.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into().to_ascii_lowercase(), value.into());
        self
    }

    /// Set the request body.
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    /// Get a header value by case-insensitive name.
    pub fn get_header(&self, key: &str) -> Option<&String> {
        self.headers.get(&key.to_ascii_lowercase())
    }
}
