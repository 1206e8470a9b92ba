//! Default transport over a `reqwest` client.

use crate::http::{FunctionRequest, FunctionResponse, StatusCode};
use crate::transport::{HttpTransport, TransportError};
use async_trait::async_trait;
use std::collections::HashMap;
use tracing::debug;

/// Production transport backed by [`reqwest::Client`].
///
/// TLS, connection pooling, redirects, and timeouts are configured on the
/// underlying `reqwest` client, not here.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Create a transport with a default `reqwest` client.
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// Create a transport from a caller-configured `reqwest` client
    /// (custom timeouts, proxies, pool limits).
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: FunctionRequest) -> Result<FunctionResponse, TransportError> {
        let mut builder = self.client.post(&request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }

        let response = builder
            .body(request.body)
            .send()
            .await
            .map_err(|e| TransportError::new(e.to_string()))?;

        let status = StatusCode(response.status().as_u16());

        // Header values that are not valid UTF-8 are dropped rather than
        // failing the whole response.
        let mut headers = HashMap::new();
        for (name, value) in response.headers() {
            if let Ok(v) = value.to_str() {
                headers.insert(name.as_str().to_string(), v.to_string());
            }
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| TransportError::new(e.to_string()))?;

        debug!("received response: status {} ({} body bytes)", status, body.len());

        Ok(FunctionResponse {
            status,
            headers,
            body,
        })
    }
}
