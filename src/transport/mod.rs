//! HTTP transport seam between the client and the network.

pub mod reqwest;

use crate::http::{FunctionRequest, FunctionResponse};
use async_trait::async_trait;

pub use self::reqwest::ReqwestTransport;

/// One-shot HTTP transport used by the invocation client.
///
/// A transport sends a single `POST` request and returns the raw response,
/// or fails with a [`TransportError`] when no response was received at all.
/// Connection management, TLS, pooling, redirects, and timeouts are the
/// transport's concern; the client performs no retries on top of it.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Send one request and await one response.
    async fn send(&self, request: FunctionRequest) -> Result<FunctionResponse, TransportError>;
}

/// Transport-level failure: the request could not be sent or no response
/// came back.
#[derive(Debug, Clone)]
pub struct TransportError {
    /// Error message.
    pub message: String,
}

impl TransportError {
    /// Create a new TransportError.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl std::fmt::Display for TransportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "transport error: {}", self.message)
    }
}

impl std::error::Error for TransportError {}
