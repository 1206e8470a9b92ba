//! # Edgecall - Serverless Function Invocation Client
//!
//! Edgecall is a minimal Rust client for invoking remote serverless edge
//! functions over HTTP. It builds one `POST` request per invocation against
//! `<base_url>/<function_name>`, attaches the client's shared headers
//! (bearer auth, client identification), sends the request through a
//! pluggable HTTP transport, and classifies the response as a success, an
//! HTTP error, or a relay error signaled by an upstream gateway.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                      FunctionsClient                         │
//! │   base URL + shared headers (authorization, x-client-info)   │
//! │                                                              │
//! │     invoke ──► build request ──► send ──► classify ──►       │
//! │                                            decode            │
//! └──────────────────────────────────────────────────────────────┘
//!                                   │
//!                                   ▼
//! ┌──────────────────────────────────────────────────────────────┐
//! │              HttpTransport (ReqwestTransport)                │
//! │        connections, TLS, pooling, timeouts live here         │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use edgecall::prelude::*;
//! use std::collections::HashMap;
//!
//! #[derive(serde::Deserialize)]
//! struct Greeting {
//!     message: String,
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
//!     let mut client = FunctionsClient::new(
//!         "https://functions.example.com",
//!         HashMap::new(),
//!     );
//!     client.set_auth("service-role-token");
//!
//!     let options = InvokeOptions::json(&serde_json::json!({ "name": "Ada" }))?;
//!     let greeting: Greeting = client.invoke_json("hello", options).await?;
//!     println!("{}", greeting.message);
//!     Ok(())
//! }
//! ```
//!
//! ## Response classification
//!
//! Each invocation is classified in a fixed order: transport failures first,
//! then malformed status codes, then non-2xx statuses (carrying the raw
//! response body), then the `x-relay-error: true` response header, which
//! marks a logical failure at a relaying gateway even when the status code
//! is in the success range. Only a response that passes all four checks
//! reaches the decode step.
//!
//! ## Concurrency
//!
//! Invocations are independent; nothing in this crate serializes them.
//! `set_auth` takes `&mut self`, so the borrow checker rules out mutating
//! the shared header set while an invocation on the same instance is in
//! flight. Callers that need per-call credentials can override headers per
//! invocation or hold separate client instances.

pub mod client;
pub mod http;
pub mod transport;

/// Re-export commonly used types.
pub mod prelude {
    pub use crate::client::{FunctionsClient, InvokeError, InvokeOptions};
    pub use crate::http::{FunctionRequest, FunctionResponse, ResponseContext, StatusCode};
    pub use crate::transport::{HttpTransport, ReqwestTransport, TransportError};
    pub use async_trait::async_trait;
}

// Re-export for convenience
pub use client::{FunctionsClient, InvokeError, InvokeOptions};
pub use http::{FunctionRequest, FunctionResponse, ResponseContext, StatusCode};
pub use transport::{HttpTransport, ReqwestTransport, TransportError};
