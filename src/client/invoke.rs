//! The function invocation client.

use crate::client::{InvokeError, InvokeOptions};
use crate::http::{FunctionRequest, FunctionResponse, ResponseContext};
use crate::transport::{HttpTransport, ReqwestTransport};
use bytes::Bytes;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// Header identifying this client, seeded at construction and not
/// overridable through initial headers.
pub const CLIENT_INFO_HEADER: &str = "x-client-info";

/// Header identifying the bearer token, set by [`FunctionsClient::set_auth`].
pub const AUTHORIZATION_HEADER: &str = "authorization";

/// Response header a relaying gateway uses to signal an internal failure
/// while still returning a success-range status to the outer client.
const RELAY_ERROR_HEADER: &str = "x-relay-error";

/// Client for invoking named serverless functions under one base URL.
///
/// Holds the base URL and a shared header set (bearer auth, client
/// identification). Each `invoke_*` call builds one `POST` request, sends it
/// through the transport, classifies the response, and runs a decode step on
/// success. Invocations never mutate client state; only [`set_auth`]
/// (`&mut self`) and construction do, so the borrow checker keeps header
/// mutation and in-flight invocations apart on a single instance.
///
/// [`set_auth`]: FunctionsClient::set_auth
pub struct FunctionsClient {
    /// Base URL all function names are appended to. Immutable.
    base_url: String,
    /// Shared headers sent with every invocation, names lowercased.
    headers: HashMap<String, String>,
    /// Transport the requests go through.
    transport: Arc<dyn HttpTransport>,
}

impl FunctionsClient {
    /// Create a client over the default [`ReqwestTransport`].
    ///
    /// Stores a copy of `initial_headers` and then seeds
    /// `x-client-info: edgecall/<version>`, overwriting any caller-supplied
    /// value for that key. Performs no I/O and no reachability validation.
    pub fn new(base_url: impl Into<String>, initial_headers: HashMap<String, String>) -> Self {
        Self::with_transport(base_url, initial_headers, Arc::new(ReqwestTransport::new()))
    }

    /// Create a client over a caller-supplied transport.
    pub fn with_transport(
        base_url: impl Into<String>,
        initial_headers: HashMap<String, String>,
        transport: Arc<dyn HttpTransport>,
    ) -> Self {
        let mut headers: HashMap<String, String> = initial_headers
            .into_iter()
            .map(|(k, v)| (k.to_ascii_lowercase(), v))
            .collect();
        headers.insert(
            CLIENT_INFO_HEADER.to_string(),
            format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
        );

        Self {
            base_url: base_url.into(),
            headers,
            transport,
        }
    }

    /// Set the bearer token sent as the `authorization` header.
    ///
    /// Pure mutation, no token validation. Subsequent invocations use the
    /// new value; an invocation that already snapshotted its headers keeps
    /// the old one.
    pub fn set_auth(&mut self, token: impl AsRef<str>) {
        self.headers.insert(
            AUTHORIZATION_HEADER.to_string(),
            format!("Bearer {}", token.as_ref()),
        );
    }

    /// The shared headers as currently stored.
    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Invoke a function and discard the response body.
    pub async fn invoke(&self, name: &str, options: InvokeOptions) -> Result<(), InvokeError> {
        self.send(name, options).await.map(|_| ())
    }

    /// Invoke a function and parse the response body as JSON into `T`.
    pub async fn invoke_json<T: DeserializeOwned>(
        &self,
        name: &str,
        options: InvokeOptions,
    ) -> Result<T, InvokeError> {
        let response = self.send(name, options).await?;
        serde_json::from_slice(&response.body).map_err(InvokeError::from)
    }

    /// Invoke a function and decode the response with a caller-supplied
    /// closure over the raw body bytes and response metadata.
    ///
    /// A decode failure propagates unchanged as the invocation's failure.
    pub async fn invoke_with<T, F>(
        &self,
        name: &str,
        options: InvokeOptions,
        decode: F,
    ) -> Result<T, InvokeError>
    where
        F: FnOnce(Bytes, ResponseContext) -> Result<T, InvokeError>,
    {
        let response = self.send(name, options).await?;
        let (body, context) = response.into_parts();
        decode(body, context)
    }

    /// Build, send, and classify one invocation. Success hands back the raw
    /// response for the caller's decode step.
    async fn send(
        &self,
        name: &str,
        options: InvokeOptions,
    ) -> Result<FunctionResponse, InvokeError> {
        let request = self.build_request(name, options);
        debug!("invoking function '{}' at {}", name, request.url);

        let response = self.transport.send(request).await?;
        classify(name, response)
    }

    /// Compose the target URL and merge headers. Per-call headers win over
    /// the client's stored headers on a name collision.
    fn build_request(&self, name: &str, options: InvokeOptions) -> FunctionRequest {
        let mut headers = self.headers.clone();
        for (key, value) in options.headers {
            headers.insert(key.to_ascii_lowercase(), value);
        }

        FunctionRequest {
            url: format!("{}/{}", self.base_url.trim_end_matches('/'), name),
            headers,
            body: options.body.unwrap_or_default(),
        }
    }
}

/// Classify a raw response, in order: malformed status, non-2xx status,
/// relay-error header, success.
///
/// The relay check runs only after the status check passes; the header value
/// must be exactly `"true"` (the header name is case-insensitive, the value
/// is not).
fn classify(name: &str, response: FunctionResponse) -> Result<FunctionResponse, InvokeError> {
    if !response.status.is_well_formed() {
        warn!(
            "function '{}' returned uninterpretable status {}",
            name, response.status
        );
        return Err(InvokeError::BadServerResponse(response.status));
    }

    if !response.status.is_success() {
        debug!(
            "function '{}' failed with status {}",
            name, response.status
        );
        return Err(InvokeError::Http {
            status: response.status,
            body: response.body,
        });
    }

    if response.get_header(RELAY_ERROR_HEADER).map(String::as_str) == Some("true") {
        warn!("function '{}' signaled a relay error", name);
        return Err(InvokeError::Relay);
    }

    Ok(response)
}
