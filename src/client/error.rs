//! Invocation error taxonomy.

use crate::http::StatusCode;
use crate::transport::TransportError;
use bytes::Bytes;

/// Classified failure of a single invocation.
///
/// Every variant is fatal to its call; the client performs no retry,
/// recovery, or suppression. Callers own any fallback logic.
#[derive(Debug)]
pub enum InvokeError {
    /// The underlying send failed and no response was received.
    Transport(TransportError),
    /// A response arrived but its status code could not be interpreted as
    /// standard HTTP.
    BadServerResponse(StatusCode),
    /// The function returned a status code outside [200, 300). Carries the
    /// raw, undecoded response body for inspection.
    Http {
        /// Status code of the failed response.
        status: StatusCode,
        /// Raw response body, not parsed.
        body: Bytes,
    },
    /// A relaying gateway reported an internal failure via the
    /// `x-relay-error` header despite a success-range status code.
    Relay,
    /// The success-path decode step failed.
    Decode(String),
}

impl InvokeError {
    /// Status code of the response, for the variants that carry one.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            InvokeError::BadServerResponse(status) => Some(*status),
            InvokeError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Lossy text view of the error response body, for the HTTP variant.
    pub fn body_text(&self) -> Option<String> {
        match self {
            InvokeError::Http { body, .. } => {
                Some(String::from_utf8_lossy(body).to_string())
            }
            _ => None,
        }
    }
}

impl std::fmt::Display for InvokeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvokeError::Transport(e) => write!(f, "{}", e),
            InvokeError::BadServerResponse(status) => {
                write!(f, "bad server response: status {}", status)
            }
            InvokeError::Http { status, body } => {
                write!(
                    f,
                    "http error: status {}: {}",
                    status,
                    String::from_utf8_lossy(body)
                )
            }
            InvokeError::Relay => write!(f, "relay error: upstream gateway reported a failure"),
            InvokeError::Decode(msg) => write!(f, "decode error: {}", msg),
        }
    }
}

impl std::error::Error for InvokeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            InvokeError::Transport(e) => Some(e),
            _ => None,
        }
    }
}

impl From<TransportError> for InvokeError {
    fn from(err: TransportError) -> Self {
        InvokeError::Transport(err)
    }
}

impl From<serde_json::Error> for InvokeError {
    fn from(err: serde_json::Error) -> Self {
        InvokeError::Decode(err.to_string())
    }
}
