//! HTTP value types exchanged between the client and its transport.

pub mod request;
pub mod response;

pub use request::FunctionRequest;
pub use response::{FunctionResponse, ResponseContext, StatusCode};
