//! Function invocation client.

pub mod error;
pub mod invoke;
pub mod options;

pub use error::InvokeError;
pub use invoke::FunctionsClient;
pub use options::InvokeOptions;
