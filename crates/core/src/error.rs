//! Error types for the value layer
//!
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.
//! The display text of these errors is what callers of a function see, so
//! messages are written for the person who supplied the argument.

use thiserror::Error;

/// Result type alias for codec operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while converting between wire and native values
#[derive(Debug, Error)]
pub enum Error {
    /// Wire bytes do not match the expected shape
    #[error("cannot decode {expected} value: {reason}")]
    Decode {
        /// Expected type, in host notation
        expected: String,
        /// What was wrong with the bytes
        reason: String,
    },

    /// A native value could not be written to the wire
    #[error("cannot encode value: {0}")]
    Encode(String),

    /// A type tag or signature type is malformed
    #[error("invalid type: {0}")]
    InvalidType(String),

    /// Input text is not valid JSON
    #[error("invalid JSON input: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn decode(expected: impl ToString, reason: impl Into<String>) -> Self {
        Error::Decode {
            expected: expected.to_string(),
            reason: reason.into(),
        }
    }
}
