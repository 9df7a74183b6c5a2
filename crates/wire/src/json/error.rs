//! Envelope decode errors

use thiserror::Error;

/// A line that is not a valid envelope
#[derive(Debug, Error)]
pub enum DecodeError {
    /// Not JSON, or not an object with a string `id` and `method`
    #[error("invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// Well-formed envelope whose method or params do not match a request
    #[error("invalid request: {reason}")]
    InvalidRequest {
        /// Id of the offending request, echoed in the error response
        id: String,
        /// What did not match
        reason: String,
    },
}

impl DecodeError {
    /// Id to answer with; empty when the line had none.
    pub fn id(&self) -> &str {
        match self {
            DecodeError::InvalidJson(_) => "",
            DecodeError::InvalidRequest { id, .. } => id,
        }
    }
}
