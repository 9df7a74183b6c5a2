//! Error types for provider methods.
//!
//! Method-level failures are represented by the [`Error`] enum. These are
//! the errors the transport reports for a whole RPC. Failures *inside* a
//! function call (bad argument, query error) are not method errors: they
//! travel in the call response as a [`FunctionError`](crate::FunctionError).
//!
//! | Variant | Raised by |
//! |---------|-----------|
//! | `UnknownFunction` | `CallFunction` on a name neither registry knows |
//! | `NotSupported` | every resource and data-source method |
//! | `InvalidRequest` | transports handed a request they cannot decode |
//! | `Config` | configuration decode (reported as a diagnostic, see below) |
//! | `Internal` | bugs in the serving layer |
//!
//! `Config` never escapes `ConfigureProvider` as an `Err`; the provider turns
//! it into an Error-severity [`Diagnostic`](crate::Diagnostic).

use serde::{Deserialize, Serialize};

/// Result type for provider methods
pub type Result<T> = std::result::Result<T, Error>;

/// Provider method errors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, thiserror::Error)]
pub enum Error {
    /// Function name not found in the static or dynamic registry
    #[error("unknown function {name}")]
    UnknownFunction {
        /// Requested name
        name: String,
    },

    /// The provider manages no resources or data sources
    #[error("not supported")]
    NotSupported {
        /// Rejected method
        method: String,
    },

    /// Request could not be decoded
    #[error("invalid request: {reason}")]
    InvalidRequest {
        /// What could not be decoded
        reason: String,
    },

    /// Configuration payload is malformed
    #[error("invalid configure payload: {reason}")]
    Config {
        /// Decode failure text
        reason: String,
    },

    /// Internal error (bug or invariant violation)
    #[error("internal error: {reason}")]
    Internal {
        /// Description
        reason: String,
    },
}

impl Error {
    /// Stable machine-readable code, used by transports.
    pub fn code(&self) -> &'static str {
        match self {
            Error::UnknownFunction { .. } => "UnknownFunction",
            Error::NotSupported { .. } => "NotSupported",
            Error::InvalidRequest { .. } => "InvalidRequest",
            Error::Config { .. } => "Config",
            Error::Internal { .. } => "Internal",
        }
    }

    pub(crate) fn not_supported(method: &str) -> Self {
        Error::NotSupported {
            method: method.to_string(),
        }
    }
}
