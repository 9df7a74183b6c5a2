//! Error types for query evaluation

use thiserror::Error;

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;

/// Errors raised while preparing or running a query.
///
/// The display text is returned to the caller as the function error, so it
/// carries the engine's own message without extra decoration where the
/// engine already explains itself.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// Query text does not parse
    #[error("{0}")]
    Parse(String),

    /// Query parses but references unknown filters or variables
    #[error("{0}")]
    Compile(String),

    /// Execution failed, or the program raised a non-halt signal
    #[error("{0}")]
    Runtime(String),
}
