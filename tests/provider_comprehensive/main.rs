//! Provider Tests
//!
//! End-to-end tests for the tfjq provider:
//! - CallFunction - `exec` semantics and result arity
//! - Lifecycle - configure and the dynamic function set
//! - Metadata - schema, metadata and unsupported operations
//! - Concurrency - configure racing function calls
//! - Envelope - the line-delimited JSON transport and serve loop

mod common;

mod call_function;
mod concurrency;
mod lifecycle;
mod metadata;
