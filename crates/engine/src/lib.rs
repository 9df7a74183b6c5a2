//! Query evaluation for tfjq
//!
//! - [`QueryEngine`]/[`Program`]: the query-language capability, treated as
//!   opaque by the rest of the provider
//! - [`JaqEngine`]: jq implementation backed by the `jaq` crates
//! - [`collector`]: halt/error rules and single-vs-multi arity normalization

#![warn(missing_docs)]

pub mod collector;
pub mod error;
pub mod jaq;
pub mod program;

pub use collector::{collect, evaluate, normalize};
pub use error::{EngineError, Result};
pub use jaq::JaqEngine;
pub use program::{Emitted, Program, QueryEngine, Signal};
