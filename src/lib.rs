//! tfjq - jq for Terraform and OpenTofu
//!
//! A provider plugin that manages no resources and exposes a single function,
//! `exec`, which runs a jq query over JSON input and returns the result as
//! JSON text:
//!
//! ```text
//! provider::jq::exec(".items | length", jsonencode(local.doc))
//! ```
//!
//! # Architecture
//!
//! All provider methods go through the [`Executor`], which dispatches
//! [`Request`]s to a [`FunctionProvider`]. The [`serve`] loop carries
//! requests and responses over a byte stream, one JSON object per line.
//!
//! Value encoding, the query engine and the envelope live in their own
//! crates; only the executor API and the serve loop are re-exported here.

pub mod serve;

pub use serve::serve;

// Re-export the public API from tfjq-executor
pub use tfjq_executor::*;
