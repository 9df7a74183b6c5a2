//! # tfjq Executor
//!
//! The provider protocol surface for tfjq: a Terraform/OpenTofu provider
//! that manages no resources and exposes one function, `exec`, which runs a
//! jq query over JSON input.
//!
//! It provides:
//! - [`ProviderServer`] - the protocol contract, one method per RPC
//! - [`FunctionProvider`] - the implementation
//! - [`Request`]/[`Response`] - serializable method calls, dispatched by
//!   [`Executor`]
//!
//! ## Quick Start
//!
//! ```text
//! use std::sync::Arc;
//! use tfjq_executor::{Executor, FunctionProvider, Request};
//!
//! let executor = Executor::new(Arc::new(FunctionProvider::new()));
//! let resp = executor.execute(Request::CallFunction {
//!     name: "exec".into(),
//!     arguments: vec![query, input],
//! })?;
//! ```
//!
//! ## Method Outcomes
//!
//! | Method | Outcome |
//! |--------|---------|
//! | `GetMetadata`, `GetProviderSchema` | static functions only |
//! | `ConfigureProvider` | replaces the dynamic function set |
//! | `CallFunction` | result or function error; unknown names fail |
//! | `GetFunctions` | static and dynamic functions |
//! | resource / data source | `Error::NotSupported` |

#![warn(missing_docs)]

mod config;
mod error;
mod executor;
mod functions;
mod provider;
mod registry;
mod request;
mod response;
mod types;

pub use config::{provider_schema, DynamicFunctions, NoDynamicFunctions, ProviderConfig, JQ_ATTRIBUTE};
pub use error::{Error, Result};
pub use executor::Executor;
pub use functions::{static_functions, ExecFunction, EXEC};
pub use provider::{FunctionProvider, ProviderServer, ProviderState};
pub use registry::{DynamicRegistry, FunctionImpl, FunctionRegistry, RegisteredFunction};
pub use request::Request;
pub use response::{
    CallFunctionResponse, ConfigureProviderResponse, GetFunctionsResponse, GetMetadataResponse,
    GetProviderSchemaResponse, Response, StopProviderResponse, ValidateProviderConfigResponse,
};
pub use types::*;

/// Re-exported for convenience
pub use tfjq_core::{DynamicValue, Value, ValueType};

/// Registry address the provider is served under.
pub const PROVIDER_ADDRESS: &str = "registry.opentofu.org/opentofu/jq";
