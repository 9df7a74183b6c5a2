//! Request enum covering every provider method.
//!
//! Each RPC the host can make is one variant. Requests are:
//! - **Self-contained**: all parameters are in the variant
//! - **Serializable**: the method name is the `method` tag, arguments go in
//!   `params`
//!
//! Resource and data-source requests only carry the type name; the provider
//! rejects them before looking at anything else.

use serde::{Deserialize, Serialize};
use tfjq_core::DynamicValue;

/// A provider method call.
///
/// # Method Categories
///
/// | Category | Count | Outcome |
/// |----------|-------|---------|
/// | Provider | 5 | metadata, schema, validate, configure, stop |
/// | Resource | 6 | always `Error::NotSupported` |
/// | Data source | 2 | always `Error::NotSupported` |
/// | Function | 2 | call and list functions |
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "method", content = "params")]
pub enum Request {
    // ==================== Provider (5) ====================
    /// Static function names and server capabilities.
    /// Returns: `Response::GetMetadata`
    GetMetadata,

    /// Provider configuration schema and static function signatures.
    /// Returns: `Response::GetProviderSchema`
    GetProviderSchema,

    /// Validate provider configuration; accepted unchanged.
    /// Returns: `Response::ValidateProviderConfig`
    ValidateProviderConfig {
        /// Configuration value, `map(string)`
        config: DynamicValue,
    },

    /// Configure the provider and recompute dynamic functions.
    /// Returns: `Response::ConfigureProvider`
    ConfigureProvider {
        /// Configuration value, `map(string)`
        config: DynamicValue,
    },

    /// Shut down.
    /// Returns: `Response::StopProvider`
    StopProvider,

    // ==================== Resource (6) ====================
    /// Not supported.
    ValidateResourceConfig {
        /// Resource type name
        #[serde(default)]
        type_name: String,
    },

    /// Not supported.
    UpgradeResourceState {
        /// Resource type name
        #[serde(default)]
        type_name: String,
    },

    /// Not supported.
    ReadResource {
        /// Resource type name
        #[serde(default)]
        type_name: String,
    },

    /// Not supported.
    PlanResourceChange {
        /// Resource type name
        #[serde(default)]
        type_name: String,
    },

    /// Not supported.
    ApplyResourceChange {
        /// Resource type name
        #[serde(default)]
        type_name: String,
    },

    /// Not supported.
    ImportResourceState {
        /// Resource type name
        #[serde(default)]
        type_name: String,
    },

    // ==================== Data Source (2) ====================
    /// Not supported.
    ValidateDataResourceConfig {
        /// Data source type name
        #[serde(default)]
        type_name: String,
    },

    /// Not supported.
    ReadDataSource {
        /// Data source type name
        #[serde(default)]
        type_name: String,
    },

    // ==================== Function (2) ====================
    /// Invoke a function by name.
    /// Returns: `Response::CallFunction`
    CallFunction {
        /// Function name
        name: String,
        /// Positional arguments followed by the variadic tail
        #[serde(default)]
        arguments: Vec<DynamicValue>,
    },

    /// Signatures of every callable function, static and dynamic.
    /// Returns: `Response::GetFunctions`
    GetFunctions,
}

impl Request {
    /// Protocol method name.
    pub fn method(&self) -> &'static str {
        match self {
            Request::GetMetadata => "GetMetadata",
            Request::GetProviderSchema => "GetProviderSchema",
            Request::ValidateProviderConfig { .. } => "ValidateProviderConfig",
            Request::ConfigureProvider { .. } => "ConfigureProvider",
            Request::StopProvider => "StopProvider",
            Request::ValidateResourceConfig { .. } => "ValidateResourceConfig",
            Request::UpgradeResourceState { .. } => "UpgradeResourceState",
            Request::ReadResource { .. } => "ReadResource",
            Request::PlanResourceChange { .. } => "PlanResourceChange",
            Request::ApplyResourceChange { .. } => "ApplyResourceChange",
            Request::ImportResourceState { .. } => "ImportResourceState",
            Request::ValidateDataResourceConfig { .. } => "ValidateDataResourceConfig",
            Request::ReadDataSource { .. } => "ReadDataSource",
            Request::CallFunction { .. } => "CallFunction",
            Request::GetFunctions => "GetFunctions",
        }
    }
}
