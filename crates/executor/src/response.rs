//! Response enum for provider method results.
//!
//! Every [`Request`](crate::Request) variant maps to exactly one `Response`
//! variant of the same name. Resource and data-source requests have no
//! response variant because they always fail.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tfjq_core::DynamicValue;

use crate::types::{Diagnostic, Function, FunctionError, FunctionMetadata, Schema, ServerCapabilities};

/// Successful provider method results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", content = "result")]
pub enum Response {
    /// Result of `GetMetadata`
    GetMetadata(GetMetadataResponse),
    /// Result of `GetProviderSchema`
    GetProviderSchema(GetProviderSchemaResponse),
    /// Result of `ValidateProviderConfig`
    ValidateProviderConfig(ValidateProviderConfigResponse),
    /// Result of `ConfigureProvider`
    ConfigureProvider(ConfigureProviderResponse),
    /// Result of `StopProvider`
    StopProvider(StopProviderResponse),
    /// Result of `CallFunction`
    CallFunction(CallFunctionResponse),
    /// Result of `GetFunctions`
    GetFunctions(GetFunctionsResponse),
}

/// Static function names and server capabilities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetMetadataResponse {
    /// Optional features
    pub server_capabilities: ServerCapabilities,
    /// Static function names, sorted
    pub functions: Vec<FunctionMetadata>,
    /// Always empty
    #[serde(default)]
    pub diagnostics: Vec<Diagnostic>,
}

/// Provider schema and static function signatures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetProviderSchemaResponse {
    /// Optional features
    pub server_capabilities: ServerCapabilities,
    /// Configuration schema
    pub provider: Schema,
    /// Static function signatures by name
    pub functions: BTreeMap<String, Function>,
    /// Always empty
    #[serde(default)]
    pub diagnostics: Vec<Diagnostic>,
}

/// Validated configuration, echoed back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidateProviderConfigResponse {
    /// The configuration as received
    pub prepared_config: DynamicValue,
    /// Always empty
    #[serde(default)]
    pub diagnostics: Vec<Diagnostic>,
}

/// Outcome of configuring the provider.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ConfigureProviderResponse {
    /// Decode failures and anything the dynamic function source reported
    #[serde(default)]
    pub diagnostics: Vec<Diagnostic>,
}

/// Acknowledgement of `StopProvider`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StopProviderResponse {
    /// Always empty
    #[serde(default)]
    pub error: String,
}

/// Outcome of a function call: a result or an error, never both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallFunctionResponse {
    /// Encoded return value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<DynamicValue>,
    /// Function failure
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<FunctionError>,
}

impl CallFunctionResponse {
    /// A successful call.
    pub fn ok(result: DynamicValue) -> Self {
        CallFunctionResponse {
            result: Some(result),
            error: None,
        }
    }

    /// A failed call.
    pub fn failed(error: FunctionError) -> Self {
        CallFunctionResponse {
            result: None,
            error: Some(error),
        }
    }

    /// View as a `Result`.
    pub fn into_result(self) -> std::result::Result<DynamicValue, FunctionError> {
        match (self.result, self.error) {
            (_, Some(e)) => Err(e),
            (Some(v), None) => Ok(v),
            (None, None) => Ok(DynamicValue::null()),
        }
    }
}

impl From<std::result::Result<DynamicValue, FunctionError>> for CallFunctionResponse {
    fn from(r: std::result::Result<DynamicValue, FunctionError>) -> Self {
        match r {
            Ok(v) => CallFunctionResponse::ok(v),
            Err(e) => CallFunctionResponse::failed(e),
        }
    }
}

/// Every callable function's signature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetFunctionsResponse {
    /// Signatures by name, static and dynamic
    pub functions: BTreeMap<String, Function>,
    /// Always empty
    #[serde(default)]
    pub diagnostics: Vec<Diagnostic>,
}
