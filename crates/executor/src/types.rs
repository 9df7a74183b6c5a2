//! Supporting types for requests and responses.
//!
//! These mirror the provider protocol's messages: function signatures,
//! schemas, diagnostics and function errors. All types are serializable so
//! transports can carry them unchanged.

use serde::{Deserialize, Serialize};
use tfjq_core::ValueType;
use tfjq_engine::EngineError;

// =============================================================================
// Function Signatures
// =============================================================================

/// One declared parameter of a function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionParameter {
    /// Parameter name, used in host error messages
    pub name: String,
    /// Declared type
    #[serde(rename = "type")]
    pub ty: ValueType,
    /// Whether the host may pass null for this parameter
    #[serde(default)]
    pub allow_null_value: bool,
    /// Whether the host may pass unknown values; never set by this provider
    #[serde(default)]
    pub allow_unknown_values: bool,
    /// Human-readable description
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
}

impl FunctionParameter {
    /// A required, non-nullable parameter.
    pub fn new(name: impl Into<String>, ty: ValueType) -> Self {
        FunctionParameter {
            name: name.into(),
            ty,
            allow_null_value: false,
            allow_unknown_values: false,
            description: String::new(),
        }
    }

    /// Allow null for this parameter.
    pub fn nullable(mut self) -> Self {
        self.allow_null_value = true;
        self
    }

    /// Attach a description.
    pub fn describe(mut self, text: impl Into<String>) -> Self {
        self.description = text.into();
        self
    }
}

/// Declared return type of a function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionReturn {
    /// Return type
    #[serde(rename = "type")]
    pub ty: ValueType,
}

/// Full signature of a callable function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Function {
    /// Positional parameters, in call order
    pub parameters: Vec<FunctionParameter>,
    /// Trailing parameter accepting zero or more arguments
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variadic_parameter: Option<FunctionParameter>,
    /// Return type
    #[serde(rename = "return")]
    pub return_: FunctionReturn,
    /// One-line summary
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub summary: String,
    /// Longer description
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// Set when the function is deprecated
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deprecation_message: Option<String>,
}

/// Entry of the metadata function list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionMetadata {
    /// Function name
    pub name: String,
}

/// Optional protocol features the server supports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerCapabilities {
    /// The host may skip `GetProviderSchema` and rely on `GetMetadata`
    pub get_provider_schema_optional: bool,
}

impl Default for ServerCapabilities {
    fn default() -> Self {
        ServerCapabilities {
            get_provider_schema_optional: true,
        }
    }
}

// =============================================================================
// Schemas
// =============================================================================

/// A configuration schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    /// Schema version
    pub version: i64,
    /// Top-level block
    pub block: SchemaBlock,
}

/// A block of attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaBlock {
    /// Block version
    pub version: i64,
    /// Attributes, in declaration order
    pub attributes: Vec<SchemaAttribute>,
    /// Human-readable description
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
}

/// A single schema attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaAttribute {
    /// Attribute name
    pub name: String,
    /// Attribute type
    #[serde(rename = "type")]
    pub ty: ValueType,
    /// Human-readable description
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// Must be set by the user
    #[serde(default)]
    pub required: bool,
    /// May be set by the user
    #[serde(default)]
    pub optional: bool,
    /// Set by the provider
    #[serde(default)]
    pub computed: bool,
    /// Hidden in host output
    #[serde(default)]
    pub sensitive: bool,
}

// =============================================================================
// Diagnostics
// =============================================================================

/// Diagnostic severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiagnosticSeverity {
    /// Operation failed
    Error,
    /// Operation succeeded with a caveat
    Warning,
}

/// A message attached to a method response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Severity
    pub severity: DiagnosticSeverity,
    /// Short summary
    pub summary: String,
    /// Detail text
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub detail: String,
}

impl Diagnostic {
    /// An Error-severity diagnostic.
    pub fn error(summary: impl Into<String>, detail: impl Into<String>) -> Self {
        Diagnostic {
            severity: DiagnosticSeverity::Error,
            summary: summary.into(),
            detail: detail.into(),
        }
    }

    /// A Warning-severity diagnostic.
    pub fn warning(summary: impl Into<String>, detail: impl Into<String>) -> Self {
        Diagnostic {
            severity: DiagnosticSeverity::Warning,
            summary: summary.into(),
            detail: detail.into(),
        }
    }
}

// =============================================================================
// Function Errors
// =============================================================================

/// Failure of a function call, returned in the call response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionError {
    /// Message shown to the user
    pub text: String,
    /// Index of the argument at fault, when one is
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function_argument: Option<i64>,
}

impl FunctionError {
    /// An error not tied to any argument.
    pub fn new(text: impl Into<String>) -> Self {
        FunctionError {
            text: text.into(),
            function_argument: None,
        }
    }

    /// An error caused by the argument at `index`.
    pub fn argument(index: usize, err: impl std::fmt::Display) -> Self {
        FunctionError {
            text: err.to_string(),
            function_argument: i64::try_from(index).ok(),
        }
    }
}

impl std::fmt::Display for FunctionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.text)
    }
}

impl From<EngineError> for FunctionError {
    fn from(e: EngineError) -> Self {
        FunctionError::new(e.to_string())
    }
}

impl From<tfjq_core::Error> for FunctionError {
    fn from(e: tfjq_core::Error) -> Self {
        FunctionError::new(e.to_string())
    }
}
