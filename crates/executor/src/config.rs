//! Provider configuration
//!
//! The provider block accepts a single optional string attribute, `jq`.
//! Configuration arrives as a `map(string)` wire value and may compute a
//! set of dynamic functions through [`DynamicFunctions`].

use std::collections::BTreeMap;

use tfjq_core::{decode_as, DynamicValue, ValueType};

use crate::error::{Error, Result};
use crate::registry::FunctionRegistry;
use crate::types::{Diagnostic, Schema, SchemaAttribute, SchemaBlock};

/// Name of the single configuration attribute.
pub const JQ_ATTRIBUTE: &str = "jq";

/// Decoded provider configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProviderConfig {
    /// Value of the `jq` attribute, if set and non-null
    pub jq: Option<String>,
}

impl ProviderConfig {
    /// Decode the host's configuration value.
    ///
    /// A null configuration decodes to the default. Attributes other than
    /// `jq` are ignored.
    pub fn decode(config: &DynamicValue) -> Result<Self> {
        let expected = ValueType::Map(Box::new(ValueType::String));
        let entries: Option<BTreeMap<String, Option<String>>> =
            decode_as(config, &expected).map_err(|e| Error::Config {
                reason: e.to_string(),
            })?;
        let jq = entries
            .and_then(|mut m| m.remove(JQ_ATTRIBUTE))
            .flatten();
        Ok(ProviderConfig { jq })
    }
}

/// Schema of the provider configuration block.
pub fn provider_schema() -> Schema {
    Schema {
        version: 0,
        block: SchemaBlock {
            version: 0,
            attributes: vec![SchemaAttribute {
                name: JQ_ATTRIBUTE.to_string(),
                ty: ValueType::String,
                description: "jq definitions made available to the provider".to_string(),
                required: false,
                optional: true,
                computed: false,
                sensitive: false,
            }],
            description: String::new(),
        },
    }
}

/// Computes the dynamic function set from configuration.
pub trait DynamicFunctions: Send + Sync {
    /// Build the function set for `config`, with any diagnostics to report.
    fn compute(&self, config: &ProviderConfig) -> (FunctionRegistry, Vec<Diagnostic>);
}

/// Yields an empty function set for every configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDynamicFunctions;

impl DynamicFunctions for NoDynamicFunctions {
    fn compute(&self, _config: &ProviderConfig) -> (FunctionRegistry, Vec<Diagnostic>) {
        (FunctionRegistry::new(), Vec::new())
    }
}
