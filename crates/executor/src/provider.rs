//! The provider server
//!
//! [`ProviderServer`] is the protocol contract: one method per RPC.
//! [`FunctionProvider`] implements it for a provider that manages no
//! resources and exposes functions only.
//!
//! ## Function resolution
//!
//! A name resolves against the static set first, then the dynamic set.
//! Static entries can never be shadowed. Before the first
//! `ConfigureProvider` the dynamic set does not exist and lookups in it
//! always miss.
//!
//! ## Visibility
//!
//! `GetMetadata` and `GetProviderSchema` list static functions only.
//! `GetFunctions` and `CallFunction` also see dynamic ones.

use std::collections::BTreeMap;
use std::convert::Infallible;
use std::sync::Arc;

use tfjq_core::DynamicValue;
use tfjq_engine::{JaqEngine, QueryEngine};

use crate::config::{provider_schema, DynamicFunctions, NoDynamicFunctions, ProviderConfig};
use crate::error::{Error, Result};
use crate::functions::static_functions;
use crate::registry::{DynamicRegistry, FunctionRegistry, RegisteredFunction};
use crate::response::{
    CallFunctionResponse, ConfigureProviderResponse, GetFunctionsResponse, GetMetadataResponse,
    GetProviderSchemaResponse, StopProviderResponse, ValidateProviderConfigResponse,
};
use crate::types::{Diagnostic, FunctionMetadata, ServerCapabilities};

/// The provider protocol contract.
///
/// Resource and data-source methods return `Result<Infallible>`: a provider
/// can fail them but has nothing to return on success.
pub trait ProviderServer: Send + Sync {
    /// Static function names and capabilities.
    fn get_metadata(&self) -> GetMetadataResponse;
    /// Configuration schema and static function signatures.
    fn get_provider_schema(&self) -> GetProviderSchemaResponse;
    /// Validate configuration.
    fn validate_provider_config(&self, config: DynamicValue) -> ValidateProviderConfigResponse;
    /// Apply configuration.
    fn configure_provider(&self, config: &DynamicValue) -> ConfigureProviderResponse;
    /// Shut down.
    fn stop_provider(&self) -> StopProviderResponse;

    /// Validate a resource configuration.
    fn validate_resource_config(&self, type_name: &str) -> Result<Infallible>;
    /// Upgrade stored resource state.
    fn upgrade_resource_state(&self, type_name: &str) -> Result<Infallible>;
    /// Refresh a resource.
    fn read_resource(&self, type_name: &str) -> Result<Infallible>;
    /// Plan a resource change.
    fn plan_resource_change(&self, type_name: &str) -> Result<Infallible>;
    /// Apply a resource change.
    fn apply_resource_change(&self, type_name: &str) -> Result<Infallible>;
    /// Import existing infrastructure.
    fn import_resource_state(&self, type_name: &str) -> Result<Infallible>;
    /// Validate a data source configuration.
    fn validate_data_resource_config(&self, type_name: &str) -> Result<Infallible>;
    /// Read a data source.
    fn read_data_source(&self, type_name: &str) -> Result<Infallible>;

    /// Invoke a function by name.
    fn call_function(&self, name: &str, args: &[DynamicValue]) -> Result<CallFunctionResponse>;
    /// Every callable function's signature.
    fn get_functions(&self) -> GetFunctionsResponse;
}

/// Lifecycle state of a [`FunctionProvider`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderState {
    /// No `ConfigureProvider` yet; only static functions resolve
    Unconfigured,
    /// At least one `ConfigureProvider` has completed
    Configured,
}

/// Function-only provider.
///
/// `Send + Sync`; share it through `Arc` and call it from any thread.
pub struct FunctionProvider {
    static_functions: Arc<FunctionRegistry>,
    dynamic: DynamicRegistry,
    dynamic_source: Box<dyn DynamicFunctions>,
}

impl FunctionProvider {
    /// Provider with the built-in functions on the jaq engine and no
    /// dynamic functions.
    pub fn new() -> Self {
        Self::with_parts(Arc::new(JaqEngine::new()), Box::new(NoDynamicFunctions))
    }

    /// Provider with a custom query engine and dynamic function source.
    pub fn with_parts(engine: Arc<dyn QueryEngine>, dynamic_source: Box<dyn DynamicFunctions>) -> Self {
        FunctionProvider {
            static_functions: Arc::new(static_functions(engine)),
            dynamic: DynamicRegistry::new(),
            dynamic_source,
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> ProviderState {
        if self.dynamic.is_configured() {
            ProviderState::Configured
        } else {
            ProviderState::Unconfigured
        }
    }

    /// Resolve a name: static set first, then the current dynamic snapshot.
    pub fn resolve(&self, name: &str) -> Option<RegisteredFunction> {
        self.static_functions
            .get(name)
            .cloned()
            .or_else(|| self.dynamic.get(name))
    }

    fn static_definitions(&self) -> BTreeMap<String, crate::types::Function> {
        self.static_functions
            .definitions()
            .map(|(name, def)| (name.to_string(), def.clone()))
            .collect()
    }

    fn unsupported(method: &str, type_name: &str) -> Result<Infallible> {
        tracing::debug!(target: "tfjq::provider", method, type_name, "rejected unsupported method");
        Err(Error::not_supported(method))
    }
}

impl Default for FunctionProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl ProviderServer for FunctionProvider {
    fn get_metadata(&self) -> GetMetadataResponse {
        GetMetadataResponse {
            server_capabilities: ServerCapabilities::default(),
            functions: self
                .static_functions
                .names()
                .map(|name| FunctionMetadata {
                    name: name.to_string(),
                })
                .collect(),
            diagnostics: Vec::new(),
        }
    }

    fn get_provider_schema(&self) -> GetProviderSchemaResponse {
        GetProviderSchemaResponse {
            server_capabilities: ServerCapabilities::default(),
            provider: provider_schema(),
            functions: self.static_definitions(),
            diagnostics: Vec::new(),
        }
    }

    fn validate_provider_config(&self, config: DynamicValue) -> ValidateProviderConfigResponse {
        ValidateProviderConfigResponse {
            prepared_config: config,
            diagnostics: Vec::new(),
        }
    }

    fn configure_provider(&self, config: &DynamicValue) -> ConfigureProviderResponse {
        let (registry, diagnostics) = match ProviderConfig::decode(config) {
            Ok(config) => self.dynamic_source.compute(&config),
            Err(e) => {
                tracing::warn!(target: "tfjq::provider", error = %e, "invalid configure payload");
                let detail = match e {
                    Error::Config { reason } => reason,
                    other => other.to_string(),
                };
                (
                    FunctionRegistry::new(),
                    vec![Diagnostic::error("Invalid configure payload", detail)],
                )
            }
        };
        tracing::info!(
            target: "tfjq::provider",
            dynamic_functions = registry.len(),
            "provider configured"
        );
        self.dynamic.replace(registry);
        ConfigureProviderResponse { diagnostics }
    }

    fn stop_provider(&self) -> StopProviderResponse {
        tracing::info!(target: "tfjq::provider", "stop requested");
        StopProviderResponse::default()
    }

    fn validate_resource_config(&self, type_name: &str) -> Result<Infallible> {
        Self::unsupported("ValidateResourceConfig", type_name)
    }

    fn upgrade_resource_state(&self, type_name: &str) -> Result<Infallible> {
        Self::unsupported("UpgradeResourceState", type_name)
    }

    fn read_resource(&self, type_name: &str) -> Result<Infallible> {
        Self::unsupported("ReadResource", type_name)
    }

    fn plan_resource_change(&self, type_name: &str) -> Result<Infallible> {
        Self::unsupported("PlanResourceChange", type_name)
    }

    fn apply_resource_change(&self, type_name: &str) -> Result<Infallible> {
        Self::unsupported("ApplyResourceChange", type_name)
    }

    fn import_resource_state(&self, type_name: &str) -> Result<Infallible> {
        Self::unsupported("ImportResourceState", type_name)
    }

    fn validate_data_resource_config(&self, type_name: &str) -> Result<Infallible> {
        Self::unsupported("ValidateDataResourceConfig", type_name)
    }

    fn read_data_source(&self, type_name: &str) -> Result<Infallible> {
        Self::unsupported("ReadDataSource", type_name)
    }

    fn call_function(&self, name: &str, args: &[DynamicValue]) -> Result<CallFunctionResponse> {
        let function = self.resolve(name).ok_or_else(|| {
            tracing::debug!(target: "tfjq::provider", name, "unknown function");
            Error::UnknownFunction {
                name: name.to_string(),
            }
        })?;
        let outcome = function.implementation.call(args);
        if let Err(e) = &outcome {
            tracing::debug!(target: "tfjq::provider", name, error = %e, "function failed");
        }
        Ok(CallFunctionResponse::from(outcome))
    }

    fn get_functions(&self) -> GetFunctionsResponse {
        let mut functions = BTreeMap::new();
        if let Some(dynamic) = self.dynamic.snapshot() {
            functions.extend(
                dynamic
                    .definitions()
                    .map(|(name, def)| (name.to_string(), def.clone())),
            );
        }
        // static entries win on a name clash
        functions.extend(self.static_definitions());
        GetFunctionsResponse {
            functions,
            diagnostics: Vec::new(),
        }
    }
}
