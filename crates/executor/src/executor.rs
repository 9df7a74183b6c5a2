//! The Executor - single entry point to the provider.
//!
//! The Executor is a stateless dispatcher that routes requests to the
//! matching [`ProviderServer`] method and wraps the result in a response.

use std::sync::Arc;

use crate::provider::ProviderServer;
use crate::{Request, Response, Result};

/// The request executor - single entry point to a provider.
///
/// The Executor is **stateless**: it holds a reference to the provider but
/// maintains no state of its own. Cloning is cheap and every clone talks to
/// the same provider.
///
/// # Example
///
/// ```ignore
/// use std::sync::Arc;
/// use tfjq_executor::{Executor, FunctionProvider, Request};
///
/// let executor = Executor::new(Arc::new(FunctionProvider::new()));
///
/// let metadata = executor.execute(Request::GetMetadata)?;
///
/// let results = executor.execute_many(vec![
///     Request::GetMetadata,
///     Request::GetFunctions,
/// ]);
/// ```
#[derive(Clone)]
pub struct Executor {
    provider: Arc<dyn ProviderServer>,
}

impl Executor {
    /// Create a new executor wrapping a provider.
    pub fn new(provider: Arc<dyn ProviderServer>) -> Self {
        Self { provider }
    }

    /// Execute a single request.
    ///
    /// Returns the response or the method's error.
    pub fn execute(&self, request: Request) -> Result<Response> {
        let provider = self.provider.as_ref();
        match request {
            // Provider
            Request::GetMetadata => Ok(Response::GetMetadata(provider.get_metadata())),
            Request::GetProviderSchema => {
                Ok(Response::GetProviderSchema(provider.get_provider_schema()))
            }
            Request::ValidateProviderConfig { config } => Ok(Response::ValidateProviderConfig(
                provider.validate_provider_config(config),
            )),
            Request::ConfigureProvider { config } => Ok(Response::ConfigureProvider(
                provider.configure_provider(&config),
            )),
            Request::StopProvider => Ok(Response::StopProvider(provider.stop_provider())),

            // Resources and data sources never succeed
            Request::ValidateResourceConfig { type_name } => {
                match provider.validate_resource_config(&type_name)? {}
            }
            Request::UpgradeResourceState { type_name } => {
                match provider.upgrade_resource_state(&type_name)? {}
            }
            Request::ReadResource { type_name } => match provider.read_resource(&type_name)? {},
            Request::PlanResourceChange { type_name } => {
                match provider.plan_resource_change(&type_name)? {}
            }
            Request::ApplyResourceChange { type_name } => {
                match provider.apply_resource_change(&type_name)? {}
            }
            Request::ImportResourceState { type_name } => {
                match provider.import_resource_state(&type_name)? {}
            }
            Request::ValidateDataResourceConfig { type_name } => {
                match provider.validate_data_resource_config(&type_name)? {}
            }
            Request::ReadDataSource { type_name } => {
                match provider.read_data_source(&type_name)? {}
            }

            // Functions
            Request::CallFunction { name, arguments } => Ok(Response::CallFunction(
                provider.call_function(&name, &arguments)?,
            )),
            Request::GetFunctions => Ok(Response::GetFunctions(provider.get_functions())),
        }
    }

    /// Execute multiple requests sequentially.
    ///
    /// Returns all results in the same order as the input requests.
    /// Execution continues even if some requests fail.
    pub fn execute_many(&self, requests: Vec<Request>) -> Vec<Result<Response>> {
        requests.into_iter().map(|req| self.execute(req)).collect()
    }
}
