//! Lifecycle Tests
//!
//! The Unconfigured/Configured state machine and the dynamic function set.

use std::sync::Arc;

use crate::common::*;
use tfjq::{
    Diagnostic, DiagnosticSeverity, DynamicFunctions, Function, FunctionImpl, FunctionRegistry,
    FunctionReturn, ProviderConfig, ProviderState, RegisteredFunction,
};
use tfjq_engine::JaqEngine;

/// Echoes the configured `jq` text back from a dynamic function named `echo_config`.
struct EchoConfig;

struct Echo(String);

impl FunctionImpl for Echo {
    fn call(&self, _args: &[DynamicValue]) -> Result<DynamicValue, FunctionError> {
        tfjq_core::encode_string(&self.0).map_err(FunctionError::from)
    }
}

impl DynamicFunctions for EchoConfig {
    fn compute(&self, config: &ProviderConfig) -> (FunctionRegistry, Vec<Diagnostic>) {
        let Some(text) = config.jq.clone() else {
            return (FunctionRegistry::new(), Vec::new());
        };
        let function = RegisteredFunction {
            name: "echo_config".to_string(),
            definition: Function {
                parameters: vec![],
                variadic_parameter: None,
                return_: FunctionReturn {
                    ty: ValueType::Dynamic,
                },
                summary: String::new(),
                description: String::new(),
                deprecation_message: None,
            },
            implementation: Arc::new(Echo(text)),
        };
        (std::iter::once(function).collect(), Vec::new())
    }
}

fn echo_provider() -> Arc<FunctionProvider> {
    Arc::new(FunctionProvider::with_parts(
        Arc::new(JaqEngine::new()),
        Box::new(EchoConfig),
    ))
}

fn configure(executor: &Executor, cfg: DynamicValue) -> Vec<Diagnostic> {
    match executor
        .execute(Request::ConfigureProvider { config: cfg })
        .unwrap()
    {
        Response::ConfigureProvider(resp) => resp.diagnostics,
        other => panic!("expected ConfigureProvider response, got {:?}", other),
    }
}

// ============================================================================
// State machine
// ============================================================================

#[test]
fn exec_callable_before_configure() {
    let provider = Arc::new(FunctionProvider::new());
    let executor = executor_for(provider.clone());
    assert_eq!(provider.state(), ProviderState::Unconfigured);
    assert_eq!(exec(&executor, ".", "1").unwrap(), "1");
    assert_eq!(provider.state(), ProviderState::Unconfigured);
}

#[test]
fn configure_enters_configured() {
    let provider = Arc::new(FunctionProvider::new());
    let executor = executor_for(provider.clone());
    assert!(configure(&executor, config(Some("def f: 1;"))).is_empty());
    assert_eq!(provider.state(), ProviderState::Configured);
}

#[test]
fn configure_is_idempotent() {
    let provider = Arc::new(FunctionProvider::new());
    let executor = executor_for(provider.clone());
    for _ in 0..3 {
        assert!(configure(&executor, config(None)).is_empty());
        assert_eq!(provider.state(), ProviderState::Configured);
        assert_eq!(exec(&executor, ".", "true").unwrap(), "true");
    }
}

#[test]
fn null_configuration_accepted() {
    let executor = create_executor();
    assert!(configure(&executor, DynamicValue::null()).is_empty());
}

#[test]
fn malformed_configuration_reports_diagnostic() {
    let provider = Arc::new(FunctionProvider::new());
    let executor = executor_for(provider.clone());
    let diags = configure(&executor, value_input(serde_json::json!([1, 2])));

    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0].severity, DiagnosticSeverity::Error);
    assert_eq!(diags[0].summary, "Invalid configure payload");
    assert_eq!(provider.state(), ProviderState::Configured);
    // static functions unaffected
    assert_eq!(exec(&executor, ".", "2").unwrap(), "2");
}

// ============================================================================
// Dynamic functions
// ============================================================================

#[test]
fn dynamic_function_unknown_before_configure() {
    let executor = executor_for(echo_provider());
    let err = executor
        .execute(Request::CallFunction {
            name: "echo_config".into(),
            arguments: vec![],
        })
        .unwrap_err();
    assert_eq!(err.to_string(), "unknown function echo_config");
}

#[test]
fn dynamic_function_reflects_latest_configure() {
    let executor = executor_for(echo_provider());

    configure(&executor, config(Some("first")));
    assert_eq!(call(&executor, "echo_config", vec![]).unwrap(), "first");

    configure(&executor, config(Some("second")));
    assert_eq!(call(&executor, "echo_config", vec![]).unwrap(), "second");
}

#[test]
fn reconfigure_removes_dynamic_functions() {
    let executor = executor_for(echo_provider());
    configure(&executor, config(Some("x")));
    configure(&executor, config(None));
    assert!(executor
        .execute(Request::CallFunction {
            name: "echo_config".into(),
            arguments: vec![],
        })
        .is_err());
}

#[test]
fn malformed_configuration_clears_dynamic_functions() {
    let executor = executor_for(echo_provider());
    configure(&executor, config(Some("x")));
    let diags = configure(&executor, json_input("not a map"));
    assert_eq!(diags.len(), 1);
    assert!(call_fails(&executor, "echo_config"));
}

fn call_fails(executor: &Executor, name: &str) -> bool {
    executor
        .execute(Request::CallFunction {
            name: name.to_string(),
            arguments: vec![],
        })
        .is_err()
}

#[test]
fn get_functions_includes_dynamic_after_configure() {
    let executor = executor_for(echo_provider());
    let names = |executor: &Executor| match executor.execute(Request::GetFunctions).unwrap() {
        Response::GetFunctions(resp) => resp.functions.into_keys().collect::<Vec<_>>(),
        other => panic!("expected GetFunctions response, got {:?}", other),
    };

    assert_eq!(names(&executor), vec!["exec"]);
    configure(&executor, config(Some("x")));
    assert_eq!(names(&executor), vec!["echo_config", "exec"]);
}
