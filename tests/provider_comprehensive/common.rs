//! Shared test utilities for the provider suite.

#![allow(dead_code)]
#![allow(unused_imports)]

use std::collections::BTreeMap;
use std::sync::Arc;

pub use tfjq::{
    CallFunctionResponse, DynamicValue, Error, Executor, FunctionError, FunctionProvider,
    ProviderServer, Request, Response, Value, ValueType,
};
use tfjq_core::{decode_dynamic, encode, encode_dynamic, encode_string};

// ============================================================================
// Construction
// ============================================================================

/// Executor over a fresh default provider.
pub fn create_executor() -> Executor {
    Executor::new(Arc::new(FunctionProvider::new()))
}

/// Executor over an existing provider, sharing it.
pub fn executor_for(provider: Arc<FunctionProvider>) -> Executor {
    Executor::new(provider)
}

// ============================================================================
// Wire values
// ============================================================================

/// Query text as the host sends it (`string` parameter).
pub fn query(code: &str) -> DynamicValue {
    encode(&Value::from(code), &ValueType::String).unwrap()
}

/// JSON text input as the host sends it (dynamic string).
pub fn json_input(text: &str) -> DynamicValue {
    encode_string(text).unwrap()
}

/// Structured input as the host sends it (dynamic value).
pub fn value_input(v: serde_json::Value) -> DynamicValue {
    encode_dynamic(&Value::from(v)).unwrap()
}

/// Provider configuration, `map(string)`.
pub fn config(jq: Option<&str>) -> DynamicValue {
    let mut map = BTreeMap::new();
    map.insert("jq".to_string(), jq.map(Value::from).unwrap_or(Value::Null));
    encode(&Value::Object(map), &ValueType::Map(Box::new(ValueType::String))).unwrap()
}

// ============================================================================
// Calls
// ============================================================================

/// Decode a call result that must be a dynamic string.
pub fn result_text(out: &DynamicValue) -> String {
    match decode_dynamic(out).unwrap() {
        Value::String(s) => s,
        other => panic!("expected string result, got {:?}", other),
    }
}

/// Call a function through the executor; method errors panic.
pub fn call(
    executor: &Executor,
    name: &str,
    arguments: Vec<DynamicValue>,
) -> Result<String, FunctionError> {
    match executor
        .execute(Request::CallFunction {
            name: name.to_string(),
            arguments,
        })
        .unwrap()
    {
        Response::CallFunction(resp) => resp.into_result().map(|out| result_text(&out)),
        other => panic!("expected CallFunction response, got {:?}", other),
    }
}

/// `exec(code, input)` with JSON text input.
pub fn exec(executor: &Executor, code: &str, input: &str) -> Result<String, FunctionError> {
    call(executor, "exec", vec![query(code), json_input(input)])
}
