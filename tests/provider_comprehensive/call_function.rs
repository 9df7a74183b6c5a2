//! CallFunction Tests
//!
//! `exec` semantics: input handling, result arity, halt and error
//! propagation, and unknown function names.

use std::sync::Arc;

use crate::common::*;
use proptest::prelude::*;
use tfjq::NoDynamicFunctions;
use tfjq_engine::{Emitted, EngineError, Program, QueryEngine, Signal};

// ============================================================================
// Result arity
// ============================================================================

#[test]
fn identity_returns_input() {
    let executor = create_executor();
    assert_eq!(exec(&executor, ".", r#"{"a":1}"#).unwrap(), r#"{"a":1}"#);
}

#[test]
fn two_results_become_array() {
    let executor = create_executor();
    assert_eq!(exec(&executor, ".a, .a", r#"{"a":1}"#).unwrap(), "[1,1]");
}

#[test]
fn no_results_become_empty_array() {
    let executor = create_executor();
    assert_eq!(exec(&executor, "empty", "{}").unwrap(), "[]");
}

#[test]
fn single_array_result_not_wrapped() {
    let executor = create_executor();
    assert_eq!(exec(&executor, "[.a]", r#"{"a":1}"#).unwrap(), "[1]");
}

#[test]
fn results_keep_emission_order() {
    let executor = create_executor();
    assert_eq!(
        exec(&executor, ".[] | .name", r#"[{"name":"b"},{"name":"a"}]"#).unwrap(),
        r#"["b","a"]"#
    );
}

#[test]
fn string_result_is_json_quoted() {
    let executor = create_executor();
    assert_eq!(exec(&executor, ".s", r#"{"s":"hi"}"#).unwrap(), r#""hi""#);
}

// ============================================================================
// Input context
// ============================================================================

#[test]
fn exec_without_input_sees_null() {
    let executor = create_executor();
    assert_eq!(call(&executor, "exec", vec![query(".")]).unwrap(), "null");
}

#[test]
fn structured_input_is_used_directly() {
    let executor = create_executor();
    let input = value_input(serde_json::json!({"items": [1, 2, 3]}));
    assert_eq!(
        call(&executor, "exec", vec![query(".items | length"), input]).unwrap(),
        "3"
    );
}

#[test]
fn null_input_sees_null() {
    let executor = create_executor();
    assert_eq!(
        call(&executor, "exec", vec![query("."), DynamicValue::null()]).unwrap(),
        "null"
    );
}

#[test]
fn non_object_json_input_is_accepted() {
    let executor = create_executor();
    assert_eq!(exec(&executor, "length", "[1,2]").unwrap(), "2");
    assert_eq!(exec(&executor, ". + 1", "3").unwrap(), "4");
}

#[test]
fn invalid_json_input_is_function_error() {
    let executor = create_executor();
    let err = exec(&executor, ".", "{").unwrap_err();
    assert_eq!(err.function_argument, Some(1));
}

#[test]
fn non_string_query_is_function_error() {
    let executor = create_executor();
    let err = call(&executor, "exec", vec![value_input(serde_json::json!(1))]).unwrap_err();
    assert_eq!(err.function_argument, Some(0));
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn parse_error_is_function_error() {
    let executor = create_executor();
    let err = exec(&executor, ".[", "{}").unwrap_err();
    assert!(err.text.contains("cannot parse query"), "{}", err.text);
}

#[test]
fn undefined_filter_is_function_error() {
    let executor = create_executor();
    let err = exec(&executor, "not_a_filter", "{}").unwrap_err();
    assert!(err.text.contains("cannot compile query"), "{}", err.text);
}

#[test]
fn runtime_error_is_function_error() {
    let executor = create_executor();
    assert!(exec(&executor, ".a", "[1,2]").is_err());
}

#[test]
fn raised_error_text_is_the_message() {
    let executor = create_executor();
    let err = exec(&executor, r#"error("boom")"#, "{}").unwrap_err();
    assert_eq!(err.text, "boom");
    assert_eq!(err.function_argument, None);
}

#[test]
fn undefined_filter_error_names_the_filter() {
    let executor = create_executor();
    let err = exec(&executor, "1, frobnicate", "{}").unwrap_err();
    assert!(err.text.contains("frobnicate"), "{}", err.text);
}

// ============================================================================
// Numbers
// ============================================================================

#[test]
fn integral_division_renders_as_integer() {
    let executor = create_executor();
    assert_eq!(exec(&executor, "4 / 2", "{}").unwrap(), "2");
    assert_eq!(exec(&executor, ".a / 1", r#"{"a":1}"#).unwrap(), "1");
}

#[test]
fn fractional_result_keeps_fraction() {
    let executor = create_executor();
    assert_eq!(exec(&executor, ".a / 2", r#"{"a":3}"#).unwrap(), "1.5");
}

// ============================================================================
// Halt semantics (jq)
// ============================================================================

#[test]
fn halt_keeps_values_emitted_before_it() {
    let executor = create_executor();
    assert_eq!(exec(&executor, "1, 2, halt", "{}").unwrap(), "[1,2]");
    assert_eq!(exec(&executor, "1, halt, 3", "{}").unwrap(), "1");
}

#[test]
fn halt_first_yields_empty_array() {
    let executor = create_executor();
    assert_eq!(exec(&executor, "halt", "{}").unwrap(), "[]");
}

#[test]
fn halt_error_string_is_error_text() {
    let executor = create_executor();
    let err = exec(&executor, r#""x" | halt_error"#, "{}").unwrap_err();
    assert_eq!(err.text, "x");
}

#[test]
fn halt_error_object_renders_as_json() {
    let executor = create_executor();
    let err = exec(&executor, "1, halt_error(1)", r#"{"why":"no"}"#).unwrap_err();
    assert_eq!(err.text, r#"{"why":"no"}"#);
}

#[test]
fn unknown_function_is_method_error() {
    let executor = create_executor();
    let err = executor
        .execute(Request::CallFunction {
            name: "nope".into(),
            arguments: vec![],
        })
        .unwrap_err();
    assert!(matches!(err, Error::UnknownFunction { .. }));
    assert!(err.to_string().contains("unknown function nope"));
}

// ============================================================================
// Halt semantics (replayed sequences)
// ============================================================================

/// Ignores the query text and replays a fixed sequence.
struct Replay(Vec<Emitted>);

impl Program for Replay {
    fn run<'a>(&'a self, _input: Value) -> Box<dyn Iterator<Item = Emitted> + 'a> {
        Box::new(self.0.iter().cloned())
    }
}

struct ReplayEngine(Vec<Emitted>);

impl QueryEngine for ReplayEngine {
    fn parse(&self, _code: &str) -> Result<Box<dyn Program>, EngineError> {
        Ok(Box::new(Replay(self.0.clone())))
    }
}

fn replaying(seq: Vec<Emitted>) -> Executor {
    let provider = FunctionProvider::with_parts(
        Arc::new(ReplayEngine(seq)),
        Box::new(NoDynamicFunctions),
    );
    executor_for(Arc::new(provider))
}

#[test]
fn bare_halt_keeps_prior_values() {
    let executor = replaying(vec![
        Ok(Value::Int(1)),
        Ok(Value::Int(2)),
        Err(Signal::Halt(None)),
        Ok(Value::Int(3)),
    ]);
    assert_eq!(exec(&executor, "", "null").unwrap(), "[1,2]");
}

#[test]
fn bare_halt_after_one_value_unwraps() {
    let executor = replaying(vec![Ok(Value::Int(7)), Err(Signal::Halt(None))]);
    assert_eq!(exec(&executor, "", "null").unwrap(), "7");
}

#[test]
fn halt_with_payload_is_error() {
    let executor = replaying(vec![
        Ok(Value::Int(1)),
        Err(Signal::Halt(Some(Value::from("bad input")))),
    ]);
    let err = exec(&executor, "", "null").unwrap_err();
    assert_eq!(err.text, "bad input");
}

#[test]
fn runtime_signal_discards_values() {
    let executor = replaying(vec![Ok(Value::Int(1)), Err(Signal::Error("boom".into()))]);
    let err = exec(&executor, "", "null").unwrap_err();
    assert_eq!(err.text, "boom");
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_identity_preserves_integer_arrays(xs in prop::collection::vec(-1000i64..1000, 0..8)) {
        let executor = create_executor();
        let text = serde_json::to_string(&xs).unwrap();
        prop_assert_eq!(exec(&executor, ".", &text).unwrap(), text);
    }

    #[test]
    fn prop_iterating_many_values_yields_same_array(xs in prop::collection::vec(-1000i64..1000, 2..8)) {
        let executor = create_executor();
        let text = serde_json::to_string(&xs).unwrap();
        prop_assert_eq!(exec(&executor, ".[]", &text).unwrap(), text);
    }
}
