//! `exec(code, args...)`: run a jq query and return its result as JSON text.
//!
//! Argument 0 is the query text. The first variadic argument, when present,
//! is the input the query runs against; a string is parsed as JSON text and
//! any other value is used as-is. With no variadic argument the input is
//! null. The result is always a string holding JSON.
//!
//! The input is not restricted to objects: a string holding `[1,2]` or `3`
//! runs the query against that array or number. Text that is not valid JSON
//! fails the call with an error on argument 1 rather than falling back to an
//! empty object.

use std::sync::Arc;

use tfjq_core::{decode_as, decode_dynamic, encode_string, DynamicValue, Value, ValueType};
use tfjq_engine::{evaluate, QueryEngine};

use crate::registry::FunctionImpl;
use crate::types::{Function, FunctionError, FunctionParameter, FunctionReturn};

/// Registered name of the function.
pub const EXEC: &str = "exec";

/// The `exec` function.
pub struct ExecFunction {
    engine: Arc<dyn QueryEngine>,
}

impl ExecFunction {
    /// Bind the function to a query engine.
    pub fn new(engine: Arc<dyn QueryEngine>) -> Self {
        ExecFunction { engine }
    }

    /// Declared signature.
    pub fn definition() -> Function {
        Function {
            parameters: vec![FunctionParameter::new("code", ValueType::String)
                .describe("jq query to run")],
            variadic_parameter: Some(
                FunctionParameter::new("args", ValueType::Dynamic)
                    .nullable()
                    .describe("input the query runs against; strings are parsed as JSON"),
            ),
            return_: FunctionReturn {
                ty: ValueType::Dynamic,
            },
            summary: "Run a jq query".to_string(),
            description: "Runs the query against the input and returns the result as JSON \
                          text. A single result is returned as-is; zero or several results \
                          are returned as an array."
                .to_string(),
            deprecation_message: None,
        }
    }
}

/// Turn the variadic tail into the query's input value.
fn input_context(args: &[DynamicValue]) -> std::result::Result<Value, FunctionError> {
    let Some(first) = args.first() else {
        return Ok(Value::Null);
    };
    if args.len() > 1 {
        tracing::debug!(target: "tfjq::exec", ignored = args.len() - 1, "extra input arguments ignored");
    }
    match decode_dynamic(first).map_err(|e| FunctionError::argument(1, e))? {
        Value::String(text) => serde_json::from_str::<serde_json::Value>(&text)
            .map(Value::from)
            .map_err(|e| FunctionError::argument(1, tfjq_core::Error::from(e))),
        other => Ok(other),
    }
}

impl FunctionImpl for ExecFunction {
    fn call(&self, args: &[DynamicValue]) -> std::result::Result<DynamicValue, FunctionError> {
        let (code_arg, rest) = args
            .split_first()
            .ok_or_else(|| FunctionError::new("exec requires a query argument"))?;
        let code: String =
            decode_as(code_arg, &ValueType::String).map_err(|e| FunctionError::argument(0, e))?;
        let input = input_context(rest)?;

        tracing::debug!(target: "tfjq::exec", query = %code, "evaluating");
        let text = evaluate(self.engine.as_ref(), &code, input).map_err(|e| {
            tracing::debug!(target: "tfjq::exec", error = %e, "query failed");
            FunctionError::from(e)
        })?;
        Ok(encode_string(&text)?)
    }
}
