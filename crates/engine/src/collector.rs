//! Result collection and arity normalization.
//!
//! | Values produced | Result |
//! |-----------------|--------|
//! | 0 | `[]` |
//! | 1 | the value itself, unwrapped |
//! | N > 1 | array of the N values in emission order |
//!
//! A query producing exactly one value and a query producing a one-element
//! array are indistinguishable after normalization.

use tfjq_core::Value;

use crate::error::{EngineError, Result};
use crate::program::{Emitted, QueryEngine, Signal};

/// Drain a program's output sequence.
///
/// A payload-less halt stops collection and keeps what was emitted before
/// it. Any other signal fails the whole run and discards the values.
pub fn collect<I>(seq: I) -> Result<Vec<Value>>
where
    I: IntoIterator<Item = Emitted>,
{
    let mut store = Vec::new();
    for item in seq {
        match item {
            Ok(v) => store.push(v),
            Err(Signal::Halt(None)) => break,
            Err(signal) => return Err(EngineError::Runtime(signal.to_string())),
        }
    }
    Ok(store)
}

/// Collapse collected values into the single value callers receive.
pub fn normalize(mut values: Vec<Value>) -> Value {
    if values.len() == 1 {
        values.remove(0)
    } else {
        Value::Array(values)
    }
}

/// Parse, run, collect and normalize in one step; returns the JSON text of
/// the result.
pub fn evaluate(engine: &dyn QueryEngine, code: &str, input: Value) -> Result<String> {
    let program = engine.parse(code)?;
    let values = collect(program.run(input))?;
    tracing::debug!(target: "tfjq::engine", emitted = values.len(), "query finished");
    Ok(normalize(values).to_json_text())
}
