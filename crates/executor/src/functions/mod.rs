//! Built-in functions
//!
//! The static function set: fixed when the provider is constructed and
//! served for the life of the process.

mod exec;

use std::sync::Arc;

use tfjq_engine::QueryEngine;

use crate::registry::{FunctionRegistry, RegisteredFunction};

pub use exec::{ExecFunction, EXEC};

/// Build the static function set around `engine`.
pub fn static_functions(engine: Arc<dyn QueryEngine>) -> FunctionRegistry {
    let exec = ExecFunction::new(engine);
    std::iter::once(RegisteredFunction {
        name: EXEC.to_string(),
        definition: ExecFunction::definition(),
        implementation: Arc::new(exec),
    })
    .collect()
}
