//! jq backend built on the `jaq` crates.
//!
//! `halt` and `halt_error` are provided here as natives. They raise an error
//! value carrying a reserved key, which `JaqProgram` turns back into a
//! [`Signal::Halt`] instead of a runtime error.

use jaq_interpret::results::box_once;
use jaq_interpret::{Ctx, Error as JaqError, Filter, FilterT, Native, ParseCtx, RcIter, Val};
use tfjq_core::Value;

use crate::error::{EngineError, Result};
use crate::program::{Emitted, Program, QueryEngine, Signal};

/// Query engine that compiles jq with the jaq core natives and standard
/// library definitions.
#[derive(Debug, Clone, Copy, Default)]
pub struct JaqEngine;

impl JaqEngine {
    /// Create the engine.
    pub fn new() -> Self {
        JaqEngine
    }
}

impl QueryEngine for JaqEngine {
    fn parse(&self, code: &str) -> Result<Box<dyn Program>> {
        let (main, errs) = jaq_parse::parse(code, jaq_parse::main());
        if let Some(first) = errs.first() {
            return Err(EngineError::Parse(format!("cannot parse query: {}", first)));
        }
        let main = main.ok_or_else(|| EngineError::Parse("cannot parse query".into()))?;

        let mut defs = ParseCtx::new(Vec::new());
        defs.insert_natives(jaq_core::core());
        defs.insert_natives(halt_natives());
        defs.insert_defs(jaq_std::std());
        let filter = defs.compile(main);
        if !defs.errs.is_empty() {
            let undefined: Vec<String> = defs
                .errs
                .iter()
                .map(|(err, span)| format!("{} {}", err, code.get(span.clone()).unwrap_or("?")))
                .collect();
            return Err(EngineError::Compile(format!(
                "cannot compile query: {}",
                undefined.join(", ")
            )));
        }

        Ok(Box::new(JaqProgram {
            filter,
            inputs: RcIter::new(core::iter::empty()),
        }))
    }
}

const HALT_KEY: &str = "\u{0}tfjq:halt";

fn halt_value(payload: Option<Val>) -> Val {
    let payload = payload.map_or(serde_json::Value::Null, |v| {
        serde_json::json!([serde_json::Value::from(v)])
    });
    let mut marker = serde_json::Map::new();
    marker.insert(HALT_KEY.to_string(), payload);
    Val::from(serde_json::Value::Object(marker))
}

/// `halt`, `halt_error` and `halt_error(code)`.
///
/// The exit code argument of `halt_error/1` has no meaning here and is
/// never evaluated.
fn halt_natives() -> Vec<(String, usize, Native)> {
    vec![
        (
            "halt".to_string(),
            0,
            Native::new(|_, _| box_once(Err(JaqError::Val(halt_value(None))))),
        ),
        (
            "halt_error".to_string(),
            0,
            Native::new(|_, cv| box_once(Err(JaqError::Val(halt_value(Some(cv.1)))))),
        ),
        (
            "halt_error".to_string(),
            1,
            Native::new(|_, cv| box_once(Err(JaqError::Val(halt_value(Some(cv.1)))))),
        ),
    ]
}

/// Map a jaq error to a signal, recognising halts raised by [`halt_natives`].
fn signal(err: JaqError) -> Signal {
    if let JaqError::Val(Val::Obj(obj)) = &err {
        if let (1, Some((key, payload))) = (obj.len(), obj.iter().next()) {
            if key.as_str() == HALT_KEY {
                return match serde_json::Value::from(payload.clone()) {
                    serde_json::Value::Array(mut wrapped) if wrapped.len() == 1 => {
                        Signal::Halt(Some(Value::from(wrapped.remove(0))))
                    }
                    _ => Signal::Halt(None),
                };
            }
        }
    }
    Signal::Error(err.to_string())
}

struct JaqProgram {
    filter: Filter,
    // `input`/`inputs` inside a query see an empty stream
    inputs: RcIter<core::iter::Empty<std::result::Result<Val, String>>>,
}

impl Program for JaqProgram {
    fn run<'a>(&'a self, input: Value) -> Box<dyn Iterator<Item = Emitted> + 'a> {
        let input = Val::from(serde_json::Value::from(input));
        let out = self.filter.run((Ctx::new([], &self.inputs), input));
        Box::new(out.map(|item| match item {
            Ok(v) => Ok(Value::from(serde_json::Value::from(v))),
            Err(e) => Err(signal(e)),
        }))
    }
}
