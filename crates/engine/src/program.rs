//! Query engine abstraction
//!
//! The provider never looks inside a query. It hands the text to a
//! [`QueryEngine`], receives a [`Program`], and pulls emitted items from the
//! program one at a time. Swapping the jq implementation means implementing
//! these two traits.

use std::fmt;

use tfjq_core::Value;

use crate::error::Result;

/// Non-value item in a program's output sequence.
#[derive(Debug, Clone, PartialEq)]
pub enum Signal {
    /// Stop emitting. Without a payload this ends the run successfully;
    /// with one it ends the run with the payload as the error.
    Halt(Option<Value>),
    /// Runtime error raised by the program
    Error(String),
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Signal::Halt(None) => write!(f, "halt"),
            Signal::Halt(Some(Value::String(s))) => write!(f, "{}", s),
            Signal::Halt(Some(payload)) => write!(f, "{}", payload.to_json_text()),
            Signal::Error(msg) => write!(f, "{}", msg),
        }
    }
}

/// One item of a program's output sequence.
pub type Emitted = std::result::Result<Value, Signal>;

/// A compiled query.
///
/// `run` is lazy: items are produced as the caller pulls them, and the
/// sequence may never end if the query does not terminate.
pub trait Program {
    /// Run the program against one input value.
    fn run<'a>(&'a self, input: Value) -> Box<dyn Iterator<Item = Emitted> + 'a>;
}

/// Parses query text into runnable programs.
///
/// Implementations hold no per-query state and are shared across
/// concurrent calls.
pub trait QueryEngine: Send + Sync {
    /// Parse and compile `code`.
    fn parse(&self, code: &str) -> Result<Box<dyn Program>>;
}
