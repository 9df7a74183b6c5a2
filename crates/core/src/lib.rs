//! Core types for tfjq
//!
//! This crate defines the foundational types used throughout the provider:
//! - Value: native structured value (null/bool/number/string/array/object)
//! - ValueType: host type constraints and dynamic type tags
//! - DynamicValue + codec: MessagePack wire encoding to and from Value
//! - Error: codec error type

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod codec;
pub mod error;
pub mod types;
pub mod value;

pub use codec::{
    decode, decode_as, decode_dynamic, encode, encode_dynamic, encode_string, DynamicValue,
};
pub use error::{Error, Result};
pub use types::ValueType;
pub use value::Value;
