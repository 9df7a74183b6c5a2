//! Wire encoding for tfjq
//!
//! Carries provider [`Request`](tfjq_executor::Request)s and
//! [`Response`](tfjq_executor::Response)s over a byte stream as one JSON
//! object per line:
//!
//! - Request: `{id, method, params}`
//! - Success response: `{id, ok: true, method, result}`
//! - Error response: `{id, ok: false, error: {code, message, details}}`
//!
//! MessagePack payloads travel base64-encoded in `msgpack` fields.

#![warn(missing_docs)]

pub mod json;

pub use json::{
    decode_request, decode_response, encode_request, encode_response, handle_line, ApiError,
    DecodeError, RequestEnvelope, ResponseEnvelope,
};
