//! JSON-lines envelope

mod envelope;
mod error;

pub use envelope::{
    decode_request, decode_response, encode_request, encode_response, handle_line, ApiError,
    RequestEnvelope, ResponseEnvelope,
};
pub use error::DecodeError;
