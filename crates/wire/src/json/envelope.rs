//! Request/Response envelope encoding for the tfjq wire protocol
//!
//! Defines the wire format for provider requests and responses:
//! - Request: `{id, method, params}`
//! - Success response: `{id, ok: true, method, result}`
//! - Error response: `{id, ok: false, error: {code, message, details}}`
//!
//! `params` may be omitted for methods that take none.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as Json};
use tfjq_executor::{Error, Executor, Request, Response};

use super::error::DecodeError;

/// Wire protocol request
#[derive(Debug, Clone, PartialEq)]
pub struct RequestEnvelope {
    /// Request ID (echoed in response)
    pub id: String,
    /// Decoded method call
    pub request: Request,
}

/// Wire protocol response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    /// Request ID (from request)
    pub id: String,
    /// Success or failure
    pub ok: bool,
    /// Method that produced `result` (if ok=true)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    /// Result (if ok=true)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Json>,
    /// Error (if ok=false)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiError>,
}

/// API error structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code (e.g., "UnknownFunction", "NotSupported")
    pub code: String,
    /// Human-readable message
    pub message: String,
    /// The structured error
    #[serde(default)]
    pub details: Option<Json>,
}

impl From<&Error> for ApiError {
    fn from(e: &Error) -> Self {
        ApiError {
            code: e.code().to_string(),
            message: e.to_string(),
            details: serde_json::to_value(e).ok(),
        }
    }
}

impl ResponseEnvelope {
    /// Create a success response
    pub fn success(id: &str, response: &Response) -> Self {
        // Response serializes as {"method": ..., "result": ...}
        let (method, result) = match serde_json::to_value(response) {
            Ok(Json::Object(mut tagged)) => (
                tagged.remove("method").and_then(|m| m.as_str().map(str::to_string)),
                tagged.remove("result"),
            ),
            Ok(_) | Err(_) => {
                return Self::error(
                    id,
                    &Error::Internal {
                        reason: "response did not serialize as an object".into(),
                    },
                )
            }
        };
        ResponseEnvelope {
            id: id.to_string(),
            ok: true,
            method,
            result,
            error: None,
        }
    }

    /// Create an error response
    pub fn error(id: &str, error: &Error) -> Self {
        ResponseEnvelope {
            id: id.to_string(),
            ok: false,
            method: None,
            result: None,
            error: Some(ApiError::from(error)),
        }
    }

    /// Create a response from a method outcome
    pub fn from_result(id: &str, outcome: &tfjq_executor::Result<Response>) -> Self {
        match outcome {
            Ok(response) => Self::success(id, response),
            Err(e) => Self::error(id, e),
        }
    }

    /// Create the response to an undecodable line
    pub fn invalid(error: &DecodeError) -> Self {
        Self::error(
            error.id(),
            &Error::InvalidRequest {
                reason: error.to_string(),
            },
        )
    }

    /// Typed view of a success response.
    ///
    /// Returns `None` for error responses.
    pub fn response(&self) -> Option<Result<Response, DecodeError>> {
        if !self.ok {
            return None;
        }
        let mut tagged = Map::new();
        tagged.insert(
            "method".to_string(),
            Json::String(self.method.clone().unwrap_or_default()),
        );
        tagged.insert(
            "result".to_string(),
            self.result.clone().unwrap_or(Json::Null),
        );
        Some(
            serde_json::from_value(Json::Object(tagged)).map_err(|e| {
                DecodeError::InvalidRequest {
                    id: self.id.clone(),
                    reason: e.to_string(),
                }
            }),
        )
    }
}

#[derive(Deserialize)]
struct RawRequest {
    id: String,
    method: String,
    #[serde(default)]
    params: Json,
}

/// Encode a request to JSON
pub fn encode_request(id: &str, request: &Request) -> String {
    let mut obj = Map::new();
    obj.insert("id".to_string(), Json::String(id.to_string()));
    if let Ok(Json::Object(tagged)) = serde_json::to_value(request) {
        obj.extend(tagged);
    }
    Json::Object(obj).to_string()
}

/// Decode a request from JSON
pub fn decode_request(line: &str) -> Result<RequestEnvelope, DecodeError> {
    let raw: RawRequest = serde_json::from_str(line)?;

    let mut tagged = Map::new();
    tagged.insert("method".to_string(), Json::String(raw.method));

    // Methods without parameters accept a missing, null or empty `params`
    let empty = match &raw.params {
        Json::Null => true,
        Json::Object(m) => m.is_empty(),
        _ => false,
    };
    if empty {
        if let Ok(request) = serde_json::from_value(Json::Object(tagged.clone())) {
            return Ok(RequestEnvelope {
                id: raw.id,
                request,
            });
        }
    }
    if !raw.params.is_null() {
        tagged.insert("params".to_string(), raw.params);
    }

    match serde_json::from_value(Json::Object(tagged)) {
        Ok(request) => Ok(RequestEnvelope {
            id: raw.id,
            request,
        }),
        Err(e) => Err(DecodeError::InvalidRequest {
            id: raw.id,
            reason: e.to_string(),
        }),
    }
}

/// Encode a response to JSON
pub fn encode_response(response: &ResponseEnvelope) -> String {
    match serde_json::to_string(response) {
        Ok(line) => line,
        Err(e) => {
            tracing::warn!(target: "tfjq::serve", error = %e, "response failed to serialize");
            let fallback = ResponseEnvelope::error(
                &response.id,
                &Error::Internal {
                    reason: e.to_string(),
                },
            );
            serde_json::to_string(&fallback).unwrap_or_default()
        }
    }
}

/// Decode a response from JSON
pub fn decode_response(line: &str) -> Result<ResponseEnvelope, DecodeError> {
    Ok(serde_json::from_str(line)?)
}

/// Decode one request line, execute it and encode the response line.
pub fn handle_line(executor: &Executor, line: &str) -> String {
    let response = match decode_request(line) {
        Ok(envelope) => {
            tracing::debug!(
                target: "tfjq::serve",
                id = %envelope.id,
                method = envelope.request.method(),
                "request"
            );
            let outcome = executor.execute(envelope.request);
            ResponseEnvelope::from_result(&envelope.id, &outcome)
        }
        Err(e) => {
            tracing::warn!(target: "tfjq::serve", error = %e, "undecodable request");
            ResponseEnvelope::invalid(&e)
        }
    };
    encode_response(&response)
}
