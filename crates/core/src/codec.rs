//! Dynamic value codec
//!
//! Converts between the host's MessagePack wire encoding and [`Value`].
//!
//! Wire layout:
//!
//! | Type | Encoding |
//! |------|----------|
//! | any null | `nil` |
//! | `bool` | boolean |
//! | `number` | int, float, or decimal string |
//! | `string` | str |
//! | `list`/`set`/`tuple` | array |
//! | `map`/`object` | map with str keys |
//! | `dynamic` | 2-array `[bin(type JSON), payload]` |
//! | unknown | ext type 0 (rejected) |
//!
//! Fixed shapes known at compile time (the query string, the provider
//! configuration map) are decoded with `rmp-serde` straight into Rust types;
//! everything else goes through the self-describing `rmpv` tree.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::ValueType;
use crate::value::Value;

/// MessagePack encoding of nil
const MSGPACK_NIL: u8 = 0xc0;

/// A wire value as received from or sent to the host.
///
/// The bytes are opaque until decoded against a type. A value lives for
/// exactly one request or response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DynamicValue {
    /// MessagePack bytes
    #[serde(default, with = "base64_bytes", skip_serializing_if = "Vec::is_empty")]
    pub msgpack: Vec<u8>,
    /// JSON form; the host only uses it for resource state, never for
    /// function arguments
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub json: Option<String>,
}

impl DynamicValue {
    /// Wrap raw MessagePack bytes.
    pub fn from_msgpack(bytes: Vec<u8>) -> Self {
        DynamicValue {
            msgpack: bytes,
            json: None,
        }
    }

    /// The null value of any type.
    pub fn null() -> Self {
        DynamicValue::from_msgpack(vec![MSGPACK_NIL])
    }

    fn bytes(&self, expected: &ValueType) -> Result<&[u8]> {
        if !self.msgpack.is_empty() {
            return Ok(&self.msgpack);
        }
        if self.json.is_some() {
            return Err(Error::decode(expected, "JSON-encoded values are not supported"));
        }
        Err(Error::decode(expected, "value is empty"))
    }
}

// =============================================================================
// Decoding
// =============================================================================

/// Decode a fixed-shape value directly into a Rust type.
///
/// `expected` is only used to word the error.
pub fn decode_as<T: DeserializeOwned>(value: &DynamicValue, expected: &ValueType) -> Result<T> {
    let bytes = value.bytes(expected)?;
    rmp_serde::from_slice(bytes).map_err(|e| Error::decode(expected, e.to_string()))
}

/// Decode a wire value that must conform to `expected`.
pub fn decode(value: &DynamicValue, expected: &ValueType) -> Result<Value> {
    let mut rd = value.bytes(expected)?;
    let tree = rmpv::decode::read_value(&mut rd)
        .map_err(|e| Error::decode(expected, e.to_string()))?;
    if !rd.is_empty() {
        return Err(Error::decode(
            expected,
            format!("{} trailing bytes after value", rd.len()),
        ));
    }
    decode_typed(tree, expected)
}

/// Decode a wire value whose type travels with it.
pub fn decode_dynamic(value: &DynamicValue) -> Result<Value> {
    decode(value, &ValueType::Dynamic)
}

fn decode_typed(v: rmpv::Value, ty: &ValueType) -> Result<Value> {
    use rmpv::Value as Mp;

    match (ty, v) {
        (_, Mp::Nil) => Ok(Value::Null),
        (_, Mp::Ext(..)) => Err(Error::decode(ty, "unknown values are not supported")),

        (ValueType::Dynamic, Mp::Array(mut parts)) if parts.len() == 2 => {
            let payload = parts.pop().unwrap_or(Mp::Nil);
            let tag = match parts.pop() {
                Some(Mp::Binary(b)) => b,
                Some(Mp::String(s)) => s.into_bytes(),
                _ => return Err(Error::decode(ty, "type tag must be bytes")),
            };
            let json: serde_json::Value = serde_json::from_slice(&tag)
                .map_err(|e| Error::decode(ty, format!("malformed type tag: {}", e)))?;
            let inner = ValueType::from_json(&json)?;
            if inner == ValueType::Dynamic {
                return Err(Error::decode(ty, "type tag cannot itself be dynamic"));
            }
            decode_typed(payload, &inner)
        }

        (ValueType::Bool, Mp::Boolean(b)) => Ok(Value::Bool(b)),

        (ValueType::Number, Mp::Integer(i)) => {
            if let Some(n) = i.as_i64() {
                Ok(Value::Int(n))
            } else if let Some(n) = i.as_u64() {
                Ok(Value::Float(n as f64))
            } else {
                Err(Error::decode(ty, "integer out of range"))
            }
        }
        (ValueType::Number, Mp::F32(f)) => Ok(Value::Float(f as f64)),
        (ValueType::Number, Mp::F64(f)) => Ok(Value::Float(f)),
        (ValueType::Number, Mp::String(s)) => match s.as_str() {
            Some(text) => parse_number(text).ok_or_else(|| {
                Error::decode(ty, format!("{:?} is not a decimal number", text))
            }),
            None => Err(Error::decode(ty, "number text is not UTF-8")),
        },

        (ValueType::String, Mp::String(s)) => s
            .into_str()
            .map(Value::String)
            .ok_or_else(|| Error::decode(ty, "string is not UTF-8")),

        (ValueType::List(elem) | ValueType::Set(elem), Mp::Array(items)) => items
            .into_iter()
            .map(|item| decode_typed(item, elem))
            .collect::<Result<Vec<_>>>()
            .map(Value::Array),

        (ValueType::Tuple(elems), Mp::Array(items)) => {
            if elems.len() != items.len() {
                return Err(Error::decode(
                    ty,
                    format!("expected {} elements, found {}", elems.len(), items.len()),
                ));
            }
            items
                .into_iter()
                .zip(elems)
                .map(|(item, elem)| decode_typed(item, elem))
                .collect::<Result<Vec<_>>>()
                .map(Value::Array)
        }

        (ValueType::Map(elem), Mp::Map(pairs)) => pairs
            .into_iter()
            .map(|(k, v)| -> Result<(String, Value)> {
                Ok((decode_key(k, ty)?, decode_typed(v, elem)?))
            })
            .collect::<Result<_>>()
            .map(Value::Object),

        (ValueType::Object(attrs), Mp::Map(pairs)) => pairs
            .into_iter()
            .map(|(k, v)| -> Result<(String, Value)> {
                let name = decode_key(k, ty)?;
                let attr_ty = attrs
                    .get(&name)
                    .ok_or_else(|| Error::decode(ty, format!("unexpected attribute {:?}", name)))?;
                Ok((name, decode_typed(v, attr_ty)?))
            })
            .collect::<Result<_>>()
            .map(Value::Object),

        (ty, other) => Err(Error::decode(ty, format!("found {}", describe(&other)))),
    }
}

fn decode_key(k: rmpv::Value, ty: &ValueType) -> Result<String> {
    match k {
        rmpv::Value::String(s) => s
            .into_str()
            .ok_or_else(|| Error::decode(ty, "key is not UTF-8")),
        other => Err(Error::decode(
            ty,
            format!("key must be a string, found {}", describe(&other)),
        )),
    }
}

fn parse_number(text: &str) -> Option<Value> {
    if let Ok(i) = text.parse::<i64>() {
        return Some(Value::Int(i));
    }
    text.parse::<f64>()
        .ok()
        .filter(|f| f.is_finite())
        .map(Value::Float)
}

fn describe(v: &rmpv::Value) -> &'static str {
    match v {
        rmpv::Value::Nil => "nil",
        rmpv::Value::Boolean(_) => "bool",
        rmpv::Value::Integer(_) => "integer",
        rmpv::Value::F32(_) | rmpv::Value::F64(_) => "float",
        rmpv::Value::String(_) => "string",
        rmpv::Value::Binary(_) => "binary",
        rmpv::Value::Array(_) => "array",
        rmpv::Value::Map(_) => "map",
        rmpv::Value::Ext(..) => "extension",
    }
}

// =============================================================================
// Encoding
// =============================================================================

/// Encode a native value against a declared type.
pub fn encode(value: &Value, ty: &ValueType) -> Result<DynamicValue> {
    let tree = encode_typed(value, ty)?;
    let mut buf = Vec::new();
    rmpv::encode::write_value(&mut buf, &tree).map_err(|e| Error::Encode(e.to_string()))?;
    Ok(DynamicValue::from_msgpack(buf))
}

/// Encode a native value tagged with its own runtime type.
pub fn encode_dynamic(value: &Value) -> Result<DynamicValue> {
    encode(value, &ValueType::Dynamic)
}

/// Encode a string as a dynamic value.
pub fn encode_string(s: &str) -> Result<DynamicValue> {
    encode_dynamic(&Value::String(s.to_string()))
}

fn encode_typed(value: &Value, ty: &ValueType) -> Result<rmpv::Value> {
    use rmpv::Value as Mp;

    let mismatch = || {
        Error::Encode(format!(
            "{} value does not conform to {}",
            value.type_name(),
            ty
        ))
    };

    match (ty, value) {
        (_, Value::Null) => Ok(Mp::Nil),

        (ValueType::Dynamic, _) => {
            let concrete = ValueType::infer(value);
            let tag = serde_json::to_vec(&concrete.to_json())?;
            Ok(Mp::Array(vec![Mp::Binary(tag), encode_typed(value, &concrete)?]))
        }

        (ValueType::Bool, Value::Bool(b)) => Ok(Mp::Boolean(*b)),
        (ValueType::Number, Value::Int(i)) => Ok(Mp::from(*i)),
        (ValueType::Number, Value::Float(f)) if f.is_finite() => Ok(Mp::F64(*f)),
        (ValueType::Number, Value::Float(_)) => {
            Err(Error::Encode("non-finite numbers have no wire form".into()))
        }
        (ValueType::String, Value::String(s)) => Ok(Mp::from(s.as_str())),

        (ValueType::List(elem) | ValueType::Set(elem), Value::Array(items)) => items
            .iter()
            .map(|item| encode_typed(item, elem))
            .collect::<Result<Vec<_>>>()
            .map(Mp::Array),

        (ValueType::Tuple(elems), Value::Array(items)) if elems.len() == items.len() => items
            .iter()
            .zip(elems)
            .map(|(item, elem)| encode_typed(item, elem))
            .collect::<Result<Vec<_>>>()
            .map(Mp::Array),

        (ValueType::Map(elem), Value::Object(entries)) => entries
            .iter()
            .map(|(k, v)| -> Result<(Mp, Mp)> {
                Ok((Mp::from(k.as_str()), encode_typed(v, elem)?))
            })
            .collect::<Result<Vec<_>>>()
            .map(Mp::Map),

        (ValueType::Object(attrs), Value::Object(entries)) => {
            if let Some(extra) = entries.keys().find(|k| !attrs.contains_key(*k)) {
                return Err(Error::Encode(format!("unexpected attribute {:?}", extra)));
            }
            attrs
                .iter()
                .map(|(k, attr_ty)| -> Result<(Mp, Mp)> {
                    let v = entries.get(k).unwrap_or(&Value::Null);
                    Ok((Mp::from(k.as_str()), encode_typed(v, attr_ty)?))
                })
                .collect::<Result<Vec<_>>>()
                .map(Mp::Map)
        }

        _ => Err(mismatch()),
    }
}

mod base64_bytes {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<T: AsRef<[u8]>, S: Serializer>(bytes: T, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&STANDARD.encode(bytes.as_ref()))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<u8>, D::Error> {
        let text = String::deserialize(d)?;
        STANDARD.decode(text).map_err(serde::de::Error::custom)
    }
}
