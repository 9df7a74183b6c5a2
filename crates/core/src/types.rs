//! Type constraints for wire values
//!
//! [`ValueType`] mirrors the host's type system. It is used in two places:
//! function signatures (parameter and return types) and the type tag that
//! dynamic wire values carry in front of their payload. Both use the same
//! JSON form, e.g. `"string"` or `["list","number"]`.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::value::Value;

/// A host type constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "serde_json::Value", into = "serde_json::Value")]
pub enum ValueType {
    /// `bool`
    Bool,
    /// `number` (arbitrary precision on the host side)
    Number,
    /// `string`
    String,
    /// `dynamic`: the concrete type travels with the value
    Dynamic,
    /// `list(T)`
    List(Box<ValueType>),
    /// `set(T)`
    Set(Box<ValueType>),
    /// `map(T)`
    Map(Box<ValueType>),
    /// `tuple([T, ...])`
    Tuple(Vec<ValueType>),
    /// `object({name = T, ...})`
    Object(BTreeMap<String, ValueType>),
}

impl ValueType {
    /// Infer the most specific type for a native value.
    ///
    /// Arrays become tuples and mappings become objects, so element types
    /// never need to be unified. Null carries no type information and
    /// infers as `dynamic`.
    pub fn infer(value: &Value) -> ValueType {
        match value {
            Value::Null => ValueType::Dynamic,
            Value::Bool(_) => ValueType::Bool,
            Value::Int(_) | Value::Float(_) => ValueType::Number,
            Value::String(_) => ValueType::String,
            Value::Array(items) => ValueType::Tuple(items.iter().map(ValueType::infer).collect()),
            Value::Object(attrs) => ValueType::Object(
                attrs
                    .iter()
                    .map(|(k, v)| (k.clone(), ValueType::infer(v)))
                    .collect(),
            ),
        }
    }

    /// JSON form of this type, as carried in dynamic wire values.
    pub fn to_json(&self) -> serde_json::Value {
        use serde_json::{json, Value as Json};
        match self {
            ValueType::Bool => json!("bool"),
            ValueType::Number => json!("number"),
            ValueType::String => json!("string"),
            ValueType::Dynamic => json!("dynamic"),
            ValueType::List(t) => json!(["list", t.to_json()]),
            ValueType::Set(t) => json!(["set", t.to_json()]),
            ValueType::Map(t) => json!(["map", t.to_json()]),
            ValueType::Tuple(ts) => {
                json!(["tuple", Json::Array(ts.iter().map(ValueType::to_json).collect())])
            }
            ValueType::Object(attrs) => json!([
                "object",
                Json::Object(attrs.iter().map(|(k, t)| (k.clone(), t.to_json())).collect())
            ]),
        }
    }

    /// Parse the JSON form of a type.
    pub fn from_json(json: &serde_json::Value) -> Result<ValueType> {
        use serde_json::Value as Json;
        match json {
            Json::String(s) => match s.as_str() {
                "bool" => Ok(ValueType::Bool),
                "number" => Ok(ValueType::Number),
                "string" => Ok(ValueType::String),
                "dynamic" => Ok(ValueType::Dynamic),
                other => Err(Error::InvalidType(format!("unknown primitive type {:?}", other))),
            },
            Json::Array(parts) if parts.len() == 2 => {
                let kind = parts[0]
                    .as_str()
                    .ok_or_else(|| Error::InvalidType("type kind must be a string".into()))?;
                let arg = &parts[1];
                match kind {
                    "list" => Ok(ValueType::List(Box::new(ValueType::from_json(arg)?))),
                    "set" => Ok(ValueType::Set(Box::new(ValueType::from_json(arg)?))),
                    "map" => Ok(ValueType::Map(Box::new(ValueType::from_json(arg)?))),
                    "tuple" => {
                        let elems = arg.as_array().ok_or_else(|| {
                            Error::InvalidType("tuple element types must be an array".into())
                        })?;
                        Ok(ValueType::Tuple(
                            elems.iter().map(ValueType::from_json).collect::<Result<_>>()?,
                        ))
                    }
                    "object" => {
                        let attrs = arg.as_object().ok_or_else(|| {
                            Error::InvalidType("object attribute types must be an object".into())
                        })?;
                        Ok(ValueType::Object(
                            attrs
                                .iter()
                                .map(|(k, t)| -> Result<(String, ValueType)> {
                                    Ok((k.clone(), ValueType::from_json(t)?))
                                })
                                .collect::<Result<_>>()?,
                        ))
                    }
                    other => Err(Error::InvalidType(format!("unknown type kind {:?}", other))),
                }
            }
            // Object types with optional attributes carry a third element
            Json::Array(parts) if parts.len() == 3 && parts[0] == "object" => {
                ValueType::from_json(&Json::Array(parts[..2].to_vec()))
            }
            other => Err(Error::InvalidType(format!("malformed type {}", other))),
        }
    }
}

impl TryFrom<serde_json::Value> for ValueType {
    type Error = Error;

    fn try_from(json: serde_json::Value) -> Result<Self> {
        ValueType::from_json(&json)
    }
}

impl From<ValueType> for serde_json::Value {
    fn from(t: ValueType) -> Self {
        t.to_json()
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueType::Bool => write!(f, "bool"),
            ValueType::Number => write!(f, "number"),
            ValueType::String => write!(f, "string"),
            ValueType::Dynamic => write!(f, "dynamic"),
            ValueType::List(t) => write!(f, "list({})", t),
            ValueType::Set(t) => write!(f, "set({})", t),
            ValueType::Map(t) => write!(f, "map({})", t),
            ValueType::Tuple(ts) => {
                write!(f, "tuple([")?;
                for (i, t) in ts.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", t)?;
                }
                write!(f, "])")
            }
            ValueType::Object(attrs) => {
                write!(f, "object({{")?;
                for (i, (k, t)) in attrs.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}={}", k, t)?;
                }
                write!(f, "}})")
            }
        }
    }
}
