//! Symbolic decode/encode rules between wire values and in-memory values.
//!
//! A [`Codec`] is attached to a field whenever its wire representation differs
//! from its model representation. Renderers turn codecs into source text; the
//! [`Codec::decode`] / [`Codec::encode`] pair evaluates them directly against
//! JSON so the rules can be checked without any target language.

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Wire value standing in for "absent".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Sentinel {
    EmptyString,
    EmptyList,
}

impl Sentinel {
    pub fn wire_value(self) -> Value {
        match self {
            Self::EmptyString => Value::String(String::new()),
            Self::EmptyList => Value::Array(Vec::new()),
        }
    }

    pub fn matches(self, wire: &Value) -> bool {
        match (self, wire) {
            (Self::EmptyString, Value::String(text)) => text.is_empty(),
            (Self::EmptyList, Value::Array(items)) => items.is_empty(),
            _ => false,
        }
    }
}

/// Patch operation on a multi-valued file field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum PatchOp {
    Append,
    Prepend,
    Remove,
}

impl PatchOp {
    pub const ALL: [PatchOp; 3] = [PatchOp::Append, PatchOp::Prepend, PatchOp::Remove];

    /// Key under which the remote store expects this operation.
    pub fn wire_key(self, field: &str) -> String {
        match self {
            Self::Append => format!("{field}+"),
            Self::Prepend => format!("+{field}"),
            Self::Remove => format!("{field}-"),
        }
    }

    /// In-memory name of the companion field.
    pub fn model_name(self, field: &str) -> String {
        match self {
            Self::Append => format!("{field}Append"),
            Self::Prepend => format!("{field}Prepend"),
            Self::Remove => format!("{field}Remove"),
        }
    }
}

/// Decode/encode rule for a single field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "codec", rename_all = "snake_case")]
pub enum Codec {
    /// Timestamp text on the wire, temporal value in memory.
    Temporal,
    /// Like `Temporal`, with the empty string standing in for null.
    NullableTemporal,
    /// Wire sentinel decodes to null and null encodes to the sentinel.
    EmptyAsNull { sentinel: Sentinel },
    /// Value passes through unchanged but is sent under a patch key.
    ArrayPatch { op: PatchOp },
}

impl Codec {
    pub fn name(self) -> &'static str {
        match self {
            Self::Temporal => "temporal",
            Self::NullableTemporal => "nullable_temporal",
            Self::EmptyAsNull { .. } => "empty_as_null",
            Self::ArrayPatch { .. } => "array_patch",
        }
    }

    /// Wire value → model value.
    pub fn decode(self, wire: &Value) -> Result<ModelValue, CodecError> {
        match self {
            Self::Temporal => parse_timestamp(self, wire).map(ModelValue::Temporal),
            Self::NullableTemporal => {
                if Sentinel::EmptyString.matches(wire) {
                    Ok(ModelValue::Null)
                } else {
                    parse_timestamp(self, wire).map(ModelValue::Temporal)
                }
            }
            Self::EmptyAsNull { sentinel } => {
                if sentinel.matches(wire) {
                    Ok(ModelValue::Null)
                } else {
                    Ok(ModelValue::Value(wire.clone()))
                }
            }
            Self::ArrayPatch { .. } => Ok(ModelValue::Value(wire.clone())),
        }
    }

    /// Model value → wire value.
    pub fn encode(self, model: &ModelValue) -> Result<Value, CodecError> {
        match (self, model) {
            (Self::Temporal | Self::NullableTemporal, ModelValue::Temporal(at)) => {
                Ok(Value::String(format_timestamp(at)))
            }
            (Self::NullableTemporal, ModelValue::Null) => Ok(Sentinel::EmptyString.wire_value()),
            (Self::EmptyAsNull { sentinel }, ModelValue::Null) => Ok(sentinel.wire_value()),
            (Self::EmptyAsNull { .. } | Self::ArrayPatch { .. }, ModelValue::Value(value)) => {
                Ok(value.clone())
            }
            (codec, other) => Err(CodecError::UnexpectedModel {
                codec: codec.name(),
                found: other.describe(),
            }),
        }
    }
}

/// Decode through an optional codec; fields without one pass through.
pub fn decode(codec: Option<Codec>, wire: &Value) -> Result<ModelValue, CodecError> {
    match codec {
        Some(codec) => codec.decode(wire),
        None => Ok(ModelValue::from_wire(wire)),
    }
}

/// Encode through an optional codec; fields without one pass through.
pub fn encode(codec: Option<Codec>, model: &ModelValue) -> Result<Value, CodecError> {
    match (codec, model) {
        (Some(codec), _) => codec.encode(model),
        (None, ModelValue::Null) => Ok(Value::Null),
        (None, ModelValue::Value(value)) => Ok(value.clone()),
        (None, ModelValue::Temporal(at)) => Ok(Value::String(format_timestamp(at))),
    }
}

/// In-memory value of a decoded field.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelValue {
    Null,
    Temporal(DateTime<Utc>),
    Value(Value),
}

impl ModelValue {
    pub fn from_wire(wire: &Value) -> Self {
        match wire {
            Value::Null => Self::Null,
            other => Self::Value(other.clone()),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    fn describe(&self) -> String {
        match self {
            Self::Null => "null".to_string(),
            Self::Temporal(at) => format!("temporal {}", format_timestamp(at)),
            Self::Value(value) => format!("json {value}"),
        }
    }
}

/// Errors raised while evaluating a codec.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("{codec}: expected timestamp text, got {found}")]
    ExpectedText { codec: &'static str, found: String },
    #[error("{codec}: \"{value}\" is not a valid timestamp")]
    InvalidTimestamp { codec: &'static str, value: String },
    #[error("{codec}: cannot encode {found}")]
    UnexpectedModel { codec: &'static str, found: String },
}

const STORE_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.fZ";

fn parse_timestamp(codec: Codec, wire: &Value) -> Result<DateTime<Utc>, CodecError> {
    let Value::String(text) = wire else {
        return Err(CodecError::ExpectedText {
            codec: codec.name(),
            found: wire.to_string(),
        });
    };

    if let Ok(at) = DateTime::parse_from_rfc3339(text) {
        return Ok(at.with_timezone(&Utc));
    }

    NaiveDateTime::parse_from_str(text, STORE_TIMESTAMP_FORMAT)
        .map(|naive| naive.and_utc())
        .map_err(|_| CodecError::InvalidTimestamp {
            codec: codec.name(),
            value: text.clone(),
        })
}

fn format_timestamp(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}
