//! MMS value model and recursive value decoding
//!
//! The wire-level MMS codec lives behind the [`RawMmsValue`] adapter trait
//! (see [`crate::transport`]); this module turns adapter handles into owned
//! [`MmsValue`] trees. Decoding copies every scalar out of the adapter, so a
//! returned tree never borrows protocol-owned memory.
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::transport::RawMmsValue;

/// MMS value type tags
///
/// The closed set of type tags this client decodes. Directory and dataset
/// services only ever hand back values of these tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MmsType {
    Boolean,
    Float,
    Integer,
    Unsigned,
    String,
    VisibleString,
    Structure,
    Array,
    BitString,
    UtcTime,
}

impl fmt::Display for MmsType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MmsType::Boolean => "BOOLEAN",
            MmsType::Float => "FLOAT",
            MmsType::Integer => "INTEGER",
            MmsType::Unsigned => "UNSIGNED",
            MmsType::String => "STRING",
            MmsType::VisibleString => "VISIBLE_STRING",
            MmsType::Structure => "STRUCTURE",
            MmsType::Array => "ARRAY",
            MmsType::BitString => "BIT_STRING",
            MmsType::UtcTime => "UTC_TIME",
        };
        f.write_str(name)
    }
}

/// A decoded MMS value
///
/// Scalar variants carry their payload directly; `Structure` and `Array`
/// carry their children in wire order and never a scalar payload. Unsigned
/// values are widened into an `i64` on purpose: they stay non-negative for
/// display while sharing the integer container the rest of the EMS expects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum MmsValue {
    Boolean(bool),
    Float(f64),
    Integer(i64),
    /// Unsigned payloads widened to a signed 64-bit container
    Unsigned(i64),
    String(String),
    VisibleString(String),
    Structure(Vec<MmsValue>),
    Array(Vec<MmsValue>),
    /// Bit string collapsed to its integer representation
    BitString(u32),
    /// Seconds since the Unix epoch
    UtcTime(u32),
}

impl MmsValue {
    /// Type tag of this value
    pub fn mms_type(&self) -> MmsType {
        match self {
            MmsValue::Boolean(_) => MmsType::Boolean,
            MmsValue::Float(_) => MmsType::Float,
            MmsValue::Integer(_) => MmsType::Integer,
            MmsValue::Unsigned(_) => MmsType::Unsigned,
            MmsValue::String(_) => MmsType::String,
            MmsValue::VisibleString(_) => MmsType::VisibleString,
            MmsValue::Structure(_) => MmsType::Structure,
            MmsValue::Array(_) => MmsType::Array,
            MmsValue::BitString(_) => MmsType::BitString,
            MmsValue::UtcTime(_) => MmsType::UtcTime,
        }
    }

    /// True for every variant except `Structure` and `Array`
    pub fn is_scalar(&self) -> bool {
        !matches!(self, MmsValue::Structure(_) | MmsValue::Array(_))
    }

    /// Children of a `Structure` or `Array`, `None` for scalars
    pub fn children(&self) -> Option<&[MmsValue]> {
        match self {
            MmsValue::Structure(items) | MmsValue::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            MmsValue::Boolean(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            MmsValue::Float(v) => Some(*v),
            MmsValue::Integer(v) | MmsValue::Unsigned(v) => Some(*v as f64),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            MmsValue::Integer(v) | MmsValue::Unsigned(v) => Some(*v),
            MmsValue::BitString(v) | MmsValue::UtcTime(v) => Some(*v as i64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            MmsValue::String(s) | MmsValue::VisibleString(s) => Some(s),
            _ => None,
        }
    }

    /// UTC timestamp as a `chrono` datetime, for `UtcTime` values
    pub fn as_datetime(&self) -> Option<DateTime<Utc>> {
        match self {
            MmsValue::UtcTime(secs) => DateTime::from_timestamp(*secs as i64, 0),
            _ => None,
        }
    }

    /// JSON representation used when publishing decoded points downstream
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            MmsValue::Boolean(v) => serde_json::Value::Bool(*v),
            MmsValue::Float(v) => serde_json::json!(*v),
            MmsValue::Integer(v) | MmsValue::Unsigned(v) => serde_json::json!(*v),
            MmsValue::String(s) | MmsValue::VisibleString(s) => {
                serde_json::Value::String(s.clone())
            }
            MmsValue::Structure(items) | MmsValue::Array(items) => {
                serde_json::Value::Array(items.iter().map(MmsValue::to_json).collect())
            }
            MmsValue::BitString(v) | MmsValue::UtcTime(v) => serde_json::json!(*v),
        }
    }
}

/// Recursively decode an adapter value handle into an owned [`MmsValue`]
///
/// `without_timestamps` substitutes `0` for `BitString` and `UtcTime`
/// payloads without touching the adapter accessor; callers that only care
/// about process values use it to skip quality/timestamp decoding.
pub fn decode_value(raw: &dyn RawMmsValue, without_timestamps: bool) -> MmsValue {
    match raw.mms_type() {
        MmsType::Boolean => MmsValue::Boolean(raw.as_bool()),
        MmsType::Float => MmsValue::Float(raw.to_f64()),
        MmsType::Integer => MmsValue::Integer(raw.to_i64()),
        MmsType::Unsigned => MmsValue::Unsigned(raw.to_i64()),
        MmsType::String => MmsValue::String(raw.string_value()),
        MmsType::VisibleString => MmsValue::VisibleString(raw.string_value()),
        MmsType::Structure => MmsValue::Structure(decode_children(raw, without_timestamps)),
        MmsType::Array => MmsValue::Array(decode_children(raw, without_timestamps)),
        MmsType::BitString => {
            if without_timestamps {
                MmsValue::BitString(0)
            } else {
                MmsValue::BitString(raw.bit_string_as_u32())
            }
        }
        MmsType::UtcTime => {
            if without_timestamps {
                MmsValue::UtcTime(0)
            } else {
                MmsValue::UtcTime(raw.unix_timestamp())
            }
        }
    }
}

fn decode_children(raw: &dyn RawMmsValue, without_timestamps: bool) -> Vec<MmsValue> {
    // Most structures stay under 32 elements; the capacity is a hint only.
    let mut children = Vec::with_capacity(32);
    let mut index = 0;
    while let Some(child) = raw.element(index) {
        children.push(decode_value(child, without_timestamps));
        index += 1;
    }
    children
}
