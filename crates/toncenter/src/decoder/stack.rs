// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Get-method result stack as returned by the indexer.
//!
//! Two wire shapes are accepted for every entry:
//! - object form: `{"type": "num", "value": "0x5"}`
//! - pair form: `["num", "0x5"]`
//!
//! Cell and slice values may be wrapped in a `{"bytes": "..."}` envelope, which is
//! unwrapped while deserializing.

use super::types::DecodeError;
use crate::boc::BOC_MAGIC_HEX;
use num_bigint::BigInt;
use base64::{
    Engine, alphabet,
    engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
};
use serde::{Deserialize, Serialize, ser::SerializeMap};
use serde_json::Value;
use std::fmt;

const PAD_INDIFFERENT: GeneralPurposeConfig =
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent);
const B64_LENIENT: GeneralPurpose = GeneralPurpose::new(&alphabet::STANDARD, PAD_INDIFFERENT);
const B64_URL_LENIENT: GeneralPurpose = GeneralPurpose::new(&alphabet::URL_SAFE, PAD_INDIFFERENT);

/// Type tag of a stack entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StackTag {
    Num,
    Cell,
    Slice,
    List,
    Tuple,
    #[serde(rename = "unsupported_type", other)]
    Unsupported,
}

impl StackTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            StackTag::Num => "num",
            StackTag::Cell => "cell",
            StackTag::Slice => "slice",
            StackTag::List => "list",
            StackTag::Tuple => "tuple",
            StackTag::Unsupported => "unsupported_type",
        }
    }
}

impl fmt::Display for StackTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One element of a get-method result stack.
#[derive(Debug, Clone, PartialEq)]
pub enum StackEntry {
    /// Hex integer, e.g. `"0x5"` or `"-0x1"`
    Num(String),
    /// Serialized bag of cells, base64 or hex
    Cell(String),
    /// Serialized bag of cells holding a slice
    Slice(String),
    List(Vec<StackEntry>),
    Tuple(Vec<StackEntry>),
    Unsupported(Value),
}

impl StackEntry {
    pub fn tag(&self) -> StackTag {
        match self {
            StackEntry::Num(_) => StackTag::Num,
            StackEntry::Cell(_) => StackTag::Cell,
            StackEntry::Slice(_) => StackTag::Slice,
            StackEntry::List(_) => StackTag::List,
            StackEntry::Tuple(_) => StackTag::Tuple,
            StackEntry::Unsupported(_) => StackTag::Unsupported,
        }
    }

    /// The entry's value in its wire representation, without the type tag.
    pub fn to_json(&self) -> Value {
        match self {
            StackEntry::Num(s) | StackEntry::Cell(s) | StackEntry::Slice(s) => {
                Value::String(s.clone())
            }
            StackEntry::List(items) | StackEntry::Tuple(items) => Value::Array(
                items
                    .iter()
                    .map(|item| {
                        serde_json::json!({ "type": item.tag().as_str(), "value": item.to_json() })
                    })
                    .collect(),
            ),
            StackEntry::Unsupported(value) => value.clone(),
        }
    }

    /// Decode the serialized cell bytes of a `cell` or `slice` entry.
    ///
    /// Base64 (standard or url-safe, padding optional) is tried first. Hex is accepted
    /// when it carries the bag-of-cells magic or when base64 does not apply.
    pub fn payload_bytes(&self) -> Result<Vec<u8>, DecodeError> {
        let payload = match self {
            StackEntry::Cell(s) | StackEntry::Slice(s) => s.as_str(),
            other => {
                return Err(DecodeError::InvalidCell(format!(
                    "{} entry has no cell payload",
                    other.tag()
                )));
            }
        };

        let hex_str = payload.strip_prefix("0x").unwrap_or(payload);
        if hex_str.to_ascii_lowercase().starts_with(BOC_MAGIC_HEX) {
            if let Ok(bytes) = hex::decode(hex_str) {
                return Ok(bytes);
            }
        }

        B64_LENIENT
            .decode(payload)
            .or_else(|_| B64_URL_LENIENT.decode(payload))
            .or_else(|_| hex::decode(hex_str))
            .map_err(|e| DecodeError::InvalidCell(format!("'{}': {}", payload, e)))
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawStackEntry {
    Object {
        #[serde(rename = "type")]
        tag: StackTag,
        #[serde(default)]
        value: Value,
    },
    Pair(StackTag, Value),
}

impl TryFrom<RawStackEntry> for StackEntry {
    type Error = String;

    fn try_from(raw: RawStackEntry) -> Result<Self, Self::Error> {
        let (tag, value) = match raw {
            RawStackEntry::Object { tag, value } => (tag, value),
            RawStackEntry::Pair(tag, value) => (tag, value),
        };

        match tag {
            StackTag::Num => match value {
                Value::String(s) => Ok(StackEntry::Num(s)),
                Value::Number(n) => match n.to_string().parse::<BigInt>() {
                    Ok(int) => Ok(StackEntry::Num(format!("{:#x}", int))),
                    Err(_) => Err(format!("num value {} is not an integer", n)),
                },
                other => Err(format!("num value must be a hex string, got {}", other)),
            },
            StackTag::Cell => unwrap_cell(value).map(StackEntry::Cell),
            StackTag::Slice => unwrap_cell(value).map(StackEntry::Slice),
            StackTag::List => nested(value).map(StackEntry::List),
            StackTag::Tuple => nested(value).map(StackEntry::Tuple),
            StackTag::Unsupported => Ok(StackEntry::Unsupported(value)),
        }
    }
}

/// Accept either a bare payload string or the `{"bytes": ...}` envelope.
fn unwrap_cell(value: Value) -> Result<String, String> {
    match value {
        Value::String(s) => Ok(s),
        Value::Object(mut map) => match map.remove("bytes") {
            Some(Value::String(s)) => Ok(s),
            _ => Err("cell envelope has no 'bytes' string".to_string()),
        },
        other => Err(format!("cell value must be a string, got {}", other)),
    }
}

fn nested(value: Value) -> Result<Vec<StackEntry>, String> {
    match value {
        Value::Array(items) => items
            .into_iter()
            .map(|item| serde_json::from_value::<StackEntry>(item).map_err(|e| e.to_string()))
            .collect(),
        Value::Null => Ok(Vec::new()),
        other => Err(format!("list value must be an array, got {}", other)),
    }
}

impl<'de> Deserialize<'de> for StackEntry {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = RawStackEntry::deserialize(deserializer)?;
        StackEntry::try_from(raw).map_err(serde::de::Error::custom)
    }
}

/// Serializes back to the object form.
impl Serialize for StackEntry {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry("type", self.tag().as_str())?;
        map.serialize_entry("value", &self.to_json())?;
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_object_form() {
        let stack: Vec<StackEntry> = serde_json::from_value(json!([
            {"type": "num", "value": "0x5"},
            {"type": "cell", "value": "te6cckEBAQEAAgAAAEysuc0="},
            {"type": "slice", "value": "te6cckEBAQEAAgAAAEysuc0="},
        ]))
        .unwrap();

        assert_eq!(stack[0], StackEntry::Num("0x5".to_string()));
        assert_eq!(stack[1].tag(), StackTag::Cell);
        assert_eq!(stack[2].tag(), StackTag::Slice);
    }

    #[test]
    fn test_deserialize_pair_form_with_envelope() {
        let stack: Vec<StackEntry> = serde_json::from_value(json!([
            ["num", "-0x1"],
            ["cell", {"bytes": "te6cckEBAQEAAgAAAEysuc0=", "object": {}}],
        ]))
        .unwrap();

        assert_eq!(stack[0], StackEntry::Num("-0x1".to_string()));
        assert_eq!(
            stack[1],
            StackEntry::Cell("te6cckEBAQEAAgAAAEysuc0=".to_string())
        );
    }

    #[test]
    fn test_deserialize_nested() {
        let entry: StackEntry = serde_json::from_value(json!({
            "type": "tuple",
            "value": [
                {"type": "num", "value": "0x1"},
                {"type": "list", "value": [{"type": "num", "value": "0x2"}]}
            ]
        }))
        .unwrap();

        match entry {
            StackEntry::Tuple(items) => {
                assert_eq!(items.len(), 2);
                assert_eq!(items[1].tag(), StackTag::List);
            }
            other => panic!("expected tuple, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_tag_is_unsupported() {
        let entry: StackEntry =
            serde_json::from_value(json!({"type": "continuation", "value": {"x": 1}})).unwrap();
        assert_eq!(entry.tag(), StackTag::Unsupported);
        assert_eq!(entry.to_json(), json!({"x": 1}));
    }

    #[test]
    fn test_numeric_num_value() {
        let entry: StackEntry = serde_json::from_value(json!(["num", -1])).unwrap();
        assert_eq!(entry, StackEntry::Num("-0x1".to_string()));

        let entry: StackEntry = serde_json::from_value(json!(["num", 255])).unwrap();
        assert_eq!(entry, StackEntry::Num("0xff".to_string()));
    }

    #[test]
    fn test_numeric_num_value_beyond_i64() {
        let entry: StackEntry = serde_json::from_value(json!(["num", u64::MAX])).unwrap();
        assert_eq!(entry, StackEntry::Num("0xffffffffffffffff".to_string()));

        let err = serde_json::from_value::<StackEntry>(json!(["num", 1.5])).unwrap_err();
        assert!(err.to_string().contains("not an integer"), "{}", err);
    }

    #[test]
    fn test_invalid_cell_value_rejected() {
        let result = serde_json::from_value::<StackEntry>(json!({"type": "cell", "value": 5}));
        assert!(result.is_err());
    }

    #[test]
    fn test_payload_bytes_base64_and_hex() {
        let b64 = StackEntry::Cell("te6cckEBAQEAAgAAAEysuc0=".to_string());
        let unpadded = StackEntry::Cell("te6cckEBAQEAAgAAAEysuc0".to_string());
        let hex = StackEntry::Cell("b5ee9c724101010100020000004cacb9cd".to_string());

        let expected = hex::decode("b5ee9c724101010100020000004cacb9cd").unwrap();
        assert_eq!(b64.payload_bytes().unwrap(), expected);
        assert_eq!(unpadded.payload_bytes().unwrap(), expected);
        assert_eq!(hex.payload_bytes().unwrap(), expected);
    }

    #[test]
    fn test_payload_bytes_rejects_num() {
        let entry = StackEntry::Num("0x1".to_string());
        assert!(entry.payload_bytes().is_err());
    }

    #[test]
    fn test_serialize_object_form() {
        let entry = StackEntry::List(vec![StackEntry::Num("0x1".to_string())]);
        assert_eq!(
            serde_json::to_value(&entry).unwrap(),
            json!({"type": "list", "value": [{"type": "num", "value": "0x1"}]})
        );
    }
}
