// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use super::field::FieldKind;
use super::stack::StackTag;
use crate::address::Address;
use crate::boc::CellError;
use num_bigint::BigInt;
use serde::{Serialize, Serializer, ser::SerializeMap};
use serde_json::Value;
use std::fmt;
use thiserror::Error;

// ================================================================================================
// Errors
// ================================================================================================

#[derive(Debug, Error, Clone, PartialEq)]
pub enum DecodeError {
    #[error("Duplicate field name '{0}' in schema")]
    DuplicateField(String),

    #[error("Schema has {expected} fields but stack has {actual} entries")]
    SchemaMismatch { expected: usize, actual: usize },

    #[error("Field '{field}' at index {index}: expected {expected}, got {actual}")]
    TypeMismatch {
        index: usize,
        field: String,
        expected: StackTag,
        actual: StackTag,
    },

    #[error("Invalid number: {0}")]
    InvalidNumber(String),

    #[error("Invalid cell payload: {0}")]
    InvalidCell(String),

    #[error("Field '{field}' does not hold a {expected} value")]
    UnexpectedValue { field: String, expected: &'static str },

    #[error(transparent)]
    Cell(#[from] CellError),
}

// ================================================================================================
// Warnings
// ================================================================================================

/// Non-fatal condition hit while decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeWarning {
    pub field: String,
    pub kind: FieldKind,
}

impl fmt::Display for DecodeWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "field '{}': {:?} values are not decoded, returning raw value",
            self.field, self.kind
        )
    }
}

// ================================================================================================
// Decoded values
// ================================================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum DecodedValue {
    /// Entry passed through untouched
    Raw(Value),
    Number(BigInt),
    Bool(bool),
    Address(Address),
    /// Hex of the serialized cell bytes
    Cell(String),
    List(Vec<DecodedValue>),
}

impl DecodedValue {
    pub fn as_number(&self) -> Option<&BigInt> {
        match self {
            DecodedValue::Number(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            DecodedValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_address(&self) -> Option<&Address> {
        match self {
            DecodedValue::Address(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_cell_hex(&self) -> Option<&str> {
        match self {
            DecodedValue::Cell(hex) => Some(hex),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[DecodedValue]> {
        match self {
            DecodedValue::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_raw(&self) -> Option<&Value> {
        match self {
            DecodedValue::Raw(v) => Some(v),
            _ => None,
        }
    }
}

/// Numbers are written as decimal strings so no precision is lost in JSON.
impl Serialize for DecodedValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            DecodedValue::Raw(v) => v.serialize(serializer),
            DecodedValue::Number(n) => serialize_bigint(n, serializer),
            DecodedValue::Bool(b) => serializer.serialize_bool(*b),
            DecodedValue::Address(a) => a.serialize(serializer),
            DecodedValue::Cell(hex) => serializer.serialize_str(hex),
            DecodedValue::List(items) => items.serialize(serializer),
        }
    }
}

pub(crate) fn serialize_bigint<S>(n: &BigInt, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&n.to_string())
}

/// Named decode results in schema order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DecodedFields {
    fields: Vec<(String, DecodedValue)>,
    warnings: Vec<DecodeWarning>,
}

impl DecodedFields {
    pub(crate) fn new(fields: Vec<(String, DecodedValue)>, warnings: Vec<DecodeWarning>) -> Self {
        Self { fields, warnings }
    }

    pub fn get(&self, name: &str) -> Option<&DecodedValue> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &DecodedValue)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn warnings(&self) -> &[DecodeWarning] {
        &self.warnings
    }

    pub fn into_inner(self) -> Vec<(String, DecodedValue)> {
        self.fields
    }

    /// Move a field out, leaving the rest in place.
    pub fn remove(&mut self, name: &str) -> Option<DecodedValue> {
        let pos = self.fields.iter().position(|(field, _)| field == name)?;
        Some(self.fields.remove(pos).1)
    }

    pub fn take_number(&mut self, name: &str) -> Result<BigInt, DecodeError> {
        match self.remove(name) {
            Some(DecodedValue::Number(n)) => Ok(n),
            _ => Err(unexpected(name, "number")),
        }
    }

    pub fn take_bool(&mut self, name: &str) -> Result<bool, DecodeError> {
        match self.remove(name) {
            Some(DecodedValue::Bool(b)) => Ok(b),
            _ => Err(unexpected(name, "bool")),
        }
    }

    pub fn take_address(&mut self, name: &str) -> Result<Address, DecodeError> {
        match self.remove(name) {
            Some(DecodedValue::Address(a)) => Ok(a),
            _ => Err(unexpected(name, "address")),
        }
    }

    pub fn take_cell(&mut self, name: &str) -> Result<String, DecodeError> {
        match self.remove(name) {
            Some(DecodedValue::Cell(hex)) => Ok(hex),
            _ => Err(unexpected(name, "cell")),
        }
    }
}

fn unexpected(field: &str, expected: &'static str) -> DecodeError {
    DecodeError::UnexpectedValue {
        field: field.to_string(),
        expected,
    }
}

impl std::ops::Index<&str> for DecodedFields {
    type Output = DecodedValue;

    fn index(&self, name: &str) -> &Self::Output {
        match self.get(name) {
            Some(value) => value,
            None => panic!("no decoded field named '{}'", name),
        }
    }
}

impl Serialize for DecodedFields {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}
