// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use super::stack::{StackEntry, StackTag};
use super::types::{DecodeError, DecodeWarning, DecodedValue};
use crate::boc::parse_address_from_boc;
use num_bigint::BigInt;
use num_traits::Zero;

/// How a single stack entry is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// Any tag, value passed through
    Raw,
    Number,
    Bool,
    Address,
    Cell,
    Slice,
    List,
    Tuple,
}

impl FieldKind {
    /// Tag the entry must carry, `None` when any tag is accepted.
    pub fn expected_tag(&self) -> Option<StackTag> {
        match self {
            FieldKind::Raw => None,
            FieldKind::Number | FieldKind::Bool => Some(StackTag::Num),
            FieldKind::Address | FieldKind::Cell => Some(StackTag::Cell),
            FieldKind::Slice => Some(StackTag::Slice),
            FieldKind::List => Some(StackTag::List),
            FieldKind::Tuple => Some(StackTag::Tuple),
        }
    }

    pub fn accepts(&self, tag: StackTag) -> bool {
        match self {
            // Addresses are returned either as a cell or as a slice
            FieldKind::Address => matches!(tag, StackTag::Cell | StackTag::Slice),
            other => other.expected_tag().is_none_or(|expected| expected == tag),
        }
    }
}

/// Named slot of a decoding schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    name: String,
    kind: FieldKind,
}

impl Field {
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    pub fn raw(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Raw)
    }

    pub fn number(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Number)
    }

    pub fn boolean(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Bool)
    }

    pub fn address(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Address)
    }

    pub fn cell(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Cell)
    }

    pub fn slice(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Slice)
    }

    pub fn list(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::List)
    }

    pub fn tuple(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Tuple)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    /// Decode an entry whose tag has already been checked against this field.
    pub(crate) fn decode(
        &self,
        entry: &StackEntry,
        warnings: &mut Vec<DecodeWarning>,
    ) -> Result<DecodedValue, DecodeError> {
        match (self.kind, entry) {
            (FieldKind::Number, StackEntry::Num(hex)) => parse_hex_int(hex).map(DecodedValue::Number),
            (FieldKind::Bool, StackEntry::Num(hex)) => {
                parse_hex_int(hex).map(|n| DecodedValue::Bool(!n.is_zero()))
            }
            (FieldKind::Address, _) => {
                let bytes = entry.payload_bytes()?;
                Ok(DecodedValue::Address(parse_address_from_boc(&bytes)?))
            }
            (FieldKind::Cell, _) => entry
                .payload_bytes()
                .map(|bytes| DecodedValue::Cell(hex::encode(bytes))),
            (FieldKind::Slice | FieldKind::List | FieldKind::Tuple, _) => {
                let warning = DecodeWarning {
                    field: self.name.clone(),
                    kind: self.kind,
                };
                tracing::warn!("{}", warning);
                warnings.push(warning);
                Ok(DecodedValue::Raw(entry.to_json()))
            }
            _ => Ok(DecodedValue::Raw(entry.to_json())),
        }
    }
}

/// Parse a hex integer as produced by the TVM: optional sign, optional `0x` prefix.
pub fn parse_hex_int(value: &str) -> Result<BigInt, DecodeError> {
    let trimmed = value.trim();
    let (negative, unsigned) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed),
    };
    let digits = unsigned
        .strip_prefix("0x")
        .or_else(|| unsigned.strip_prefix("0X"))
        .unwrap_or(unsigned);

    if digits.is_empty() || digits.starts_with(['+', '-']) {
        return Err(DecodeError::InvalidNumber(value.to_string()));
    }

    let magnitude = BigInt::parse_bytes(digits.as_bytes(), 16)
        .ok_or_else(|| DecodeError::InvalidNumber(value.to_string()))?;

    Ok(if negative { -magnitude } else { magnitude })
}
