// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use super::field::parse_hex_int;
use super::stack::StackEntry;
use super::types::{DecodeWarning, DecodedFields, DecodedValue};
use super::FieldKind;
use crate::boc::parse_address_from_boc;

/// Schema-less decoder that names entries by position (`idx_0`, `idx_1_0`, ...).
///
/// Never fails: entries it cannot interpret come back as [`DecodedValue::Raw`].
#[derive(Debug, Clone, Copy, Default)]
pub struct AutoDecoder;

impl AutoDecoder {
    pub fn new() -> Self {
        Self
    }

    pub fn decode(&self, stack: &[StackEntry]) -> DecodedFields {
        let mut warnings = Vec::new();
        let fields = stack
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                let name = format!("idx_{}", i);
                let value = decode_entry(entry, &name, &mut warnings);
                (name, value)
            })
            .collect();

        DecodedFields::new(fields, warnings)
    }
}

fn decode_entry(entry: &StackEntry, path: &str, warnings: &mut Vec<DecodeWarning>) -> DecodedValue {
    match entry {
        StackEntry::Num(hex) => match parse_hex_int(hex) {
            Ok(n) => DecodedValue::Number(n),
            Err(_) => DecodedValue::Raw(entry.to_json()),
        },
        StackEntry::Cell(_) => match entry.payload_bytes() {
            Ok(bytes) => match parse_address_from_boc(&bytes) {
                Ok(address) => DecodedValue::Address(address),
                Err(e) => {
                    tracing::trace!(field = path, error = %e, "Cell is not an address");
                    DecodedValue::Cell(hex::encode(bytes))
                }
            },
            Err(e) => {
                tracing::debug!(field = path, error = %e, "Undecodable cell payload");
                DecodedValue::Raw(entry.to_json())
            }
        },
        StackEntry::Slice(_) => {
            let warning = DecodeWarning {
                field: path.to_string(),
                kind: FieldKind::Slice,
            };
            tracing::warn!("{}", warning);
            warnings.push(warning);
            DecodedValue::Raw(entry.to_json())
        }
        StackEntry::List(items) | StackEntry::Tuple(items) => DecodedValue::List(
            items
                .iter()
                .enumerate()
                .map(|(i, item)| decode_entry(item, &format!("{}_{}", path, i), warnings))
                .collect(),
        ),
        StackEntry::Unsupported(value) => DecodedValue::Raw(value.clone()),
    }
}
