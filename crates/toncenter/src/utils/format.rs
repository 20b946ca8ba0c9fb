// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Formatting utilities for opcodes, payload encodings and address labels.

use crate::address::{Address, AddressFormat};
use base64::{
    Engine, alphabet,
    engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig, general_purpose::STANDARD},
};
use std::collections::HashMap;
use thiserror::Error;

const B64_PAD_INDIFFERENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

const DEFAULT_PREFIX: usize = 6;
const DEFAULT_SUFFIX: usize = 6;

#[derive(Debug, Error)]
pub enum EncodingError {
    #[error("Invalid hex: {0}")]
    Hex(#[from] hex::FromHexError),

    #[error("Invalid base64: {0}")]
    Base64(#[from] base64::DecodeError),
}

/// Format a 32-bit message opcode as `0x` followed by 8 lowercase hex digits.
pub fn get_opcode(opcode: u32) -> String {
    format!("0x{:08x}", opcode)
}

/// Re-encode hex data as standard padded base64. A `0x` prefix is ignored.
pub fn hex_to_base64(hex_data: &str) -> Result<String, EncodingError> {
    let bytes = hex::decode(hex_data.strip_prefix("0x").unwrap_or(hex_data))?;
    Ok(STANDARD.encode(bytes))
}

/// Re-encode base64 data as lowercase hex. Missing padding is tolerated.
pub fn base64_to_hex(data: &str) -> Result<String, EncodingError> {
    Ok(hex::encode(B64_PAD_INDIFFERENT.decode(data)?))
}

/// User-friendly, non-test form of `address` with its middle part elided.
///
/// Forms no longer than `prefix + suffix` are returned whole.
pub fn truncate_address(address: &Address, prefix: usize, suffix: usize) -> String {
    let friendly = address.format(AddressFormat::new().user_friendly(true).test_only(false));
    if friendly.len() > prefix + suffix {
        format!(
            "{}...{}",
            &friendly[..prefix],
            &friendly[friendly.len() - suffix..]
        )
    } else {
        friendly
    }
}

/// Human-readable labels for known addresses.
///
/// Unknown addresses fall back to the truncated (or full) user-friendly form.
#[derive(Debug, Clone, Default)]
pub struct AddressMapping {
    labels: HashMap<Address, String>,
    truncate: bool,
}

impl AddressMapping {
    pub fn new(labels: HashMap<Address, String>, truncate: bool) -> Self {
        Self { labels, truncate }
    }

    pub fn insert(&mut self, address: Address, label: impl Into<String>) {
        self.labels.insert(address, label.into());
    }

    pub fn label(&self, address: &Address) -> String {
        if let Some(label) = self.labels.get(address) {
            return label.clone();
        }
        if self.truncate {
            truncate_address(address, DEFAULT_PREFIX, DEFAULT_SUFFIX)
        } else {
            address.format(AddressFormat::new().user_friendly(true).test_only(false))
        }
    }
}
