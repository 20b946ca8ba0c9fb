// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Account address value type.
//!
//! An address is a `(workchain, hash)` pair. It has two textual encodings:
//! - raw form: `"{workchain}:{64 lowercase hex chars}"`
//! - user-friendly form: 48 base64 characters wrapping
//!   `tag (1) | workchain (1) | hash (32) | crc16 (2)`
//!
//! The parsed value remembers how it was written (bounceable, test-only, url-safe,
//! user-friendly) so that [`fmt::Display`] reproduces the input form, but those flags
//! never take part in equality or hashing.

use crate::crc::crc16;
use base64::{Engine, engine::general_purpose::STANDARD as B64};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use thiserror::Error;

const BOUNCEABLE_TAG: u8 = 0x11;
const NON_BOUNCEABLE_TAG: u8 = 0x51;
const TEST_FLAG: u8 = 0x80;

/// Length of the user-friendly textual form.
pub const FRIENDLY_LEN: usize = 48;
/// Length of the decoded user-friendly payload, checksum included.
const FRIENDLY_BYTES: usize = 36;
const HASH_HEX_LEN: usize = 64;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AddressError {
    #[error("Address is empty")]
    Empty,

    #[error("Invalid workchain '{0}': not an integer")]
    InvalidWorkchain(String),

    #[error("Unsupported workchain {0}: only 0 and -1 are recognized")]
    UnsupportedWorkchain(i32),

    #[error("Invalid raw address: expected 64 hex characters after ':', got {0}")]
    InvalidHashLength(usize),

    #[error("Invalid raw address hex: {0}")]
    InvalidHex(String),

    #[error("Invalid raw address: expected exactly one ':' separator")]
    InvalidRawForm,

    #[error("Invalid user-friendly address: expected 48 characters, got {0}")]
    InvalidLength(usize),

    #[error("Invalid user-friendly address base64: {0}")]
    InvalidBase64(String),

    #[error("Invalid user-friendly address: expected 36 decoded bytes, got {0}")]
    InvalidByteLength(usize),

    #[error("Invalid user-friendly address: checksum mismatch")]
    ChecksumMismatch,

    #[error("Invalid user-friendly address: unknown tag 0x{0:02x}")]
    UnknownTag(u8),
}

/// An on-chain account identifier.
#[derive(Debug, Clone)]
pub struct Address {
    workchain: i32,
    hash_part: [u8; 32],
    is_test_only: bool,
    is_bounceable: bool,
    is_user_friendly: bool,
    is_url_safe: bool,
}

/// Serialization knobs for [`Address::format`].
///
/// Every knob left as `None` falls back to the flag the address was parsed with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AddressFormat {
    pub user_friendly: Option<bool>,
    pub url_safe: Option<bool>,
    pub bounceable: Option<bool>,
    pub test_only: Option<bool>,
}

impl AddressFormat {
    /// Format that reproduces the original input form.
    pub fn new() -> Self {
        Self::default()
    }

    /// User-friendly, url-safe, bounceable, non-test. Used for equality and serde.
    pub fn canonical() -> Self {
        Self {
            user_friendly: Some(true),
            url_safe: Some(true),
            bounceable: Some(true),
            test_only: Some(false),
        }
    }

    pub fn raw() -> Self {
        Self {
            user_friendly: Some(false),
            ..Self::default()
        }
    }

    pub fn user_friendly(mut self, value: bool) -> Self {
        self.user_friendly = Some(value);
        self
    }

    pub fn url_safe(mut self, value: bool) -> Self {
        self.url_safe = Some(value);
        self
    }

    pub fn bounceable(mut self, value: bool) -> Self {
        self.bounceable = Some(value);
        self
    }

    pub fn test_only(mut self, value: bool) -> Self {
        self.test_only = Some(value);
        self
    }
}

/// Base64 and base64url spellings of one friendly variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FriendlyForms {
    pub b64: String,
    pub b64url: String,
}

/// Every textual form of an address, shaped like the indexer's address detection result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddressForms {
    pub raw_form: String,
    pub bounceable: FriendlyForms,
    pub non_bounceable: FriendlyForms,
    pub given_type: String,
    pub test_only: bool,
}

impl Address {
    /// Parse any textual address form.
    ///
    /// A `:` selects the raw form, otherwise the input is treated as user-friendly.
    pub fn parse(input: &str) -> Result<Self, AddressError> {
        if input.is_empty() {
            return Err(AddressError::Empty);
        }

        // A leading '-' is the sign of a raw masterchain workchain, not base64url.
        let url_safe = input
            .char_indices()
            .any(|(i, c)| i > 0 && (c == '-' || c == '_'));

        if input.contains(':') {
            return Self::parse_raw(input);
        }

        if url_safe {
            let normalized = input.replace('-', "+").replace('_', "/");
            Self::parse_friendly(&normalized, true)
        } else {
            Self::parse_friendly(input, false)
        }
    }

    /// Build an address from an already decoded `(workchain, hash)` pair.
    ///
    /// Provenance flags are those of a raw-form address.
    pub fn from_parts(workchain: i32, hash_part: [u8; 32]) -> Result<Self, AddressError> {
        check_workchain(workchain)?;
        Ok(Self {
            workchain,
            hash_part,
            is_test_only: false,
            is_bounceable: false,
            is_user_friendly: false,
            is_url_safe: false,
        })
    }

    fn parse_raw(input: &str) -> Result<Self, AddressError> {
        let (wc, hex_part) = input.split_once(':').ok_or(AddressError::InvalidRawForm)?;
        if hex_part.contains(':') {
            return Err(AddressError::InvalidRawForm);
        }

        let workchain = wc
            .parse::<i32>()
            .map_err(|_| AddressError::InvalidWorkchain(wc.to_string()))?;
        check_workchain(workchain)?;

        if hex_part.len() != HASH_HEX_LEN {
            return Err(AddressError::InvalidHashLength(hex_part.len()));
        }

        let mut hash_part = [0u8; 32];
        hex::decode_to_slice(hex_part, &mut hash_part)
            .map_err(|e| AddressError::InvalidHex(e.to_string()))?;

        Ok(Self {
            workchain,
            hash_part,
            is_test_only: false,
            is_bounceable: false,
            is_user_friendly: false,
            is_url_safe: false,
        })
    }

    fn parse_friendly(input: &str, url_safe: bool) -> Result<Self, AddressError> {
        if input.len() != FRIENDLY_LEN {
            return Err(AddressError::InvalidLength(input.len()));
        }

        let data = B64
            .decode(input)
            .map_err(|e| AddressError::InvalidBase64(e.to_string()))?;
        if data.len() != FRIENDLY_BYTES {
            return Err(AddressError::InvalidByteLength(data.len()));
        }

        let (payload, checksum) = data.split_at(34);
        if crc16(payload) != checksum {
            return Err(AddressError::ChecksumMismatch);
        }

        let mut tag = payload[0];
        let is_test_only = tag & TEST_FLAG != 0;
        if is_test_only {
            tag ^= TEST_FLAG;
        }
        let is_bounceable = match tag {
            BOUNCEABLE_TAG => true,
            NON_BOUNCEABLE_TAG => false,
            other => return Err(AddressError::UnknownTag(other)),
        };

        let workchain = if payload[1] == 0xff {
            -1
        } else {
            payload[1] as i32
        };
        check_workchain(workchain)?;

        let mut hash_part = [0u8; 32];
        hash_part.copy_from_slice(&payload[2..34]);

        Ok(Self {
            workchain,
            hash_part,
            is_test_only,
            is_bounceable,
            is_user_friendly: true,
            is_url_safe: url_safe,
        })
    }

    pub fn workchain(&self) -> i32 {
        self.workchain
    }

    pub fn hash_part(&self) -> &[u8; 32] {
        &self.hash_part
    }

    pub fn is_test_only(&self) -> bool {
        self.is_test_only
    }

    pub fn is_bounceable(&self) -> bool {
        self.is_bounceable
    }

    pub fn is_user_friendly(&self) -> bool {
        self.is_user_friendly
    }

    pub fn is_url_safe(&self) -> bool {
        self.is_url_safe
    }

    /// Serialize with the given options, falling back to the instance's own flags.
    pub fn format(&self, options: AddressFormat) -> String {
        let user_friendly = options.user_friendly.unwrap_or(self.is_user_friendly);
        if !user_friendly {
            return format!("{}:{}", self.workchain, hex::encode(self.hash_part));
        }

        let url_safe = options.url_safe.unwrap_or(self.is_url_safe);
        let bounceable = options.bounceable.unwrap_or(self.is_bounceable);
        let test_only = options.test_only.unwrap_or(self.is_test_only);

        let mut tag = if bounceable {
            BOUNCEABLE_TAG
        } else {
            NON_BOUNCEABLE_TAG
        };
        if test_only {
            tag |= TEST_FLAG;
        }

        let mut buf = Vec::with_capacity(FRIENDLY_BYTES);
        buf.push(tag);
        buf.push(if self.workchain == -1 {
            0xff
        } else {
            self.workchain as u8
        });
        buf.extend_from_slice(&self.hash_part);
        let checksum = crc16(&buf);
        buf.extend_from_slice(&checksum);

        let encoded = B64.encode(&buf);
        if url_safe {
            encoded.replace('+', "-").replace('/', "_")
        } else {
            encoded
        }
    }

    /// `workchain:hex` form.
    pub fn to_raw(&self) -> String {
        self.format(AddressFormat::raw())
    }

    /// User-friendly, url-safe, bounceable, non-test form.
    pub fn to_canonical(&self) -> String {
        self.format(AddressFormat::canonical())
    }

    /// All textual forms of this address.
    pub fn forms(&self) -> AddressForms {
        let friendly = |bounceable: bool| FriendlyForms {
            b64: self.format(
                AddressFormat::new()
                    .user_friendly(true)
                    .url_safe(false)
                    .bounceable(bounceable),
            ),
            b64url: self.format(
                AddressFormat::new()
                    .user_friendly(true)
                    .url_safe(true)
                    .bounceable(bounceable),
            ),
        };

        let given_type = match (self.is_user_friendly, self.is_bounceable) {
            (false, _) => "raw_form",
            (true, true) => "friendly_bounceable",
            (true, false) => "friendly_non_bounceable",
        };

        AddressForms {
            raw_form: self.to_raw(),
            bounceable: friendly(true),
            non_bounceable: friendly(false),
            given_type: given_type.to_string(),
            test_only: self.is_test_only,
        }
    }
}

fn check_workchain(workchain: i32) -> Result<(), AddressError> {
    match workchain {
        0 | -1 => Ok(()),
        other => Err(AddressError::UnsupportedWorkchain(other)),
    }
}

/// Reproduces the form the address was parsed from.
impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format(AddressFormat::new()))
    }
}

impl FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for Address {
    type Error = AddressError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl TryFrom<String> for Address {
    type Error = AddressError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl PartialEq for Address {
    fn eq(&self, other: &Self) -> bool {
        self.workchain == other.workchain && self.hash_part == other.hash_part
    }
}

impl Eq for Address {}

impl Hash for Address {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.workchain.hash(state);
        self.hash_part.hash(state);
    }
}

impl PartialEq<str> for Address {
    fn eq(&self, other: &str) -> bool {
        Address::parse(other).is_ok_and(|addr| addr == *self)
    }
}

impl PartialEq<&str> for Address {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

/// Serialize as the canonical user-friendly string
impl Serialize for Address {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_canonical())
    }
}

/// Deserialize from any accepted textual form
impl<'de> Deserialize<'de> for Address {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Address::parse(&s).map_err(serde::de::Error::custom)
    }
}
