// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

pub mod concurrency;
pub mod format;

pub use concurrency::{DEFAULT_CONCURRENCY, run_ordered};
pub use format::{
    AddressMapping, EncodingError, base64_to_hex, get_opcode, hex_to_base64, truncate_address,
};
