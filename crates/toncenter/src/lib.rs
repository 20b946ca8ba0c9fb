// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! TON Center indexer client: account address codec, get-method stack decoding and a
//! rate-limited HTTP client.

pub mod address;
pub mod boc;
pub mod client;
pub mod crc;
pub mod decoder;
pub mod logging;
pub mod utils;

pub use address::{Address, AddressError, AddressForms, AddressFormat};
pub use client::{ClientBuilder, ClientError, ToncenterClient};
pub use decoder::{AutoDecoder, DecodeError, DecodedFields, DecodedValue, Decoder, Field, StackEntry};
pub use toncenter_config::{Network, NetworkConfig, ToncenterConfig};
