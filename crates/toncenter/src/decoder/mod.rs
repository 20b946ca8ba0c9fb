// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Decoding of get-method result stacks into named, typed values.

mod auto;
mod field;
mod presets;
mod schema;
mod stack;
mod types;

pub use auto::AutoDecoder;
pub use field::{Field, FieldKind, parse_hex_int};
pub use presets::{
    JettonData, JettonWalletData, NftItemData, jetton_data_decoder, jetton_wallet_data_decoder,
    nft_item_data_decoder,
};
pub use schema::Decoder;
pub use stack::{StackEntry, StackTag};
pub use types::{DecodeError, DecodeWarning, DecodedFields, DecodedValue};
