// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Schemas for the standard jetton and NFT get-methods.

use super::field::Field;
use super::schema::Decoder;
use super::stack::StackEntry;
use super::types::{DecodeError, serialize_bigint};
use crate::address::Address;
use lazy_static::lazy_static;
use num_bigint::BigInt;
use serde::Serialize;

lazy_static! {
    static ref JETTON_DATA: Decoder = Decoder::from_distinct(vec![
        Field::number("total_supply"),
        Field::boolean("mintable"),
        Field::address("admin_address"),
        Field::cell("jetton_content"),
        Field::cell("jetton_wallet_code"),
    ]);
    static ref JETTON_WALLET_DATA: Decoder = Decoder::from_distinct(vec![
        Field::number("balance"),
        Field::address("owner"),
        Field::address("jetton"),
        Field::cell("jetton_wallet_code"),
    ]);
    static ref NFT_ITEM_DATA: Decoder = Decoder::from_distinct(vec![
        Field::boolean("init"),
        Field::number("index"),
        Field::address("collection_address"),
        Field::address("owner_address"),
        Field::cell("individual_content"),
    ]);
}

/// Schema of the `get_jetton_data` get-method.
pub fn jetton_data_decoder() -> &'static Decoder {
    &JETTON_DATA
}

/// Schema of the `get_wallet_data` get-method on a jetton wallet.
pub fn jetton_wallet_data_decoder() -> &'static Decoder {
    &JETTON_WALLET_DATA
}

/// Schema of the `get_nft_data` get-method.
pub fn nft_item_data_decoder() -> &'static Decoder {
    &NFT_ITEM_DATA
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JettonData {
    #[serde(serialize_with = "serialize_bigint")]
    pub total_supply: BigInt,
    pub mintable: bool,
    pub admin_address: Address,
    /// Hex of the content cell
    pub jetton_content: String,
    /// Hex of the wallet code cell
    pub jetton_wallet_code: String,
}

impl JettonData {
    pub fn from_stack(stack: &[StackEntry]) -> Result<Self, DecodeError> {
        let mut fields = jetton_data_decoder().decode(stack)?;
        Ok(Self {
            total_supply: fields.take_number("total_supply")?,
            mintable: fields.take_bool("mintable")?,
            admin_address: fields.take_address("admin_address")?,
            jetton_content: fields.take_cell("jetton_content")?,
            jetton_wallet_code: fields.take_cell("jetton_wallet_code")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JettonWalletData {
    #[serde(serialize_with = "serialize_bigint")]
    pub balance: BigInt,
    pub owner: Address,
    pub jetton: Address,
    pub jetton_wallet_code: String,
}

impl JettonWalletData {
    pub fn from_stack(stack: &[StackEntry]) -> Result<Self, DecodeError> {
        let mut fields = jetton_wallet_data_decoder().decode(stack)?;
        Ok(Self {
            balance: fields.take_number("balance")?,
            owner: fields.take_address("owner")?,
            jetton: fields.take_address("jetton")?,
            jetton_wallet_code: fields.take_cell("jetton_wallet_code")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NftItemData {
    pub init: bool,
    #[serde(serialize_with = "serialize_bigint")]
    pub index: BigInt,
    pub collection_address: Address,
    pub owner_address: Address,
    pub individual_content: String,
}

impl NftItemData {
    pub fn from_stack(stack: &[StackEntry]) -> Result<Self, DecodeError> {
        let mut fields = nft_item_data_decoder().decode(stack)?;
        Ok(Self {
            init: fields.take_bool("init")?,
            index: fields.take_number("index")?,
            collection_address: fields.take_address("collection_address")?,
            owner_address: fields.take_address("owner_address")?,
            individual_content: fields.take_cell("individual_content")?,
        })
    }
}
