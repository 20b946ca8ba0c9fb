// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! End-to-end decoding of recorded get-method responses.

use num_bigint::BigInt;
use serde_json::{Value, json};
use std::path::PathBuf;
use toncenter::client::RunGetMethodResponse;
use toncenter::decoder::{
    AutoDecoder, DecodeError, DecodedValue, Decoder, Field, FieldKind, JettonData, StackEntry,
    StackTag,
};
use toncenter::Address;

fn fixture(name: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name);
    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e))
}

fn oracle_response() -> RunGetMethodResponse {
    serde_json::from_str(&fixture("oracle_data_response.json")).unwrap()
}

fn oracle_decoder() -> Decoder {
    Decoder::new(vec![
        Field::address("base_asset_address"),
        Field::address("quote_asset_address"),
        Field::number("base_asset_decimals"),
        Field::number("quote_asset_decimals"),
        Field::number("min_base_asset_threshold"),
        Field::address("base_asset_wallet_address"),
        Field::address("quote_asset_wallet_address"),
        Field::boolean("is_initialized"),
        Field::number("latest_base_asset_price"),
        Field::number("latest_timestamp"),
    ])
    .unwrap()
}

fn addr(s: &str) -> Address {
    Address::parse(s).unwrap()
}

#[test]
fn test_custom_schema_on_recorded_response() {
    let response = oracle_response();
    assert!(response.is_success());

    let out = oracle_decoder().decode(&response.stack).unwrap();

    assert_eq!(out.len(), 10);
    assert_eq!(
        out["base_asset_address"],
        DecodedValue::Address(addr(
            "0:0000000000000000000000000000000000000000000000000000000000000000"
        ))
    );
    assert_eq!(out["base_asset_decimals"].as_number(), Some(&BigInt::from(9)));
    assert_eq!(out["is_initialized"].as_bool(), Some(true));
    assert_eq!(
        out["min_base_asset_threshold"].as_number(),
        Some(&BigInt::from(1_000_000_000))
    );
    assert_eq!(
        out["quote_asset_wallet_address"]
            .as_address()
            .map(Address::workchain),
        Some(-1)
    );
    assert!(out.warnings().is_empty());
}

#[test]
fn test_decoded_addresses_compare_across_forms() {
    let out = oracle_decoder().decode(&oracle_response().stack).unwrap();
    let quote = out["quote_asset_address"].as_address().unwrap();

    assert_eq!(
        *quote,
        addr("0:bccc51ccf0b08ca7d5ecfbec3783dc267fb470b83809710b55fa81d94520aa41")
    );
    assert_eq!(*quote, addr("EQC8zFHM8LCMp9Xs--w3g9wmf7RwuDgJcQtV-oHZRSCqQZ__"));
}

#[test]
fn test_auto_decoder_on_recorded_response() {
    let out = AutoDecoder::new().decode(&oracle_response().stack);

    let keys: Vec<&str> = out.keys().collect();
    assert_eq!(keys.first(), Some(&"idx_0"));
    assert_eq!(keys.last(), Some(&"idx_9"));

    assert_eq!(
        out["idx_0"].as_address(),
        Some(&addr(
            "0:0000000000000000000000000000000000000000000000000000000000000000"
        ))
    );
    assert_eq!(out["idx_2"].as_number(), Some(&BigInt::from(9)));
    assert_eq!(out["idx_4"].as_number(), Some(&BigInt::from(1_000_000_000)));
    // Without a schema a TVM true stays the integer -1
    assert_eq!(out["idx_7"].as_number(), Some(&BigInt::from(-1)));
}

#[test]
fn test_jetton_data_from_pair_form_stack() {
    let stack: Vec<StackEntry> = serde_json::from_str(&fixture("jetton_data_v2_stack.json")).unwrap();
    let data = JettonData::from_stack(&stack).unwrap();

    assert_eq!(
        data.total_supply,
        "10000000000000000".parse::<BigInt>().unwrap()
    );
    assert!(data.mintable);
    assert_eq!(
        data.admin_address,
        addr("0:bccc51ccf0b08ca7d5ecfbec3783dc267fb470b83809710b55fa81d94520aa41")
    );
    assert_eq!(data.jetton_content, "b5ee9c72410101010003000002ff8234a1ec");
}

#[test]
fn test_auto_decoder_nested_and_unsupported() {
    let stack: Vec<StackEntry> = serde_json::from_str(&fixture("nested_stack.json")).unwrap();
    let out = AutoDecoder::new().decode(&stack);

    let tuple = out["idx_0"].as_list().unwrap();
    assert_eq!(tuple[0], DecodedValue::Number(BigInt::from(1)));

    let inner = tuple[1].as_list().unwrap();
    assert!(inner[0].as_address().is_some());
    assert_eq!(inner[1], DecodedValue::Raw(json!("te6cckEBAQEAAgAAAEysuc0=")));

    assert_eq!(out["idx_1"], DecodedValue::Raw(json!({"code": "opaque"})));

    assert_eq!(out.warnings().len(), 1);
    assert_eq!(out.warnings()[0].field, "idx_0_1_1");
    assert_eq!(out.warnings()[0].kind, FieldKind::Slice);
}

#[test]
fn test_decode_scenario_number_and_bool() {
    let stack: Vec<StackEntry> = serde_json::from_value(json!([
        {"type": "num", "value": "0x5"},
        {"type": "num", "value": "-0x1"}
    ]))
    .unwrap();

    let out = Decoder::new(vec![Field::number("n"), Field::boolean("b")])
        .unwrap()
        .decode(&stack)
        .unwrap();

    assert_eq!(serde_json::to_value(&out).unwrap(), json!({"n": "5", "b": true}));
}

#[test]
fn test_schema_errors() {
    let stack: Vec<StackEntry> = serde_json::from_str(&fixture("jetton_data_v2_stack.json")).unwrap();

    // One field short
    let short = Decoder::new(vec![
        Field::number("total_supply"),
        Field::boolean("mintable"),
        Field::address("admin_address"),
        Field::cell("jetton_content"),
    ])
    .unwrap();
    assert_eq!(
        short.decode(&stack).unwrap_err(),
        DecodeError::SchemaMismatch {
            expected: 4,
            actual: 5
        }
    );

    // Number where a cell sits
    let swapped = Decoder::new(vec![
        Field::number("total_supply"),
        Field::boolean("mintable"),
        Field::number("admin_address"),
        Field::cell("jetton_content"),
        Field::cell("jetton_wallet_code"),
    ])
    .unwrap();
    assert_eq!(
        swapped.decode(&stack).unwrap_err(),
        DecodeError::TypeMismatch {
            index: 2,
            field: "admin_address".to_string(),
            expected: StackTag::Num,
            actual: StackTag::Cell,
        }
    );

    // A cell that is not an address
    let not_an_address = Decoder::new(vec![
        Field::raw("total_supply"),
        Field::raw("mintable"),
        Field::raw("admin_address"),
        Field::address("jetton_content"),
        Field::raw("jetton_wallet_code"),
    ])
    .unwrap();
    assert!(matches!(
        not_an_address.decode(&stack).unwrap_err(),
        DecodeError::Cell(_)
    ));
}

#[test]
fn test_raw_fields_keep_wire_value() {
    let stack: Vec<StackEntry> = serde_json::from_str(&fixture("jetton_data_v2_stack.json")).unwrap();
    let decoder = Decoder::new(
        (0..5)
            .map(|i| Field::raw(format!("field_{}", i)))
            .collect(),
    )
    .unwrap();

    let out = decoder.decode(&stack).unwrap();
    assert_eq!(out["field_0"], DecodedValue::Raw(Value::from("0x2386f26fc10000")));
    assert_eq!(
        out["field_4"],
        DecodedValue::Raw(Value::from("te6cckEBAQEAAgAAAEysuc0="))
    );
}
