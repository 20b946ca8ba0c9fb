// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::decoder::StackEntry;
use num_bigint::BigInt;
use serde::{Deserialize, Serialize};

/// Get-method argument in the indexer's `{"type", "value"}` form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StackParam {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub value: String,
}

impl StackParam {
    /// Integer argument, sent as signed hex (`0x2a`, `-0x1`).
    pub fn num(value: impl Into<BigInt>) -> Self {
        let value: BigInt = value.into();
        Self {
            kind: "num",
            value: format!("{:#x}", value),
        }
    }

    /// TVM boolean: `-1` for true, `0` for false.
    pub fn boolean(value: bool) -> Self {
        Self::num(if value { -1i32 } else { 0i32 })
    }

    /// Serialized bag of cells, base64.
    pub fn cell(boc_base64: impl Into<String>) -> Self {
        Self {
            kind: "cell",
            value: boc_base64.into(),
        }
    }

    /// Serialized bag of cells holding a slice, base64.
    pub fn slice(boc_base64: impl Into<String>) -> Self {
        Self {
            kind: "slice",
            value: boc_base64.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct RunGetMethodRequest<'a> {
    pub address: String,
    pub method: &'a str,
    pub stack: &'a [StackParam],
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunGetMethodResponse {
    pub gas_used: i64,
    pub exit_code: i32,
    pub stack: Vec<StackEntry>,
}

impl RunGetMethodResponse {
    /// Exit codes 0 and 1 both mean the get-method completed normally.
    pub fn is_success(&self) -> bool {
        matches!(self.exit_code, 0 | 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_stack_param_num() {
        assert_eq!(StackParam::num(42).value, "0x2a");
        assert_eq!(StackParam::num(0).value, "0x0");
        assert_eq!(StackParam::num(-1).value, "-0x1");
    }

    #[test]
    fn test_stack_param_boolean() {
        assert_eq!(StackParam::boolean(true).value, "-0x1");
        assert_eq!(StackParam::boolean(false).value, "0x0");
    }

    #[test]
    fn test_stack_param_serialization() {
        assert_eq!(
            serde_json::to_value(StackParam::cell("te6cckEBAQEAAgAAAEysuc0=")).unwrap(),
            json!({"type": "cell", "value": "te6cckEBAQEAAgAAAEysuc0="})
        );
    }

    #[test]
    fn test_response_deserialization() {
        let response: RunGetMethodResponse = serde_json::from_value(json!({
            "gas_used": 1234,
            "exit_code": 0,
            "stack": [{"type": "num", "value": "0x1"}, ["num", "-0x1"]]
        }))
        .unwrap();

        assert!(response.is_success());
        assert_eq!(response.stack.len(), 2);
        assert_eq!(response.stack[1], StackEntry::Num("-0x1".to_string()));
    }
}
