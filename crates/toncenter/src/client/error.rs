// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::address::AddressError;
use crate::decoder::DecodeError;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error {code}: {message}")]
    Api { code: u16, message: String },

    #[error("Request validation failed: {detail}")]
    Validation { detail: Value },

    #[error("Get-method '{method}' exited with code {exit_code}")]
    GetMethodFailed { method: String, exit_code: i32 },

    #[error("Failed to decode response: {0}")]
    Decode(#[from] DecodeError),

    #[error("Invalid response body: {0}")]
    InvalidResponse(#[from] serde_json::Error),

    #[error(transparent)]
    Address(#[from] AddressError),

    #[error("Invalid endpoint '{url}': {reason}")]
    InvalidEndpoint { url: String, reason: String },

    #[error("QPS must be a positive number, got {0}")]
    InvalidQps(f64),
}
