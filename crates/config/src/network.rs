// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::ConfigError;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Requests per second granted to each API key.
const QPS_PER_KEY: f64 = 9.5;
/// Rate of anonymous use.
const ANONYMOUS_QPS: f64 = 1.0;

/// Public TON network served by the indexer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Network {
    Mainnet,
    #[default]
    Testnet,
}

impl Network {
    /// Base URL of the v3 indexer API for this network.
    pub fn base_url(&self) -> &'static str {
        match self {
            Network::Mainnet => "https://toncenter.com/api/v3",
            Network::Testnet => "https://testnet.toncenter.com/api/v3",
        }
    }
}

impl FromStr for Network {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mainnet" => Ok(Network::Mainnet),
            "testnet" => Ok(Network::Testnet),
            other => Err(ConfigError::ValidateError(format!(
                "Invalid network '{}'. Must be mainnet or testnet",
                other
            ))),
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Network::Mainnet => f.write_str("mainnet"),
            Network::Testnet => f.write_str("testnet"),
        }
    }
}

/// Split a comma-separated key list, dropping blanks.
///
/// An empty string yields no keys.
pub fn parse_api_keys(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|key| !key.is_empty())
        .map(str::to_string)
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct NetworkConfig {
    /// Network to talk to
    ///
    /// Env: TONCENTER_NETWORK
    /// Valid values: mainnet, testnet
    /// Default: testnet
    pub network: Network,

    /// API keys, rotated round-robin when more than one is given
    ///
    /// Env: TONCENTER_API_KEY (comma separated)
    /// Default: none
    pub api_keys: Vec<String>,

    /// Custom API base URL, overrides the network's public endpoint
    ///
    /// Env: TONCENTER_ENDPOINT
    /// Valid schemes: http://, https://
    /// Default: none
    pub endpoint: Option<String>,

    /// Maximum requests per second
    ///
    /// Env: TONCENTER_QPS
    /// Default: 9.5 per API key, or 1 without a key
    pub qps: Option<f64>,

    /// Per-request timeout in seconds
    ///
    /// Env: TONCENTER_TIMEOUT_SECS
    /// Default: 30
    pub timeout_secs: u64,
}

pub(crate) fn default_timeout_secs() -> u64 {
    30
}

impl NetworkConfig {
    /// Base URL requests are sent to: the custom endpoint if set, otherwise the network's.
    pub fn base_url(&self) -> &str {
        self.endpoint
            .as_deref()
            .unwrap_or_else(|| self.network.base_url())
    }

    /// Effective request rate limit.
    pub fn effective_qps(&self) -> f64 {
        match self.qps {
            Some(qps) => qps,
            None if self.api_keys.is_empty() => ANONYMOUS_QPS,
            None => QPS_PER_KEY * self.api_keys.len() as f64,
        }
    }

    /// Minimum spacing between request starts, `None` when the rate has no
    /// representable interval (zero, negative, NaN, or so small the interval overflows).
    pub fn request_interval(&self) -> Option<Duration> {
        let qps = self.effective_qps();
        if !qps.is_finite() || qps <= 0.0 {
            return None;
        }
        Duration::try_from_secs_f64(qps.recip()).ok()
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if let Some(endpoint) = &self.endpoint {
            Self::validate_url(endpoint)?;
        }

        if self.request_interval().is_none() {
            return Err(ConfigError::ValidateError(format!(
                "QPS must be a positive rate, got {}",
                self.effective_qps()
            )));
        }

        if self.timeout_secs == 0 {
            return Err(ConfigError::ValidateError(
                "Timeout must be at least 1 second".to_string(),
            ));
        }

        Ok(())
    }

    fn validate_url(url_str: &str) -> Result<(), ConfigError> {
        if url_str.is_empty() {
            return Err(ConfigError::ValidateError(
                "Endpoint URL cannot be empty".to_string(),
            ));
        }

        let parsed = url::Url::parse(url_str)
            .map_err(|e| ConfigError::ValidateError(format!("Invalid URL '{}': {}", url_str, e)))?;

        match parsed.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(ConfigError::ValidateError(format!(
                "Invalid URL scheme '{}'. Must be http:// or https://",
                scheme
            ))),
        }
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            network: Network::default(),
            api_keys: vec![],
            endpoint: None,
            qps: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}
