// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Thin HTTP client for the TON Center v3 indexer.

mod error;
mod keys;
mod rate_limit;
mod types;

pub use error::ClientError;
pub use keys::KeyRotator;
pub use rate_limit::RateLimiter;
pub use types::{RunGetMethodResponse, StackParam};

use crate::address::{Address, AddressForms};
use crate::decoder::{JettonData, JettonWalletData, NftItemData, StackEntry};
use crate::utils::run_ordered;
use reqwest::StatusCode;
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use toncenter_config::{Network, NetworkConfig};
use types::RunGetMethodRequest;
use url::Url;

const API_KEY_HEADER: &str = "X-API-KEY";

/// Builder for [`ToncenterClient`].
///
/// Endpoint and rate defaults follow [`NetworkConfig`].
#[derive(Debug, Clone)]
pub struct ClientBuilder {
    config: NetworkConfig,
    timeout: Option<Duration>,
}

impl ClientBuilder {
    pub fn new(network: Network) -> Self {
        Self {
            config: NetworkConfig {
                network,
                ..Default::default()
            },
            timeout: None,
        }
    }

    /// Custom API base URL, overriding the network's public endpoint.
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.config.endpoint = Some(endpoint.into());
        self
    }

    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.config.api_keys.push(key.into());
        self
    }

    pub fn api_keys(mut self, keys: Vec<String>) -> Self {
        self.config.api_keys = keys;
        self
    }

    pub fn qps(mut self, qps: f64) -> Self {
        self.config.qps = Some(qps);
        self
    }

    /// Per-request timeout. Defaults to the configured `timeout_secs`.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn build(self) -> Result<ToncenterClient, ClientError> {
        let mut config = self.config;
        config.api_keys.retain(|key| !key.is_empty());
        let base_url = parse_base_url(config.base_url())?;

        let interval = config
            .request_interval()
            .ok_or(ClientError::InvalidQps(config.effective_qps()))?;

        let keys = KeyRotator::new(config.api_keys);
        if keys.is_empty() {
            tracing::warn!(
                "No API key provided, TON Center limits anonymous use to 1 request per second. \
                 Set TONCENTER_API_KEY to raise the limit"
            );
        }

        let http = reqwest::Client::builder()
            .timeout(
                self.timeout
                    .unwrap_or(Duration::from_secs(config.timeout_secs)),
            )
            .build()?;

        tracing::debug!(base_url = %base_url, ?interval, keys = keys.len(), "Client configured");

        Ok(ToncenterClient {
            http,
            base_url,
            keys: Arc::new(keys),
            limiter: Arc::new(RateLimiter::new(interval)),
        })
    }
}

/// Rate-limited client for the indexer API. Cheap to clone; clones share the
/// rate limiter and key rotation.
#[derive(Debug, Clone)]
pub struct ToncenterClient {
    http: reqwest::Client,
    base_url: Url,
    keys: Arc<KeyRotator>,
    limiter: Arc<RateLimiter>,
}

impl ToncenterClient {
    pub fn builder(network: Network) -> ClientBuilder {
        ClientBuilder::new(network)
    }

    pub fn from_config(config: &NetworkConfig) -> Result<Self, ClientError> {
        ClientBuilder {
            config: config.clone(),
            timeout: None,
        }
        .build()
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Minimum spacing between two requests.
    pub fn request_interval(&self) -> Duration {
        self.limiter.interval()
    }

    // ================================================================================================
    // Get-methods
    // ================================================================================================

    /// Run a get-method on `address` and return the raw result stack.
    pub async fn run_get_method(
        &self,
        address: &Address,
        method: &str,
        stack: &[StackParam],
    ) -> Result<RunGetMethodResponse, ClientError> {
        tracing::debug!(address = %address, method, "Running get-method");
        let request = RunGetMethodRequest {
            address: address.to_raw(),
            method,
            stack,
        };
        self.post("runGetMethod", &request).await
    }

    pub async fn get_jetton_data(&self, address: &Address) -> Result<JettonData, ClientError> {
        let stack = self.run_without_args(address, "get_jetton_data").await?;
        Ok(JettonData::from_stack(&stack)?)
    }

    pub async fn get_jetton_wallet_data(
        &self,
        address: &Address,
    ) -> Result<JettonWalletData, ClientError> {
        let stack = self.run_without_args(address, "get_wallet_data").await?;
        Ok(JettonWalletData::from_stack(&stack)?)
    }

    pub async fn get_nft_item_data(&self, address: &Address) -> Result<NftItemData, ClientError> {
        let stack = self.run_without_args(address, "get_nft_data").await?;
        Ok(NftItemData::from_stack(&stack)?)
    }

    async fn run_without_args(
        &self,
        address: &Address,
        method: &str,
    ) -> Result<Vec<StackEntry>, ClientError> {
        let response = self.run_get_method(address, method, &[]).await?;
        if !response.is_success() {
            return Err(ClientError::GetMethodFailed {
                method: method.to_string(),
                exit_code: response.exit_code,
            });
        }
        Ok(response.stack)
    }

    // ================================================================================================
    // Local helpers
    // ================================================================================================

    /// All textual forms of `address`. Computed locally, no request is made.
    pub fn detect_address(&self, address: &str) -> Result<AddressForms, ClientError> {
        Ok(Address::parse(address)?.forms())
    }

    /// Run independent calls with at most `max_concurrency` in flight.
    ///
    /// Results come back in input order and one failure does not cancel the others.
    pub async fn multicall<F, T, E>(
        &self,
        calls: impl IntoIterator<Item = F>,
        max_concurrency: usize,
    ) -> Vec<Result<T, E>>
    where
        F: Future<Output = Result<T, E>>,
    {
        run_ordered(max_concurrency, calls).await
    }

    // ================================================================================================
    // Transport
    // ================================================================================================

    async fn post<B, T>(&self, handler: &str, body: &B) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self
            .base_url
            .join(handler)
            .map_err(|e| ClientError::InvalidEndpoint {
                url: self.base_url.to_string(),
                reason: e.to_string(),
            })?;

        self.limiter.acquire().await;

        let mut request = self.http.post(url.clone()).json(body);
        if let Some(key) = self.keys.next_key() {
            request = request.header(API_KEY_HEADER, key);
        }

        tracing::debug!(url = %url, "POST");
        let response = request.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;
        tracing::debug!(url = %url, status = status.as_u16(), "Response received");

        if !status.is_success() {
            return Err(error_from_response(status, &bytes));
        }

        Ok(serde_json::from_slice(&bytes)?)
    }
}

/// Parse the base URL and make sure relative joins keep its last path segment.
fn parse_base_url(raw: &str) -> Result<Url, ClientError> {
    let invalid = |reason: String| ClientError::InvalidEndpoint {
        url: raw.to_string(),
        reason,
    };

    let mut url = Url::parse(raw).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

fn error_from_response(status: StatusCode, body: &[u8]) -> ClientError {
    let parsed: Option<Value> = serde_json::from_slice(body).ok();

    if status == StatusCode::UNPROCESSABLE_ENTITY {
        let detail = parsed
            .as_ref()
            .and_then(|json| json.get("detail"))
            .cloned()
            .unwrap_or(Value::Null);
        return ClientError::Validation { detail };
    }

    let message = parsed
        .as_ref()
        .and_then(|json| json.get("error"))
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| String::from_utf8_lossy(body).into_owned());

    ClientError::Api {
        code: status.as_u16(),
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_base_url_appends_slash() {
        let url = parse_base_url("https://toncenter.com/api/v3").unwrap();
        assert_eq!(
            url.join("runGetMethod").unwrap().as_str(),
            "https://toncenter.com/api/v3/runGetMethod"
        );

        let url = parse_base_url("http://localhost:8081/api/v3/").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8081/api/v3/");
    }

    #[test]
    fn test_parse_base_url_rejects_bad_input() {
        assert!(matches!(
            parse_base_url("not a url"),
            Err(ClientError::InvalidEndpoint { .. })
        ));
        assert!(matches!(
            parse_base_url("ftp://toncenter.com"),
            Err(ClientError::InvalidEndpoint { .. })
        ));
    }

    #[test]
    fn test_default_qps() {
        let anonymous = ToncenterClient::builder(Network::Testnet).build().unwrap();
        assert_eq!(anonymous.request_interval(), Duration::from_secs(1));

        let two_keys = ToncenterClient::builder(Network::Mainnet)
            .api_keys(vec!["a".to_string(), "b".to_string()])
            .build()
            .unwrap();
        assert_eq!(
            two_keys.request_interval(),
            Duration::from_secs_f64(1.0 / 19.0)
        );
        assert_eq!(
            two_keys.base_url().as_str(),
            "https://toncenter.com/api/v3/"
        );
    }

    #[test]
    fn test_invalid_qps_rejected() {
        for qps in [0.0, -2.0, f64::INFINITY] {
            assert!(matches!(
                ToncenterClient::builder(Network::Testnet).qps(qps).build(),
                Err(ClientError::InvalidQps(_))
            ));
        }
    }

    #[test]
    fn test_qps_with_unrepresentable_interval_rejected() {
        assert!(matches!(
            ToncenterClient::builder(Network::Testnet).qps(1e-20).build(),
            Err(ClientError::InvalidQps(qps)) if qps == 1e-20
        ));

        let config = NetworkConfig {
            qps: Some(1e-20),
            ..Default::default()
        };
        assert!(matches!(
            ToncenterClient::from_config(&config),
            Err(ClientError::InvalidQps(_))
        ));
    }

    #[test]
    fn test_from_config_uses_config_rate_and_endpoint() {
        let config = NetworkConfig {
            network: Network::Mainnet,
            api_keys: vec!["a".to_string()],
            endpoint: Some("http://localhost:8081/api/v3".to_string()),
            ..Default::default()
        };
        let client = ToncenterClient::from_config(&config).unwrap();

        assert_eq!(client.base_url().as_str(), "http://localhost:8081/api/v3/");
        assert_eq!(Some(client.request_interval()), config.request_interval());
    }

    #[test]
    fn test_error_from_response() {
        let err = error_from_response(
            StatusCode::UNPROCESSABLE_ENTITY,
            br#"{"detail": [{"msg": "field required"}]}"#,
        );
        assert!(matches!(err, ClientError::Validation { detail } if detail.is_array()));

        let err = error_from_response(StatusCode::TOO_MANY_REQUESTS, br#"{"error": "Ratelimit exceed"}"#);
        assert!(matches!(
            err,
            ClientError::Api { code: 429, ref message } if message == "Ratelimit exceed"
        ));

        let err = error_from_response(StatusCode::BAD_GATEWAY, b"upstream down");
        assert!(matches!(
            err,
            ClientError::Api { code: 502, ref message } if message == "upstream down"
        ));
    }

    #[test]
    fn test_detect_address_is_local() {
        let client = ToncenterClient::builder(Network::Testnet).build().unwrap();
        let forms = client
            .detect_address("0:bccc51ccf0b08ca7d5ecfbec3783dc267fb470b83809710b55fa81d94520aa41")
            .unwrap();
        assert_eq!(
            forms.bounceable.b64url,
            "EQC8zFHM8LCMp9Xs--w3g9wmf7RwuDgJcQtV-oHZRSCqQZ__"
        );
        assert!(client.detect_address("garbage").is_err());
    }
}
