// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::{ConfigError, ToncenterConfig, network::parse_api_keys};

/// Command line options that feed into [`ToncenterConfig`].
///
/// Flags take precedence over environment variables and the env file.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct ConfigArgs {
    /// Path to .env file (e.g., .env.mainnet)
    #[arg(short, long, default_value = ".env", global = true)]
    pub env_file: String,

    /// Network to use: mainnet or testnet
    #[arg(long, global = true)]
    pub network: Option<String>,

    /// API key, or several separated by commas
    #[arg(long, global = true)]
    pub api_key: Option<String>,

    /// Custom API base URL
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    /// Maximum requests per second
    #[arg(long, global = true)]
    pub qps: Option<f64>,

    /// Log level: trace, debug, http, info, warn or error
    #[arg(long, global = true)]
    pub log_level: Option<String>,
}

impl ConfigArgs {
    pub(crate) fn apply(&self, config: &mut ToncenterConfig) -> Result<(), ConfigError> {
        if let Some(network) = &self.network {
            config.network.network = network.parse()?;
        }
        if let Some(api_key) = &self.api_key {
            config.network.api_keys = parse_api_keys(api_key);
        }
        if let Some(endpoint) = &self.endpoint {
            config.network.endpoint = Some(endpoint.clone());
        }
        if let Some(qps) = self.qps {
            config.network.qps = Some(qps);
        }
        if let Some(level) = &self.log_level {
            config.log.level = level.parse()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Network;

    #[test]
    fn test_apply_overrides() {
        let mut config = ToncenterConfig::default();
        let args = ConfigArgs {
            network: Some("mainnet".to_string()),
            api_key: Some("k1,k2".to_string()),
            qps: Some(2.5),
            ..Default::default()
        };

        args.apply(&mut config).unwrap();
        assert_eq!(config.network.network, Network::Mainnet);
        assert_eq!(config.network.api_keys, vec!["k1", "k2"]);
        assert_eq!(config.network.qps, Some(2.5));
        assert_eq!(config.network.endpoint, None);
    }

    #[test]
    fn test_apply_empty_key_clears_keys() {
        let mut config = ToncenterConfig::default();
        config.network.api_keys = vec!["from-env".to_string()];

        let args = ConfigArgs {
            api_key: Some(String::new()),
            ..Default::default()
        };
        args.apply(&mut config).unwrap();
        assert!(config.network.api_keys.is_empty());
    }

    #[test]
    fn test_apply_invalid_network() {
        let mut config = ToncenterConfig::default();
        let args = ConfigArgs {
            network: Some("devnet".to_string()),
            ..Default::default()
        };
        assert!(args.apply(&mut config).is_err());
    }
}
