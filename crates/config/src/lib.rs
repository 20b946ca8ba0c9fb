// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

mod args;
mod error;
mod log;
mod network;

pub use args::ConfigArgs;
pub use error::ConfigError;
pub use log::{LogConfig, LogLevel};
pub use network::{Network, NetworkConfig, parse_api_keys};

use serde::Deserialize;
use std::path::Path;

const ENV_PREFIX: &str = "TONCENTER_";

/// Flat view of the `TONCENTER_*` environment variables.
#[derive(Debug, Deserialize)]
struct EnvConfig {
    #[serde(default = "default_network")]
    network: String,
    #[serde(default)]
    api_key: Option<String>,
    #[serde(default)]
    endpoint: Option<String>,
    #[serde(default)]
    qps: Option<f64>,
    #[serde(default = "network::default_timeout_secs")]
    timeout_secs: u64,
    #[serde(default)]
    log_level: Option<String>,
    #[serde(default)]
    log_json: bool,
    #[serde(default)]
    log_strip_ansi: bool,
}

fn default_network() -> String {
    Network::default().to_string()
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToncenterConfig {
    pub network: NetworkConfig,
    pub log: LogConfig,
}

impl TryFrom<EnvConfig> for ToncenterConfig {
    type Error = ConfigError;

    fn try_from(env: EnvConfig) -> Result<Self, Self::Error> {
        Ok(Self {
            network: NetworkConfig {
                network: env.network.parse()?,
                api_keys: env.api_key.as_deref().map(parse_api_keys).unwrap_or_default(),
                endpoint: env.endpoint.filter(|endpoint| !endpoint.is_empty()),
                qps: env.qps,
                timeout_secs: env.timeout_secs,
            },
            log: LogConfig {
                level: match env.log_level.as_deref() {
                    Some(level) => level.parse()?,
                    None => LogLevel::default(),
                },
                json: env.log_json,
                strip_ansi: env.log_strip_ansi,
            },
        })
    }
}

impl ToncenterConfig {
    /// Load and validate configuration from `TONCENTER_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = Self::load_env()?;
        config.validate()?;
        Ok(config)
    }

    /// Load variables from `path` into the environment, then read them.
    ///
    /// Variables already set in the process environment win over the file.
    pub fn from_env_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        load_env_file(path.as_ref())?;
        Self::from_env()
    }

    /// Env file (when present), then environment, then command line flags.
    pub fn load(args: &ConfigArgs) -> Result<Self, ConfigError> {
        let env_file = Path::new(&args.env_file);
        if env_file.exists() {
            load_env_file(env_file)?;
        }

        let mut config = Self::load_env()?;
        args.apply(&mut config)?;
        config.validate()?;
        Ok(config)
    }

    fn load_env() -> Result<Self, ConfigError> {
        envy::prefixed(ENV_PREFIX)
            .from_env::<EnvConfig>()?
            .try_into()
    }

    fn validate(&self) -> Result<(), ConfigError> {
        self.network.validate()
    }
}

fn load_env_file(path: &Path) -> Result<(), ConfigError> {
    dotenv::from_path(path).map_err(|source| ConfigError::EnvFileError {
        path: path.display().to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;

    const VARS: [&str; 8] = [
        "TONCENTER_NETWORK",
        "TONCENTER_API_KEY",
        "TONCENTER_ENDPOINT",
        "TONCENTER_QPS",
        "TONCENTER_TIMEOUT_SECS",
        "TONCENTER_LOG_LEVEL",
        "TONCENTER_LOG_JSON",
        "TONCENTER_LOG_STRIP_ANSI",
    ];

    fn clear_env() {
        for var in VARS {
            // SAFETY: tests touching the environment are serialized.
            unsafe { std::env::remove_var(var) };
        }
    }

    fn set_env(key: &str, value: &str) {
        // SAFETY: tests touching the environment are serialized.
        unsafe { std::env::set_var(key, value) };
    }

    #[test]
    fn test_default_config() {
        let config = ToncenterConfig::default();
        assert_eq!(config.network.network, Network::Testnet);
        assert_eq!(config.log.level, LogLevel::Warn);
    }

    #[test]
    #[serial]
    fn test_from_env_defaults() {
        clear_env();
        let config = ToncenterConfig::from_env().unwrap();
        assert_eq!(config, ToncenterConfig::default());
    }

    #[test]
    #[serial]
    fn test_from_env_values() {
        clear_env();
        set_env("TONCENTER_NETWORK", "mainnet");
        set_env("TONCENTER_API_KEY", "k1,k2,k3");
        set_env("TONCENTER_TIMEOUT_SECS", "5");
        set_env("TONCENTER_LOG_LEVEL", "debug");
        set_env("TONCENTER_LOG_JSON", "true");

        let config = ToncenterConfig::from_env().unwrap();
        clear_env();

        assert_eq!(config.network.network, Network::Mainnet);
        assert_eq!(config.network.api_keys.len(), 3);
        assert_eq!(config.network.effective_qps(), 28.5);
        assert_eq!(config.network.timeout_secs, 5);
        assert_eq!(config.log.level, LogLevel::Debug);
        assert!(config.log.json);
    }

    #[test]
    #[serial]
    fn test_from_env_empty_key_means_no_key() {
        clear_env();
        set_env("TONCENTER_API_KEY", "");
        let config = ToncenterConfig::from_env().unwrap();
        clear_env();

        assert!(config.network.api_keys.is_empty());
        assert_eq!(config.network.effective_qps(), 1.0);
    }

    #[test]
    #[serial]
    fn test_from_env_rejects_invalid_values() {
        clear_env();
        set_env("TONCENTER_NETWORK", "devnet");
        assert!(ToncenterConfig::from_env().is_err());

        clear_env();
        set_env("TONCENTER_QPS", "0");
        assert!(ToncenterConfig::from_env().is_err());

        clear_env();
        set_env("TONCENTER_LOG_LEVEL", "verbose");
        assert!(matches!(
            ToncenterConfig::from_env(),
            Err(ConfigError::ValidateError(_))
        ));

        clear_env();
        set_env("TONCENTER_QPS", "fast");
        assert!(matches!(
            ToncenterConfig::from_env(),
            Err(ConfigError::EnvError(_))
        ));
        clear_env();
    }

    #[test]
    #[serial]
    fn test_from_env_file() {
        clear_env();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "TONCENTER_NETWORK=mainnet").unwrap();
        writeln!(file, "TONCENTER_ENDPOINT=http://localhost:8081/api/v3").unwrap();

        let config = ToncenterConfig::from_env_file(file.path()).unwrap();
        clear_env();

        assert_eq!(config.network.network, Network::Mainnet);
        assert_eq!(config.network.base_url(), "http://localhost:8081/api/v3");
    }

    #[test]
    #[serial]
    fn test_load_flags_win_over_env() {
        clear_env();
        set_env("TONCENTER_NETWORK", "mainnet");
        let args = ConfigArgs {
            env_file: "does-not-exist.env".to_string(),
            network: Some("testnet".to_string()),
            log_level: Some("http".to_string()),
            ..Default::default()
        };

        let config = ToncenterConfig::load(&args).unwrap();
        clear_env();
        assert_eq!(config.network.network, Network::Testnet);
        assert_eq!(config.log.level, LogLevel::Http);
    }

    #[test]
    fn test_missing_env_file_is_an_error() {
        assert!(matches!(
            ToncenterConfig::from_env_file("does-not-exist.env"),
            Err(ConfigError::EnvFileError { .. })
        ));
    }
}
