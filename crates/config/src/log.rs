// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::ConfigError;
use std::fmt;
use std::str::FromStr;

/// Verbosity accepted by `TONCENTER_LOG_LEVEL`.
///
/// `Http` sits between `Info` and `Debug`: everything at `info`, plus one line per
/// request made by the indexer client.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Http,
    Info,
    #[default]
    Warn,
    Error,
}

impl LogLevel {
    const ALL: [LogLevel; 6] = [
        LogLevel::Trace,
        LogLevel::Debug,
        LogLevel::Http,
        LogLevel::Info,
        LogLevel::Warn,
        LogLevel::Error,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Http => "http",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }

    /// Directive for a `tracing_subscriber::EnvFilter`.
    pub fn filter_directive(&self) -> &'static str {
        match self {
            LogLevel::Http => "info,toncenter::client=debug",
            other => other.as_str(),
        }
    }
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                let valid: Vec<&str> = Self::ALL.iter().map(LogLevel::as_str).collect();
                ConfigError::ValidateError(format!(
                    "Invalid log level '{}'. Must be one of: {}",
                    s,
                    valid.join(", ")
                ))
            })
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LogConfig {
    /// Env: TONCENTER_LOG_LEVEL
    /// Default: warn, so command output is not drowned in diagnostics
    pub level: LogLevel,

    /// Env: TONCENTER_LOG_JSON
    pub json: bool,

    /// Env: TONCENTER_LOG_STRIP_ANSI
    pub strip_ansi: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_log_config() {
        let config = LogConfig::default();
        assert_eq!(config.level, LogLevel::Warn);
        assert!(!config.json);
        assert!(!config.strip_ansi);
    }

    #[test]
    fn test_parse_levels() {
        for level in LogLevel::ALL {
            assert_eq!(level.as_str().parse::<LogLevel>().unwrap(), level);
        }
        assert_eq!("DEBUG".parse::<LogLevel>().unwrap(), LogLevel::Debug);
        assert!(matches!(
            "verbose".parse::<LogLevel>(),
            Err(ConfigError::ValidateError(_))
        ));
    }

    #[test]
    fn test_filter_directive() {
        assert_eq!(LogLevel::Http.filter_directive(), "info,toncenter::client=debug");
        assert_eq!(LogLevel::Warn.filter_directive(), "warn");
    }
}
