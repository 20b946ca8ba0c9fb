// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use thiserror::Error;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("Invalid log filter '{directive}': {source}")]
    InvalidFilter {
        directive: String,
        #[source]
        source: tracing_subscriber::filter::ParseError,
    },

    #[error("Failed to install global subscriber: {0}")]
    AlreadyInitialized(#[from] tracing_subscriber::util::TryInitError),
}

/// Configuration for logging initialization
#[derive(Debug, Clone, Copy)]
pub struct LoggingConfig<'a> {
    /// `EnvFilter` directive, e.g. `warn` or `info,toncenter::client=debug`
    pub filter: &'a str,
    pub json_format: bool,
    pub strip_ansi: bool,
}

/// Initialize tracing/logging with the specified configuration
///
/// Logs go to stderr so that command output on stdout stays machine-readable.
///
/// # Examples
/// ```no_run
/// use toncenter::logging::{self, LoggingConfig};
///
/// logging::init_with_config(LoggingConfig {
///     filter: "debug",
///     json_format: false,
///     strip_ansi: false,
/// })?;
/// # Ok::<(), toncenter::logging::LoggingError>(())
/// ```
pub fn init_with_config(config: LoggingConfig) -> Result<(), LoggingError> {
    let filter = EnvFilter::try_new(config.filter).map_err(|source| {
        LoggingError::InvalidFilter {
            directive: config.filter.to_string(),
            source,
        }
    })?;

    let registry = tracing_subscriber::registry().with(filter);

    if config.json_format {
        let fmt_layer = fmt::layer().json().with_writer(std::io::stderr);
        registry.with(fmt_layer).try_init()?;
    } else {
        let fmt_layer = fmt::layer()
            .with_target(true)
            .with_thread_ids(false)
            .with_file(false)
            .with_line_number(false)
            .with_ansi(!config.strip_ansi)
            .with_writer(std::io::stderr);
        registry.with(fmt_layer).try_init()?;
    }

    Ok(())
}
