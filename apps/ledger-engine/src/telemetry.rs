//! Logging Setup
//!
//! Installs a `tracing-subscriber` fmt subscriber driven by
//! [`LoggingConfig`]. `RUST_LOG` wins over the configured level.
//!
//! # Usage
//!
//! ```rust,ignore
//! use ledger_engine::config::load_config;
//! use ledger_engine::telemetry::init_logging;
//!
//! let config = load_config(None)?;
//! init_logging(&config.observability.logging);
//! ```

use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

/// Build the filter: `RUST_LOG` if set and valid, else the configured
/// level, else `info`.
fn build_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber.
///
/// Returns `false` when a global subscriber is already installed; the
/// existing one is kept.
pub fn init_logging(config: &LoggingConfig) -> bool {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(build_filter(config))
        .with_target(true);

    let installed = match config.format.as_str() {
        "json" => builder
            .json()
            .with_current_span(config.include_spans)
            .with_span_list(false)
            .try_init(),
        "pretty" => builder.pretty().try_init(),
        _ => builder.with_ansi(false).try_init(),
    };

    match installed {
        Ok(()) => {
            tracing::debug!(
                level = %config.level,
                format = %config.format,
                "logging initialized"
            );
            true
        }
        Err(_) => false,
    }
}
