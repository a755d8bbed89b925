//! Configuration module for the ledger engine.
//!
//! Loads YAML configuration with environment variable interpolation and
//! validates it. Every section has defaults, so an empty document is a
//! valid configuration.
//!
//! # Usage
//!
//! ```rust,ignore
//! use ledger_engine::config::load_config;
//!
//! // Load from default path (config.yaml)
//! let config = load_config(None)?;
//!
//! // Load from custom path
//! let config = load_config(Some("custom/config.yaml"))?;
//!
//! println!("account currency: {}", config.risk_calculator.account_currency);
//! ```

mod observability;
mod risk_calculator;

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::domain::journal::AccountSettings;

pub use observability::{LOG_FORMATS, LoggingConfig, ObservabilityConfig};
pub use risk_calculator::RiskCalculatorConfig;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        /// Path to the config file.
        path: String,
        /// The underlying IO error.
        source: std::io::Error,
    },

    /// Failed to parse YAML configuration.
    #[error("Failed to parse config YAML: {0}")]
    ParseError(#[from] serde_yaml_bw::Error),

    /// Configuration validation failed.
    #[error("Config validation failed: {0}")]
    ValidationError(String),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Account settings used when a snapshot carries none.
    #[serde(default)]
    pub account: Option<AccountSettings>,
    /// Risk calculator defaults.
    #[serde(default)]
    pub risk_calculator: RiskCalculatorConfig,
    /// Observability configuration.
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

// ============================================
// Configuration Loading
// ============================================

/// Load configuration from a YAML file with environment variable interpolation.
///
/// # Arguments
///
/// * `path` - Optional path to the config file. Defaults to "config.yaml".
///
/// # Errors
///
/// Returns a `ConfigError` if the file cannot be read, parsed, or validated.
pub fn load_config(path: Option<&str>) -> Result<EngineConfig, ConfigError> {
    let path = path.unwrap_or("config.yaml");

    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_string(),
        source: e,
    })?;

    load_config_from_string(&contents)
}

/// Load configuration from a YAML string (useful for testing).
///
/// # Errors
///
/// Returns a `ConfigError` if the YAML cannot be parsed or validated.
pub fn load_config_from_string(yaml: &str) -> Result<EngineConfig, ConfigError> {
    let interpolated = interpolate_env_vars(yaml);
    if interpolated.trim().is_empty() {
        return Ok(EngineConfig::default());
    }
    let config: EngineConfig = serde_yaml_bw::from_str(&interpolated)?;
    validate_config(&config)?;
    Ok(config)
}

fn env_var_regex() -> Option<&'static Regex> {
    static ENV_VAR_REGEX: OnceLock<Option<Regex>> = OnceLock::new();
    ENV_VAR_REGEX
        .get_or_init(|| Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)(?::-([^}]*))?\}").ok())
        .as_ref()
}

/// Interpolate environment variables in a string.
///
/// Supports both `${VAR}` and `${VAR:-default}` syntax. Unset or empty
/// variables without a default become empty strings.
fn interpolate_env_vars(input: &str) -> String {
    let Some(re) = env_var_regex() else {
        return input.to_string();
    };

    re.replace_all(input, |cap: &regex::Captures<'_>| {
        let var_name = cap.get(1).map_or("", |m| m.as_str());
        let default_value = cap.get(2).map(|m| m.as_str());
        match std::env::var(var_name) {
            Ok(v) if !v.is_empty() => v,
            _ => {
                if default_value.is_none() {
                    warn!(var = var_name, "config references unset environment variable");
                }
                default_value.map_or_else(String::new, str::to_string)
            }
        }
    })
    .into_owned()
}

/// Validate configuration values.
fn validate_config(config: &EngineConfig) -> Result<(), ConfigError> {
    if let Some(account) = &config.account {
        account
            .validate()
            .map_err(|e| ConfigError::ValidationError(format!("account: {e}")))?;
    }

    let calc = &config.risk_calculator;
    let currency = calc.account_currency.trim();
    if currency.len() != 3 || !currency.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(ConfigError::ValidationError(
            "risk_calculator.account_currency must be a three-letter code".to_string(),
        ));
    }

    if !calc.default_risk_percent.is_finite()
        || calc.default_risk_percent <= 0.0
        || calc.default_risk_percent > 100.0
    {
        return Err(ConfigError::ValidationError(
            "risk_calculator.default_risk_percent must be in (0, 100]".to_string(),
        ));
    }

    if let Some(size) = calc.metal_contract_size
        && (!size.is_finite() || size <= 0.0)
    {
        return Err(ConfigError::ValidationError(
            "risk_calculator.metal_contract_size must be positive".to_string(),
        ));
    }

    let format = config.observability.logging.format.as_str();
    if !LOG_FORMATS.contains(&format) {
        return Err(ConfigError::ValidationError(format!(
            "observability.logging.format must be one of: {LOG_FORMATS:?}"
        )));
    }

    Ok(())
}
