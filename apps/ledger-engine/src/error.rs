//! Crate-level errors.
//!
//! Computation passes never fail on bad records: they exclude them. The
//! errors here cover the edges of the engine, where a document cannot be
//! read, configuration is broken or a host store fails.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::application::ports::StoreError;
use crate::config::ConfigError;
use crate::domain::shared::DomainError;

/// Stable error codes for hosts that map errors to their own surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Input document is not valid JSON or has the wrong shape.
    MalformedDocument,
    /// Configuration could not be loaded.
    InvalidConfig,
    /// Host store failed.
    StoreFailure,
    /// A validation call failed.
    InvalidValue,
}

impl ErrorCode {
    /// Reason string.
    #[must_use]
    pub const fn reason(&self) -> &'static str {
        match self {
            Self::MalformedDocument => "MALFORMED_DOCUMENT",
            Self::InvalidConfig => "INVALID_CONFIG",
            Self::StoreFailure => "STORE_FAILURE",
            Self::InvalidValue => "INVALID_VALUE",
        }
    }
}

/// Top-level engine error.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Document is not a journal snapshot.
    #[error("Malformed journal document: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Key-value store error.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Explicit validation failed.
    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl EngineError {
    /// Error code for this error.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::Json(_) => ErrorCode::MalformedDocument,
            Self::Config(_) => ErrorCode::InvalidConfig,
            Self::Store(_) => ErrorCode::StoreFailure,
            Self::Domain(_) => ErrorCode::InvalidValue,
        }
    }
}
