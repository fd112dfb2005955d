//! Failures while loading or validating client configuration.

use std::path::PathBuf;

use thiserror::Error;

use crate::schema::ValidationError;

/// Why a [`ClientConfig`](super::ClientConfig) could not be produced.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{}': {source}", path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse TOML config: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// A value with no default was set nowhere.
    #[error("Missing required field: {field}. {hint}")]
    MissingRequired {
        /// One of the names in [`field`].
        field: &'static str,
        /// Where the value can be supplied.
        hint: &'static str,
    },

    /// An endpoint override is not an absolute, path-capable URL.
    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Invalid duration for {field}: {reason}")]
    InvalidDuration {
        field: &'static str,
        reason: String,
    },

    #[error("Invalid retry configuration: {0}")]
    InvalidRetry(String),

    #[error("Invalid environment '{value}': expected production (prod) or development (dev, beta)")]
    InvalidEnvironment { value: String },

    /// Merchant or token was present but blank.
    #[error("Invalid credential: {0}")]
    InvalidCredential(#[source] ValidationError),
}

/// Names reported by [`ConfigError::MissingRequired`].
pub mod field {
    pub const MERCHANT: &str = "merchant";
    pub const TOKEN: &str = "token";
}

impl ConfigError {
    #[must_use]
    pub const fn missing(field: &'static str, hint: &'static str) -> Self {
        Self::MissingRequired { field, hint }
    }
}
