//! Crate-level error type returned by gateway operations.

use thiserror::Error;

use crate::config::ConfigError;
use crate::schema::ValidationError;
use crate::transport::{ApiError, ApiErrorKind};

/// Error returned by [`Client`](crate::Client) operations.
///
/// Validation failures never reach the network. [`Error::Api`] is only
/// returned after the retry policy has given up, or immediately for
/// failures that are never retried.
#[derive(Debug, Error)]
pub enum Error {
    /// A request was rejected locally, or a gateway payload did not match
    /// the expected response shape.
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// The gateway call failed.
    #[error("Gateway request failed: {0}")]
    Api(#[from] ApiError),

    /// A payload passed to [`Client::pay`](crate::Client::pay) is neither a
    /// mobile nor a card request.
    #[error("Unsupported request shape: expected a 'phone' (mobile) or 'homeUrl' (card) field")]
    UnsupportedRequestShape,

    /// A validated request could not be serialized to JSON.
    #[error("Failed to encode request body: {0}")]
    Encode(#[from] serde_json::Error),

    /// An endpoint URL could not be built.
    #[error("Invalid endpoint URL '{url}': {source}")]
    InvalidEndpoint {
        /// The configured base URL
        url: String,
        /// Parse failure
        #[source]
        source: url::ParseError,
    },

    /// Configuration could not be loaded or validated.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl Error {
    /// Returns the gateway failure category for [`Error::Api`].
    #[must_use]
    pub const fn api_kind(&self) -> Option<ApiErrorKind> {
        match self {
            Self::Api(error) => Some(error.kind()),
            _ => None,
        }
    }

    /// Returns true for local validation failures.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

/// Convenience alias for results of gateway operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;
