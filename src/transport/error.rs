//! Error types for HTTP operations and gateway failures.

use std::fmt;

use thiserror::Error;

/// Error type for transport-level HTTP failures.
///
/// Describes what went wrong before any HTTP status was received.
/// Whether to retry is decided by [`IsRetryable`](super::IsRetryable).
#[derive(Debug, Error)]
pub enum HttpError {
    /// Network connection failed.
    ///
    /// This includes DNS resolution failures, connection refused,
    /// and other network-level errors.
    #[error("Connection error: {0}")]
    Connection(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Request timed out.
    ///
    /// The server did not respond within the configured timeout period.
    #[error("Request timed out")]
    Timeout,

    /// The provided URL is invalid.
    ///
    /// This typically indicates a configuration error rather than
    /// a transient failure.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

/// Category of a gateway failure, derived from the HTTP status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiErrorKind {
    /// Credential or rate-limit problem (HTTP 401, 429).
    Account,
    /// Malformed request (other HTTP 4xx).
    Client,
    /// Remote fault (HTTP 5xx).
    Server,
    /// Transport failure, or a status outside the ranges above.
    Network,
}

impl fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Account => "account",
            Self::Client => "client",
            Self::Server => "server",
            Self::Network => "network",
        };
        f.write_str(name)
    }
}

/// A failed call to the gateway.
///
/// Built either from an HTTP error response with
/// [`ApiError::from_response`], or from a transport failure with
/// [`ApiError::network`]. Callers match on [`ApiError::kind`].
///
/// The displayed message embeds the status and error type when the
/// failure came from an HTTP response:
/// `Unauthorized access (HTTP 401/unauthorized)`.
#[derive(Debug, Error)]
#[error("{}", self.display_message())]
pub struct ApiError {
    kind: ApiErrorKind,
    message: String,
    status: Option<u16>,
    error_type: Option<String>,
    #[source]
    source: Option<HttpError>,
}

impl ApiError {
    /// Placeholder used when the server sends an empty message.
    pub const NO_MESSAGE: &'static str = "No message was provided";

    /// Error type reported when the server omits one.
    pub const UNKNOWN_TYPE: &'static str = "unknown";

    /// Classifies an HTTP error response.
    ///
    /// A blank `message` is replaced by [`ApiError::NO_MESSAGE`] and a blank
    /// `error_type` by [`ApiError::UNKNOWN_TYPE`]. The kind
    /// is chosen from `status`: 401 and 429 are [`ApiErrorKind::Account`],
    /// other 4xx [`ApiErrorKind::Client`], 5xx [`ApiErrorKind::Server`],
    /// anything else [`ApiErrorKind::Network`].
    #[must_use]
    pub fn from_response(message: &str, error_type: &str, status: u16) -> Self {
        let message = if message.trim().is_empty() {
            Self::NO_MESSAGE.to_string()
        } else {
            message.to_string()
        };
        let error_type = if error_type.trim().is_empty() {
            Self::UNKNOWN_TYPE
        } else {
            error_type
        };

        let kind = match status {
            401 | 429 => ApiErrorKind::Account,
            400..=499 => ApiErrorKind::Client,
            500..=599 => ApiErrorKind::Server,
            _ => ApiErrorKind::Network,
        };

        Self {
            kind,
            message,
            status: Some(status),
            error_type: Some(error_type.to_string()),
            source: None,
        }
    }

    /// Creates a network error with no HTTP status.
    #[must_use]
    pub fn network(message: impl Into<String>) -> Self {
        Self {
            kind: ApiErrorKind::Network,
            message: message.into(),
            status: None,
            error_type: None,
            source: None,
        }
    }

    /// Returns the failure category.
    #[must_use]
    pub const fn kind(&self) -> ApiErrorKind {
        self.kind
    }

    /// Returns the server-supplied (or placeholder) message, without decoration.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the HTTP status, if the failure came from a response.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        self.status
    }

    /// Returns the server-supplied error category (the `error` field).
    #[must_use]
    pub fn error_type(&self) -> Option<&str> {
        self.error_type.as_deref()
    }

    /// Returns the transport failure this error wraps, if any.
    #[must_use]
    pub const fn transport_error(&self) -> Option<&HttpError> {
        self.source.as_ref()
    }

    fn display_message(&self) -> String {
        match self.status {
            Some(status) => format!(
                "{} (HTTP {status}/{})",
                self.message,
                self.error_type.as_deref().unwrap_or(Self::UNKNOWN_TYPE)
            ),
            None => self.message.clone(),
        }
    }
}

impl From<HttpError> for ApiError {
    fn from(error: HttpError) -> Self {
        Self {
            kind: ApiErrorKind::Network,
            message: error.to_string(),
            status: None,
            error_type: None,
            source: Some(error),
        }
    }
}
