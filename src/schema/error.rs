//! Error types for schema validation.

use thiserror::Error;

/// Error type for request and response validation.
///
/// Every variant names the offending field as a dotted path
/// (`transaction.status`), so callers can report exactly which
/// value was rejected. The root value itself is named `$`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is absent (or `null` where `null` is not allowed).
    #[error("Missing required field '{field}'")]
    Missing {
        /// Path of the missing field
        field: String,
    },

    /// A field is present but has the wrong JSON type.
    #[error("Invalid type for '{field}': expected {expected}")]
    InvalidType {
        /// Path of the field
        field: String,
        /// Human-readable description of the accepted types
        expected: &'static str,
    },

    /// A field has the right type but violates a constraint.
    #[error("Invalid value for '{field}': {message}")]
    Constraint {
        /// Path of the field
        field: String,
        /// Description of the violated constraint
        message: String,
    },
}

impl ValidationError {
    /// Creates a `Missing` error.
    #[must_use]
    pub fn missing(field: impl Into<String>) -> Self {
        Self::Missing {
            field: field.into(),
        }
    }

    /// Creates an `InvalidType` error.
    #[must_use]
    pub fn invalid_type(field: impl Into<String>, expected: &'static str) -> Self {
        Self::InvalidType {
            field: field.into(),
            expected,
        }
    }

    /// Creates a `Constraint` error.
    #[must_use]
    pub fn constraint(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Constraint {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Returns the path of the offending field.
    #[must_use]
    pub fn field(&self) -> &str {
        match self {
            Self::Missing { field }
            | Self::InvalidType { field, .. }
            | Self::Constraint { field, .. } => field,
        }
    }

    /// Prefixes the field path with a parent field name.
    ///
    /// Used when a nested object is validated on its own and the
    /// error must point into the enclosing document.
    #[must_use]
    pub(crate) fn nested_in(self, parent: &str) -> Self {
        let join = |field: String| {
            if field == ROOT {
                parent.to_string()
            } else {
                format!("{parent}.{field}")
            }
        };
        match self {
            Self::Missing { field } => Self::Missing { field: join(field) },
            Self::InvalidType { field, expected } => Self::InvalidType {
                field: join(field),
                expected,
            },
            Self::Constraint { field, message } => Self::Constraint {
                field: join(field),
                message,
            },
        }
    }
}

/// Field path used for the root value.
pub const ROOT: &str = "$";
