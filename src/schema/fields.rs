//! Field access and coercion over loosely typed JSON documents.
//!
//! The gateway is inconsistent about field types: status codes arrive as
//! `0` or `"0"`, amounts as `10` or `"10.00"`, and optional fields are
//! either absent or `null`. [`Fields`] wraps a JSON object and exposes one
//! accessor per accepted shape, each returning a [`ValidationError`] that
//! names the field on failure.

use serde_json::{Map, Value};

use super::error::ROOT;
use super::{Currency, Status, ValidationError};

/// Read-only view over the fields of a JSON object.
#[derive(Debug, Clone, Copy)]
pub struct Fields<'a> {
    map: &'a Map<String, Value>,
}

impl<'a> Fields<'a> {
    /// Wraps a JSON value, which must be an object.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidType`] for non-object values.
    pub fn new(value: &'a Value) -> Result<Self, ValidationError> {
        value
            .as_object()
            .map(|map| Self { map })
            .ok_or_else(|| ValidationError::invalid_type(ROOT, "object"))
    }

    /// Returns the field if present and not `null`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&'a Value> {
        self.map.get(name).filter(|v| !v.is_null())
    }

    /// Returns the field, failing if it is absent or `null`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::Missing`].
    pub fn require(&self, name: &str) -> Result<&'a Value, ValidationError> {
        self.get(name).ok_or_else(|| ValidationError::missing(name))
    }

    /// Reads a required string.
    ///
    /// # Errors
    ///
    /// Fails if the field is missing or not a string.
    pub fn string(&self, name: &str) -> Result<&'a str, ValidationError> {
        self.require(name)?
            .as_str()
            .ok_or_else(|| ValidationError::invalid_type(name, "string"))
    }

    /// Reads a nullable string. Absent and `null` both yield `None`.
    ///
    /// # Errors
    ///
    /// Fails if the field is present with a non-string type.
    pub fn optional_string(&self, name: &str) -> Result<Option<&'a str>, ValidationError> {
        self.get(name)
            .map(|v| {
                v.as_str()
                    .ok_or_else(|| ValidationError::invalid_type(name, "string or null"))
            })
            .transpose()
    }

    /// Same as [`Fields::optional_string`], returning an owned value.
    ///
    /// # Errors
    ///
    /// Fails if the field is present with a non-string type.
    pub fn optional_owned(&self, name: &str) -> Result<Option<String>, ValidationError> {
        Ok(self.optional_string(name)?.map(ToString::to_string))
    }

    /// Reads a string defaulting to `""` when absent or `null`.
    ///
    /// # Errors
    ///
    /// Fails if the field is present with a non-string type.
    pub fn string_or_empty(&self, name: &str) -> Result<String, ValidationError> {
        Ok(self.optional_string(name)?.unwrap_or_default().to_string())
    }

    /// Reads a required JSON number (strings are not accepted).
    ///
    /// # Errors
    ///
    /// Fails if the field is missing, not a number, or not finite.
    pub fn number(&self, name: &str) -> Result<f64, ValidationError> {
        self.require(name)?
            .as_f64()
            .filter(|n| n.is_finite())
            .ok_or_else(|| ValidationError::invalid_type(name, "number"))
    }

    /// Reads a required number given either as a JSON number or a numeric string.
    ///
    /// # Errors
    ///
    /// Fails if the field is missing, has another type, or holds a
    /// string that does not parse as a finite number.
    pub fn lenient_number(&self, name: &str) -> Result<f64, ValidationError> {
        coerce_number(name, self.require(name)?)
    }

    /// Reads a required status code, given as a number or a numeric string.
    ///
    /// # Errors
    ///
    /// Fails if the field is missing, not numeric, or outside `{0, 1}`.
    pub fn status(&self, name: &str) -> Result<Status, ValidationError> {
        coerce_status(name, self.require(name)?)
    }

    /// Reads a required currency code.
    ///
    /// # Errors
    ///
    /// Fails if the field is missing, not a string, or not a known currency.
    pub fn currency(&self, name: &str) -> Result<Currency, ValidationError> {
        let code = self.string(name)?;
        code.parse::<Currency>().map_err(|_| {
            ValidationError::constraint(name, format!("expected 'USD' or 'CDF', got '{code}'"))
        })
    }
}

/// Coerces a number or numeric string into an `f64`.
///
/// Surrounding whitespace in strings is ignored.
///
/// # Errors
///
/// Fails for other JSON types, unparseable strings, and non-finite values.
pub fn coerce_number(field: &str, value: &Value) -> Result<f64, ValidationError> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => Some(s.trim().parse::<f64>().map_err(|_| {
            ValidationError::constraint(field, format!("'{s}' is not a valid number"))
        })?),
        _ => None,
    };

    number
        .filter(|n| n.is_finite())
        .ok_or_else(|| ValidationError::invalid_type(field, "number or numeric string"))
}

/// Coerces a number or numeric string into a [`Status`].
///
/// # Errors
///
/// Fails when the value is not numeric or is neither `0` nor `1`.
pub fn coerce_status(field: &str, value: &Value) -> Result<Status, ValidationError> {
    let code = coerce_number(field, value)?;
    Status::from_code(code)
        .ok_or_else(|| ValidationError::constraint(field, format!("Invalid status code {code}")))
}
