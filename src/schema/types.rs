//! Scalar domain types shared by requests and responses.

use std::fmt;
use std::str::FromStr;

use http::HeaderValue;
use serde::{Deserialize, Serialize, Serializer};

use super::ValidationError;

/// Outcome code reported by the gateway.
///
/// The wire value is `0` or `1`, sometimes string-encoded. Anything
/// else is rejected during decoding rather than mapped to a default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    /// The request was processed successfully (`0`).
    Success,
    /// The request failed (`1`).
    Failure,
}

impl Status {
    /// Returns the numeric wire code.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Success => 0,
            Self::Failure => 1,
        }
    }

    /// Maps a numeric code to a status. Only an exact `0` or `1` matches.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn from_code(code: f64) -> Option<Self> {
        if code == 0.0 {
            Some(Self::Success)
        } else if code == 1.0 {
            Some(Self::Failure)
        } else {
            None
        }
    }

    /// Returns true for [`Status::Success`].
    #[must_use]
    pub const fn is_success(self) -> bool {
        matches!(self, Self::Success)
    }
}

impl Serialize for Status {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.code())
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => write!(f, "SUCCESS"),
            Self::Failure => write!(f, "FAILURE"),
        }
    }
}

/// Currencies accepted by the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// US dollar
    Usd,
    /// Congolese franc
    Cdf,
}

impl Currency {
    /// Returns the ISO 4217 code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Usd => "USD",
            Self::Cdf => "CDF",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Currency {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "USD" => Ok(Self::Usd),
            "CDF" => Ok(Self::Cdf),
            _ => Err(ValidationError::constraint(
                "currency",
                format!("expected 'USD' or 'CDF', got '{s}'"),
            )),
        }
    }
}

/// Transaction category sent along with mobile and payout requests.
///
/// Serialized as its numeric code. The gateway documents `1` for mobile
/// money and `2` for card transactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TransactionType {
    /// Mobile money transaction (`1`).
    #[default]
    Mobile,
    /// Card transaction (`2`).
    Card,
}

impl TransactionType {
    /// Returns the numeric wire code.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Mobile => 1,
            Self::Card => 2,
        }
    }

    /// Maps a numeric code back to a transaction type.
    #[must_use]
    pub const fn from_code(code: u64) -> Option<Self> {
        match code {
            1 => Some(Self::Mobile),
            2 => Some(Self::Card),
            _ => None,
        }
    }
}

impl Serialize for TransactionType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.code())
    }
}

/// Merchant credential used to authenticate every request.
///
/// Both parts must be non-empty. The token is kept out of `Debug`
/// output so clients can be logged safely.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    merchant: String,
    token: String,
    authorization: HeaderValue,
}

impl Credential {
    /// Creates a credential.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::Constraint`] when either part is empty,
    /// or when the token cannot be sent in an HTTP header.
    pub fn new(
        merchant: impl Into<String>,
        token: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let merchant = merchant.into();
        let token = token.into();

        if merchant.is_empty() {
            return Err(ValidationError::constraint(
                "merchant",
                "Merchant cannot be empty",
            ));
        }
        if token.is_empty() {
            return Err(ValidationError::constraint(
                "token",
                "The authorization token cannot be empty",
            ));
        }

        let mut authorization = HeaderValue::from_str(&format!("Bearer {token}")).map_err(|_| {
            ValidationError::constraint(
                "token",
                "The authorization token contains characters not allowed in an HTTP header",
            )
        })?;
        authorization.set_sensitive(true);

        Ok(Self {
            merchant,
            token,
            authorization,
        })
    }

    /// Returns the merchant code.
    #[must_use]
    pub fn merchant(&self) -> &str {
        &self.merchant
    }

    /// Returns the API token.
    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Returns the `Bearer <token>` authorization value.
    #[must_use]
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }

    /// Returns the `Authorization` header value, marked sensitive.
    #[must_use]
    pub const fn authorization(&self) -> &HeaderValue {
        &self.authorization
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("merchant", &self.merchant)
            .field("token", &"<redacted>")
            .finish()
    }
}
