//! Deployment environments and the gateway URLs they resolve to.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;
use url::Url;

/// Gateway deployment a client talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Environment {
    /// Live gateway; moves real money.
    Production,
    /// Beta gateway used for integration testing.
    #[default]
    Development,
}

impl Environment {
    /// Returns the canonical lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Production => "production",
            Self::Development => "development",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when an environment name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown environment '{0}': expected 'production' or 'development'")]
pub struct ParseEnvironmentError(String);

impl FromStr for Environment {
    type Err = ParseEnvironmentError;

    /// Parses `prod`/`production` and `dev`/`development`/`beta`,
    /// ignoring case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Ok(Self::Production),
            "dev" | "development" | "beta" => Ok(Self::Development),
            _ => Err(ParseEnvironmentError(s.to_string())),
        }
    }
}

/// Base URLs for every gateway operation.
///
/// Mobile, payout and status-check calls share the API base; card payments
/// go to a separate host. URLs are resolved per call so a custom base that
/// fails to parse surfaces as an error on the operation, not a panic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    api_base: String,
    card_payment: String,
}

impl Endpoints {
    /// Production API base.
    pub const PRODUCTION_API: &'static str = "https://backend.flexpay.cd/api/rest/v1";
    /// Production card-payment endpoint.
    pub const PRODUCTION_CARD: &'static str = "https://cardpayment.flexpay.cd/v1.1/pay";
    /// Development API base.
    pub const DEVELOPMENT_API: &'static str = "https://beta-backend.flexpay.cd/api/rest/v1";
    /// Development card-payment endpoint.
    pub const DEVELOPMENT_CARD: &'static str = "https://beta-cardpayment.flexpay.cd/v1.1/pay";

    /// Returns the fixed endpoints of `environment`.
    #[must_use]
    pub fn for_environment(environment: Environment) -> Self {
        match environment {
            Environment::Production => Self::custom(Self::PRODUCTION_API, Self::PRODUCTION_CARD),
            Environment::Development => {
                Self::custom(Self::DEVELOPMENT_API, Self::DEVELOPMENT_CARD)
            }
        }
    }

    /// Uses caller-supplied URLs, e.g. a sandbox or an egress proxy.
    #[must_use]
    pub fn custom(api_base: impl Into<String>, card_payment: impl Into<String>) -> Self {
        Self {
            api_base: api_base.into(),
            card_payment: card_payment.into(),
        }
    }

    /// Returns the API base URL as configured.
    #[must_use]
    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    /// Returns the card-payment URL as configured.
    #[must_use]
    pub fn card_payment(&self) -> &str {
        &self.card_payment
    }

    /// URL of the mobile-money charge operation.
    ///
    /// # Errors
    ///
    /// Returns the parse error if the API base is not an absolute URL.
    pub fn mobile_payment_url(&self) -> Result<Url, url::ParseError> {
        self.api_url(&["paymentService"])
    }

    /// URL of the payout operation.
    ///
    /// # Errors
    ///
    /// Returns the parse error if the API base is not an absolute URL.
    pub fn payout_url(&self) -> Result<Url, url::ParseError> {
        self.api_url(&["merchantPayOutService"])
    }

    /// URL of the card charge operation.
    ///
    /// # Errors
    ///
    /// Returns the parse error if the card-payment URL is invalid.
    pub fn card_payment_url(&self) -> Result<Url, url::ParseError> {
        Url::parse(&self.card_payment)
    }

    /// URL of the status check for `order_number`.
    ///
    /// The order number is percent-encoded as a single path segment, so
    /// characters such as `/` or `?` cannot escape it.
    ///
    /// # Errors
    ///
    /// Returns the parse error if the API base is not an absolute URL.
    pub fn check_status_url(&self, order_number: &str) -> Result<Url, url::ParseError> {
        self.api_url(&["check", order_number])
    }

    fn api_url(&self, segments: &[&str]) -> Result<Url, url::ParseError> {
        let mut url = Url::parse(&self.api_base)?;
        url.path_segments_mut()
            .map_err(|()| url::ParseError::RelativeUrlWithCannotBeABaseBase)?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Self::for_environment(Environment::default())
    }
}

#[cfg(test)]
#[path = "environment_tests.rs"]
mod tests;
