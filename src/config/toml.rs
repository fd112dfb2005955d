//! Shape of the optional `flexpay.toml` file.
//!
//! Every key may be omitted; unknown sections and keys are rejected.
//!
//! ```toml
//! [credential]
//! merchant = "ZANDO"
//! token = "..."
//!
//! [client]
//! environment = "production"
//! timeout_secs = 30
//!
//! [retry]
//! max_attempts = 4
//! initial_delay_ms = 500
//! max_delay_ms = 30000
//! multiplier = 2.0
//!
//! [endpoints]
//! api_base = "https://backend.flexpay.cd/api/rest/v1"
//! card_payment = "https://cardpayment.flexpay.cd/v1.1/pay"
//! ```

use std::path::Path;

use serde::Deserialize;

use super::ConfigError;

/// The file as written, before environment overrides and defaults apply.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    /// Merchant credential
    #[serde(default)]
    pub credential: CredentialSection,

    /// Client behavior
    #[serde(default)]
    pub client: ClientSection,

    /// Retry policy configuration
    #[serde(default)]
    pub retry: RetrySection,

    /// Endpoint overrides
    #[serde(default)]
    pub endpoints: EndpointsSection,
}

/// `[credential]`: merchant identity. The token never appears in `Debug` output.
#[derive(Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CredentialSection {
    /// Merchant code
    pub merchant: Option<String>,

    /// API token sent as a bearer credential
    pub token: Option<String>,
}

impl std::fmt::Debug for CredentialSection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialSection")
            .field("merchant", &self.merchant)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// `[client]`
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClientSection {
    /// "production" or "development"
    pub environment: Option<String>,

    /// Per-request timeout in seconds
    pub timeout_secs: Option<u64>,
}

/// `[retry]`: backoff for transient failures.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RetrySection {
    /// Maximum number of attempts, including the first
    pub max_attempts: Option<u32>,

    /// Initial retry delay in milliseconds
    pub initial_delay_ms: Option<u64>,

    /// Maximum retry delay in milliseconds
    pub max_delay_ms: Option<u64>,

    /// Backoff multiplier
    pub multiplier: Option<f64>,
}

/// `[endpoints]`: replaces the URLs of the selected environment.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EndpointsSection {
    /// Base URL for mobile, payout and status-check calls
    pub api_base: Option<String>,

    /// Card payment URL
    pub card_payment: Option<String>,
}

impl TomlConfig {
    /// # Errors
    ///
    /// [`ConfigError::FileRead`] if `path` cannot be read, otherwise see
    /// [`TomlConfig::parse`].
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&content)
    }

    /// # Errors
    ///
    /// [`ConfigError::TomlParse`] for bad syntax, unknown keys or
    /// wrongly typed values.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }
}
