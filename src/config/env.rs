//! Environment variable overrides.

/// Variable holding the merchant code.
pub const MERCHANT_VAR: &str = "FLEXPAY_MERCHANT";

/// Variable holding the API token.
pub const TOKEN_VAR: &str = "FLEXPAY_TOKEN";

/// Variable selecting the gateway environment.
pub const ENVIRONMENT_VAR: &str = "FLEXPAY_ENVIRONMENT";

/// Values read from `FLEXPAY_*` environment variables.
///
/// Unset and empty variables are both treated as absent, so an exported
/// but blank variable does not mask the config file.
#[derive(Default, Clone, PartialEq, Eq)]
pub struct EnvOverrides {
    /// `FLEXPAY_MERCHANT`
    pub merchant: Option<String>,
    /// `FLEXPAY_TOKEN`
    pub token: Option<String>,
    /// `FLEXPAY_ENVIRONMENT`
    pub environment: Option<String>,
}

impl EnvOverrides {
    /// Reads the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads variables through `lookup`, e.g. a map in tests.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        Self {
            merchant: read(MERCHANT_VAR),
            token: read(TOKEN_VAR),
            environment: read(ENVIRONMENT_VAR),
        }
    }
}

impl std::fmt::Debug for EnvOverrides {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnvOverrides")
            .field("merchant", &self.merchant)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("environment", &self.environment)
            .finish()
    }
}
