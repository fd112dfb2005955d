//! Validated configuration after merging environment and TOML sources.
//!
//! This module contains the final, validated configuration a
//! [`Client`](crate::Client) is built from. All validation is performed
//! during construction.

use std::fmt;
use std::path::Path;
use std::time::Duration;

use url::Url;

use crate::environment::{Endpoints, Environment};
use crate::schema::Credential;
use crate::transport::RetryPolicy;

use super::defaults;
use super::env::EnvOverrides;
use super::error::{ConfigError, field};
use super::toml::TomlConfig;

/// Fully validated client configuration.
///
/// # Construction
///
/// Use [`ClientConfig::from_raw`] to merge environment overrides with an
/// optional TOML config, or [`ClientConfig::load`] to read both from
/// their usual places.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Merchant credential (required)
    pub credential: Credential,

    /// Selected gateway environment
    pub environment: Environment,

    /// Endpoints for the environment, with any overrides applied
    pub endpoints: Endpoints,

    /// Retry policy for transient failures
    pub retry_policy: RetryPolicy,

    /// Per-request timeout applied by the HTTP client
    pub timeout: Duration,
}

impl fmt::Display for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Config {{ merchant: {}, environment: {}, api_base: {}, card_payment: {}, \
             retry: {}x/{}ms, timeout: {}s }}",
            self.credential.merchant(),
            self.environment,
            self.endpoints.api_base(),
            self.endpoints.card_payment(),
            self.retry_policy.max_attempts,
            self.retry_policy.initial_delay.as_millis(),
            self.timeout.as_secs(),
        )
    }
}

impl ClientConfig {
    /// Creates a validated configuration from environment overrides and
    /// an optional TOML config.
    ///
    /// Environment variables take precedence over TOML values; anything
    /// left unset falls back to [`defaults`].
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The merchant or token is missing or empty
    /// - The environment name is unknown
    /// - An endpoint override is not an absolute URL
    /// - The timeout or a retry value is out of range
    pub fn from_raw(env: &EnvOverrides, toml: Option<&TomlConfig>) -> Result<Self, ConfigError> {
        let credential = Self::resolve_credential(env, toml)?;
        let environment = Self::resolve_environment(env, toml)?;
        let endpoints = Self::resolve_endpoints(environment, toml)?;
        let retry_policy = Self::build_retry_policy(toml)?;
        let timeout = Self::resolve_timeout(toml)?;

        Ok(Self {
            credential,
            environment,
            endpoints,
            retry_policy,
            timeout,
        })
    }

    /// Loads configuration from the process environment and an optional
    /// config file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The config file cannot be read or parsed
    /// - The merged configuration is invalid
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let toml = path.map(TomlConfig::load).transpose()?;

        Self::from_raw(&EnvOverrides::from_env(), toml.as_ref())
    }

    fn resolve_credential(
        env: &EnvOverrides,
        toml: Option<&TomlConfig>,
    ) -> Result<Credential, ConfigError> {
        let section = toml.map(|t| &t.credential);

        let merchant = env
            .merchant
            .as_deref()
            .or_else(|| section.and_then(|s| s.merchant.as_deref()))
            .ok_or_else(|| {
                ConfigError::missing(
                    field::MERCHANT,
                    "Set FLEXPAY_MERCHANT or credential.merchant in config file",
                )
            })?;

        let token = env
            .token
            .as_deref()
            .or_else(|| section.and_then(|s| s.token.as_deref()))
            .ok_or_else(|| {
                ConfigError::missing(
                    field::TOKEN,
                    "Set FLEXPAY_TOKEN or credential.token in config file",
                )
            })?;

        Credential::new(merchant, token).map_err(ConfigError::InvalidCredential)
    }

    fn resolve_environment(
        env: &EnvOverrides,
        toml: Option<&TomlConfig>,
    ) -> Result<Environment, ConfigError> {
        let Some(name) = env
            .environment
            .as_deref()
            .or_else(|| toml.and_then(|t| t.client.environment.as_deref()))
        else {
            return Ok(defaults::ENVIRONMENT);
        };

        name.parse().map_err(|_| ConfigError::InvalidEnvironment {
            value: name.to_string(),
        })
    }

    fn resolve_endpoints(
        environment: Environment,
        toml: Option<&TomlConfig>,
    ) -> Result<Endpoints, ConfigError> {
        let fixed = Endpoints::for_environment(environment);
        let section = toml.map(|t| &t.endpoints);

        let api_base = match section.and_then(|s| s.api_base.as_deref()) {
            Some(url) => parse_url(url)?,
            None => fixed.api_base().to_string(),
        };
        let card_payment = match section.and_then(|s| s.card_payment.as_deref()) {
            Some(url) => parse_url(url)?,
            None => fixed.card_payment().to_string(),
        };

        Ok(Endpoints::custom(api_base, card_payment))
    }

    fn build_retry_policy(toml: Option<&TomlConfig>) -> Result<RetryPolicy, ConfigError> {
        let retry = toml.map(|t| &t.retry);

        let max_attempts = retry
            .and_then(|r| r.max_attempts)
            .unwrap_or(defaults::RETRY_MAX_ATTEMPTS);

        let initial_delay_ms = retry
            .and_then(|r| r.initial_delay_ms)
            .unwrap_or(defaults::RETRY_INITIAL_DELAY_MS);

        let max_delay_ms = retry
            .and_then(|r| r.max_delay_ms)
            .unwrap_or(defaults::RETRY_MAX_DELAY_MS);

        let multiplier = retry
            .and_then(|r| r.multiplier)
            .unwrap_or(defaults::RETRY_MULTIPLIER);

        if max_attempts == 0 {
            return Err(ConfigError::InvalidRetry(
                "max_attempts must be greater than 0".to_string(),
            ));
        }

        if initial_delay_ms == 0 {
            return Err(ConfigError::InvalidRetry(
                "initial_delay_ms must be greater than 0".to_string(),
            ));
        }

        if multiplier <= 0.0 || !multiplier.is_finite() {
            return Err(ConfigError::InvalidRetry(
                "multiplier must be a positive finite number".to_string(),
            ));
        }

        if max_delay_ms < initial_delay_ms {
            return Err(ConfigError::InvalidRetry(format!(
                "max_delay_ms ({max_delay_ms}) must be >= initial_delay_ms ({initial_delay_ms})"
            )));
        }

        Ok(RetryPolicy::new()
            .with_max_attempts(max_attempts)
            .with_initial_delay(Duration::from_millis(initial_delay_ms))
            .with_max_delay(Duration::from_millis(max_delay_ms))
            .with_multiplier(multiplier))
    }

    fn resolve_timeout(toml: Option<&TomlConfig>) -> Result<Duration, ConfigError> {
        let Some(seconds) = toml.and_then(|t| t.client.timeout_secs) else {
            return Ok(defaults::timeout());
        };

        if seconds == 0 {
            return Err(ConfigError::InvalidDuration {
                field: "timeout_secs",
                reason: "must be greater than 0".to_string(),
            });
        }

        Ok(Duration::from_secs(seconds))
    }
}

/// Checks that `url` is an absolute URL that can carry a path.
fn parse_url(url: &str) -> Result<String, ConfigError> {
    let parsed = Url::parse(url).map_err(|e| ConfigError::InvalidUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })?;

    if parsed.cannot_be_a_base() {
        return Err(ConfigError::InvalidUrl {
            url: url.to_string(),
            reason: "URL cannot be used as a base".to_string(),
        });
    }

    Ok(url.to_string())
}
