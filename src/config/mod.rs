//! Configuration layer for the gateway client.
//!
//! This module provides:
//! - Environment variable overrides ([`EnvOverrides`])
//! - TOML configuration file parsing ([`TomlConfig`])
//! - Validated configuration ([`ClientConfig`])
//! - Default values ([`defaults`])
//!
//! # Priority
//!
//! Configuration values are resolved with the following priority (highest to lowest):
//!
//! 1. **Environment variables** - `FLEXPAY_MERCHANT`, `FLEXPAY_TOKEN`, `FLEXPAY_ENVIRONMENT`
//! 2. **TOML config file** - Values from the configuration file
//! 3. **Built-in defaults** - Hardcoded default values
//!
//! The merchant and token have no default and must come from one of the
//! first two sources. Retry, timeout and endpoint settings are TOML-only.
//!
//! Endpoint overrides replace the URL of the selected environment one by
//! one: overriding `api_base` keeps the environment's card-payment URL.

pub mod defaults;
mod env;
mod error;
mod toml;
mod validated;

#[cfg(test)]
mod toml_tests;
#[cfg(test)]
mod validated_tests;

pub use env::{ENVIRONMENT_VAR, EnvOverrides, MERCHANT_VAR, TOKEN_VAR};
pub use error::{ConfigError, field};
pub use toml::{ClientSection, CredentialSection, EndpointsSection, RetrySection, TomlConfig};
pub use validated::ClientConfig;
