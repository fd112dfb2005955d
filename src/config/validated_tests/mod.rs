//! Tests for validated configuration.

use std::collections::HashMap;

use super::ConfigError;
use super::env::EnvOverrides;
use super::toml::TomlConfig;
use super::validated::ClientConfig;

/// Helper to build overrides from `(name, value)` pairs
fn env(vars: &[(&str, &str)]) -> EnvOverrides {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect();
    EnvOverrides::from_lookup(|name| vars.get(name).cloned())
}

/// Helper to parse TOML config
fn toml(content: &str) -> TomlConfig {
    TomlConfig::parse(content).unwrap()
}

/// TOML with only a credential, for tests about other settings
fn with_credential(rest: &str) -> TomlConfig {
    toml(&format!(
        "[credential]\nmerchant = \"ZANDO\"\ntoken = \"toml-token\"\n{rest}"
    ))
}
