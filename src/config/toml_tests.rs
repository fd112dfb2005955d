//! Tests for TOML configuration parsing.

use super::ConfigError;
use super::toml::TomlConfig;

mod parsing {
    use super::*;

    #[test]
    fn parse_credential_section() {
        let toml = r#"
            [credential]
            merchant = "ZANDO"
            token = "secret-token"
        "#;

        let config = TomlConfig::parse(toml).unwrap();

        assert_eq!(config.credential.merchant.as_deref(), Some("ZANDO"));
        assert_eq!(config.credential.token.as_deref(), Some("secret-token"));
    }

    #[test]
    fn parse_full_config() {
        let toml = r#"
            [credential]
            merchant = "ZANDO"
            token = "secret-token"

            [client]
            environment = "production"
            timeout_secs = 10

            [retry]
            max_attempts = 6
            initial_delay_ms = 250
            max_delay_ms = 8000
            multiplier = 1.5

            [endpoints]
            api_base = "http://localhost:8080/api/rest/v1"
            card_payment = "http://localhost:8080/pay"
        "#;

        let config = TomlConfig::parse(toml).unwrap();

        assert_eq!(config.client.environment.as_deref(), Some("production"));
        assert_eq!(config.client.timeout_secs, Some(10));
        assert_eq!(config.retry.max_attempts, Some(6));
        assert_eq!(config.retry.initial_delay_ms, Some(250));
        assert_eq!(config.retry.max_delay_ms, Some(8000));
        assert_eq!(config.retry.multiplier, Some(1.5));
        assert_eq!(
            config.endpoints.api_base.as_deref(),
            Some("http://localhost:8080/api/rest/v1")
        );
        assert_eq!(
            config.endpoints.card_payment.as_deref(),
            Some("http://localhost:8080/pay")
        );
    }

    #[test]
    fn empty_config_uses_empty_sections() {
        let config = TomlConfig::parse("").unwrap();

        assert!(config.credential.merchant.is_none());
        assert!(config.client.environment.is_none());
        assert!(config.retry.max_attempts.is_none());
        assert!(config.endpoints.api_base.is_none());
    }

    #[test]
    fn debug_redacts_token() {
        let config = TomlConfig::parse(
            r#"
            [credential]
            token = "secret-token"
        "#,
        )
        .unwrap();

        let debug = format!("{config:?}");

        assert!(!debug.contains("secret-token"));
        assert!(debug.contains("<redacted>"));
    }
}

mod rejection {
    use super::*;

    #[test]
    fn unknown_section_is_rejected() {
        let result = TomlConfig::parse("[webhook]\nurl = \"https://example.com\"");

        assert!(matches!(result, Err(ConfigError::TomlParse(_))));
    }

    #[test]
    fn unknown_field_is_rejected() {
        let toml = r#"
            [credential]
            merchant = "ZANDO"
            password = "nope"
        "#;

        assert!(matches!(
            TomlConfig::parse(toml),
            Err(ConfigError::TomlParse(_))
        ));
    }

    #[test]
    fn wrong_type_is_rejected() {
        let toml = r#"
            [retry]
            max_attempts = "four"
        "#;

        assert!(matches!(
            TomlConfig::parse(toml),
            Err(ConfigError::TomlParse(_))
        ));
    }

    #[test]
    fn negative_timeout_is_rejected() {
        assert!(TomlConfig::parse("[client]\ntimeout_secs = -1").is_err());
    }
}

mod loading {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn load_reads_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[client]\nenvironment = \"beta\"").unwrap();

        let config = TomlConfig::load(file.path()).unwrap();

        assert_eq!(config.client.environment.as_deref(), Some("beta"));
    }

    #[test]
    fn missing_file_is_file_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("flexpay.toml");

        let err = TomlConfig::load(&path).unwrap_err();

        assert!(matches!(
            err,
            ConfigError::FileRead { ref path, .. } if path.ends_with("flexpay.toml")
        ));
        assert!(err.to_string().contains("flexpay.toml"));
    }
}
