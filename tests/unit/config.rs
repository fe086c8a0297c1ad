//! Tests for Configuration validation.

use testmonitor::{ConfigError, Configuration};

#[test]
fn test_configuration_accepts_server_urls() {
    let config = Configuration::new("https://myserver:9091", "api-key").unwrap();
    assert_eq!(config.server_address().scheme(), "https");
    assert_eq!(config.server_address().host_str(), Some("myserver"));
    assert_eq!(config.server_address().port(), Some(9091));
    assert_eq!(config.api_key(), "api-key");

    let config = Configuration::new("http://127.0.0.1:8080/", "api-key").unwrap();
    assert_eq!(config.server_address().host_str(), Some("127.0.0.1"));
}

#[test]
fn test_configuration_rejects_malformed_urls() {
    assert!(matches!(
        Configuration::new("", "api-key"),
        Err(ConfigError::InvalidUrl(_))
    ));
    assert!(matches!(
        Configuration::new("myserver:9091", "api-key"),
        Err(ConfigError::UnsupportedScheme(_))
    ));
    assert!(matches!(
        Configuration::new("https://", "api-key"),
        Err(ConfigError::InvalidUrl(_))
    ));
    assert!(matches!(
        Configuration::new("/relative/path", "api-key"),
        Err(ConfigError::InvalidUrl(_))
    ));
}

#[test]
fn test_configuration_rejects_empty_api_key() {
    let err = Configuration::new("https://myserver", "").unwrap_err();
    assert!(matches!(err, ConfigError::EmptyApiKey));
    assert_eq!(err.to_string(), "API key cannot be empty");
}

#[test]
fn test_configuration_is_cloneable() {
    let config = Configuration::new("https://myserver", "api-key").unwrap();
    let clone = config.clone();
    assert_eq!(clone.server_address(), config.server_address());
    assert_eq!(clone.api_key(), config.api_key());
}
