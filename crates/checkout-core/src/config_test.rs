use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

/// Returns a map with all required env vars populated with valid defaults.
fn full_env<'a>() -> HashMap<&'a str, &'a str> {
    let mut m = HashMap::new();
    m.insert("STOREFRONT_BACKEND_URL", "http://localhost:9000");
    m
}

#[test]
fn parse_environment_known_values() {
    assert_eq!(parse_environment("development"), Environment::Development);
    assert_eq!(parse_environment("test"), Environment::Test);
    assert_eq!(parse_environment("production"), Environment::Production);
}

#[test]
fn parse_environment_unknown_defaults_to_development() {
    assert_eq!(parse_environment("staging"), Environment::Development);
}

#[test]
fn build_app_config_fails_without_backend_url() {
    let map: HashMap<&str, &str> = HashMap::new();
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "STOREFRONT_BACKEND_URL"),
        "expected MissingEnvVar(STOREFRONT_BACKEND_URL), got: {result:?}"
    );
}

#[test]
fn build_app_config_treats_blank_backend_url_as_missing() {
    let mut map = HashMap::new();
    map.insert("STOREFRONT_BACKEND_URL", "   ");
    let result = build_app_config(lookup_from_map(&map));
    assert!(matches!(result, Err(ConfigError::MissingEnvVar(_))));
}

#[test]
fn build_app_config_applies_defaults() {
    let map = full_env();
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.env, Environment::Development);
    assert_eq!(cfg.backend_url, "http://localhost:9000");
    assert_eq!(cfg.log_level, "info");
    assert!(cfg.publishable_key.is_none());
    assert_eq!(cfg.request_timeout_secs, 30);
    assert_eq!(cfg.user_agent, "storefront-checkout/0.1");
}

#[test]
fn build_app_config_reads_overrides() {
    let mut map = full_env();
    map.insert("STOREFRONT_ENV", "production");
    map.insert("STOREFRONT_LOG_LEVEL", "debug");
    map.insert("STOREFRONT_PUBLISHABLE_KEY", "pk_test_123");
    map.insert("STOREFRONT_REQUEST_TIMEOUT_SECS", "5");
    map.insert("STOREFRONT_USER_AGENT", "custom/2.0");

    let cfg = build_app_config(lookup_from_map(&map)).unwrap();

    assert_eq!(cfg.env, Environment::Production);
    assert_eq!(cfg.log_level, "debug");
    assert_eq!(cfg.publishable_key.as_deref(), Some("pk_test_123"));
    assert_eq!(cfg.request_timeout_secs, 5);
    assert_eq!(cfg.user_agent, "custom/2.0");
}

#[test]
fn build_app_config_rejects_invalid_timeout() {
    let mut map = full_env();
    map.insert("STOREFRONT_REQUEST_TIMEOUT_SECS", "soon");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "STOREFRONT_REQUEST_TIMEOUT_SECS"),
        "expected InvalidEnvVar(STOREFRONT_REQUEST_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn build_app_config_rejects_zero_timeout() {
    let mut map = full_env();
    map.insert("STOREFRONT_REQUEST_TIMEOUT_SECS", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(matches!(result, Err(ConfigError::InvalidEnvVar { .. })));
}

#[test]
fn debug_output_redacts_publishable_key() {
    let mut map = full_env();
    map.insert("STOREFRONT_PUBLISHABLE_KEY", "pk_secret");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    let debug = format!("{cfg:?}");
    assert!(!debug.contains("pk_secret"));
    assert!(debug.contains("[redacted]"));
}
