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

#[test]
fn parse_environment_development() {
    assert_eq!(parse_environment("development"), Environment::Development);
}

#[test]
fn parse_environment_test() {
    assert_eq!(parse_environment("test"), Environment::Test);
}

#[test]
fn parse_environment_production() {
    assert_eq!(parse_environment("production"), Environment::Production);
}

#[test]
fn parse_environment_unknown_defaults_to_development() {
    assert_eq!(parse_environment("staging"), Environment::Development);
}

#[test]
fn build_app_config_succeeds_with_empty_env() {
    let map: HashMap<&str, &str> = HashMap::new();
    let result = build_app_config(lookup_from_map(&map));
    assert!(result.is_ok(), "expected Ok, got: {result:?}");
    let cfg = result.unwrap();
    assert_eq!(cfg.env, Environment::Development);
    assert_eq!(cfg.bind_addr.to_string(), "0.0.0.0:4000");
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.catalog_path.to_str(), Some("./config/books.json"));
    assert_eq!(cfg.api_url, "http://127.0.0.1:4000");
    assert_eq!(cfg.http_timeout_secs, 30);
    assert_eq!(cfg.user_agent, "shelf/0.1 (catalog)");
    assert_eq!(cfg.rate_limit_max_requests, 120);
    assert_eq!(cfg.rate_limit_window_secs, 60);
}

#[test]
fn build_app_config_fails_with_invalid_bind_addr() {
    let mut map = HashMap::new();
    map.insert("SHELF_BIND_ADDR", "not-a-socket-addr");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "SHELF_BIND_ADDR"),
        "expected InvalidEnvVar(SHELF_BIND_ADDR), got: {result:?}"
    );
}

#[test]
fn build_app_config_reads_overrides() {
    let mut map = HashMap::new();
    map.insert("SHELF_ENV", "production");
    map.insert("SHELF_BIND_ADDR", "127.0.0.1:8080");
    map.insert("SHELF_CATALOG_PATH", "/srv/shelf/books.yaml");
    map.insert("SHELF_API_URL", "https://books.example.com");
    map.insert("SHELF_LOG_LEVEL", "debug");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.env, Environment::Production);
    assert_eq!(cfg.bind_addr.port(), 8080);
    assert_eq!(cfg.catalog_path.to_str(), Some("/srv/shelf/books.yaml"));
    assert_eq!(cfg.api_url, "https://books.example.com");
    assert_eq!(cfg.log_level, "debug");
}

#[test]
fn http_timeout_secs_override() {
    let mut map = HashMap::new();
    map.insert("SHELF_HTTP_TIMEOUT_SECS", "5");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.http_timeout_secs, 5);
}

#[test]
fn http_timeout_secs_invalid() {
    let mut map = HashMap::new();
    map.insert("SHELF_HTTP_TIMEOUT_SECS", "not-a-number");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "SHELF_HTTP_TIMEOUT_SECS"),
        "expected InvalidEnvVar(SHELF_HTTP_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn user_agent_override() {
    let mut map = HashMap::new();
    map.insert("SHELF_USER_AGENT", "custom-agent/2.0");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.user_agent, "custom-agent/2.0");
}

#[test]
fn rate_limit_override() {
    let mut map = HashMap::new();
    map.insert("SHELF_RATE_LIMIT_MAX_REQUESTS", "10");
    map.insert("SHELF_RATE_LIMIT_WINDOW_SECS", "1");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.rate_limit_max_requests, 10);
    assert_eq!(cfg.rate_limit_window_secs, 1);
}

#[test]
fn rate_limit_max_requests_invalid() {
    let mut map = HashMap::new();
    map.insert("SHELF_RATE_LIMIT_MAX_REQUESTS", "-1");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "SHELF_RATE_LIMIT_MAX_REQUESTS"),
        "expected InvalidEnvVar(SHELF_RATE_LIMIT_MAX_REQUESTS), got: {result:?}"
    );
}

#[test]
fn rate_limit_window_secs_invalid() {
    let mut map = HashMap::new();
    map.insert("SHELF_RATE_LIMIT_WINDOW_SECS", "soon");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "SHELF_RATE_LIMIT_WINDOW_SECS"),
        "expected InvalidEnvVar(SHELF_RATE_LIMIT_WINDOW_SECS), got: {result:?}"
    );
}
