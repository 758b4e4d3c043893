use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is set to a value that cannot be parsed.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is set to a value that cannot be parsed.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every setting has a default, so the storefront runs with an empty
/// environment; only malformed values are rejected.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;
    use std::str::FromStr;

    fn parse_as<T>(var: &str, raw: &str) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        raw.parse::<T>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    }

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let env = parse_environment(&or_default("SHELF_ENV", "development"));

    let bind_addr: SocketAddr =
        parse_as("SHELF_BIND_ADDR", &or_default("SHELF_BIND_ADDR", "0.0.0.0:4000"))?;
    let log_level = or_default("SHELF_LOG_LEVEL", "info");
    let catalog_path = PathBuf::from(or_default("SHELF_CATALOG_PATH", "./config/books.json"));
    let api_url = or_default("SHELF_API_URL", "http://127.0.0.1:4000");

    let http_timeout_secs: u64 = parse_as(
        "SHELF_HTTP_TIMEOUT_SECS",
        &or_default("SHELF_HTTP_TIMEOUT_SECS", "30"),
    )?;
    let user_agent = or_default("SHELF_USER_AGENT", "shelf/0.1 (catalog)");

    let rate_limit_max_requests: usize = parse_as(
        "SHELF_RATE_LIMIT_MAX_REQUESTS",
        &or_default("SHELF_RATE_LIMIT_MAX_REQUESTS", "120"),
    )?;
    let rate_limit_window_secs: u64 = parse_as(
        "SHELF_RATE_LIMIT_WINDOW_SECS",
        &or_default("SHELF_RATE_LIMIT_WINDOW_SECS", "60"),
    )?;

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        catalog_path,
        api_url,
        http_timeout_secs,
        user_agent,
        rate_limit_max_requests,
        rate_limit_window_secs,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
