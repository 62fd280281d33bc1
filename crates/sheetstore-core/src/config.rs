use crate::app_config::{AppConfig, Environment};
use crate::products::DEFAULT_PLACEHOLDER_IMAGE_URL;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
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
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so tests can drive it with a
/// plain `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        or_default(var, default)
            .parse::<SocketAddr>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_base_url = |var: &str, default: &str| -> Result<String, ConfigError> {
        let raw = or_default(var, default);
        let trimmed = raw.trim().trim_end_matches('/');
        if trimmed.starts_with("https://") || trimmed.starts_with("http://") {
            Ok(trimmed.to_string())
        } else {
            Err(invalid(var, format!("\"{raw}\" is not an http(s) URL")))
        }
    };

    // A full resource URL: kept as written, but must name an http(s) host.
    let parse_image_url = |var: &str, default: &str| -> Result<String, ConfigError> {
        let raw = or_default(var, default);
        let url = raw.trim();
        let host = url
            .strip_prefix("https://")
            .or_else(|| url.strip_prefix("http://"))
            .and_then(|rest| rest.split(['/', '?', '#']).next())
            .unwrap_or_default();
        if host.is_empty() || url.contains(char::is_whitespace) {
            Err(invalid(
                var,
                format!("\"{raw}\" is not an absolute http(s) URL"),
            ))
        } else {
            Ok(url.to_string())
        }
    };

    let database_url = require("DATABASE_URL")?;
    let env = parse_environment(&or_default("SHEETSTORE_ENV", "development"))?;

    let bind_addr = parse_addr("SHEETSTORE_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("SHEETSTORE_LOG_LEVEL", "info");

    let db_max_connections = parse_u32("SHEETSTORE_DB_MAX_CONNECTIONS", "10")?;
    let db_min_connections = parse_u32("SHEETSTORE_DB_MIN_CONNECTIONS", "1")?;
    if db_min_connections > db_max_connections {
        return Err(invalid(
            "SHEETSTORE_DB_MIN_CONNECTIONS",
            format!(
                "min connections ({db_min_connections}) exceeds max connections ({db_max_connections})"
            ),
        ));
    }
    let db_acquire_timeout_secs = parse_u64("SHEETSTORE_DB_ACQUIRE_TIMEOUT_SECS", "10")?;

    let fetch_timeout_secs = parse_u64("SHEETSTORE_FETCH_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("SHEETSTORE_USER_AGENT", "sheetstore/0.1 (catalog-import)");
    let placeholder_image_url = parse_image_url(
        "SHEETSTORE_PLACEHOLDER_IMAGE_URL",
        DEFAULT_PLACEHOLDER_IMAGE_URL,
    )?;
    let messaging_base_url = parse_base_url("SHEETSTORE_MESSAGING_BASE_URL", "https://wa.me")?;

    Ok(AppConfig {
        database_url,
        env,
        bind_addr,
        log_level,
        db_max_connections,
        db_min_connections,
        db_acquire_timeout_secs,
        fetch_timeout_secs,
        user_agent,
        placeholder_image_url,
        messaging_base_url,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values are rejected so a typo such as `producton` cannot
/// silently start the server in development mode.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "SHEETSTORE_ENV".to_string(),
            reason: format!("unknown environment \"{other}\""),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
