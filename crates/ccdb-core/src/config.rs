use crate::app_config::{AppConfig, Environment};
use crate::error::ConfigError;

pub const DEFAULT_OSM_API_BASE_URL: &str = "https://api.openstreetmap.org/api/0.6/node/";
pub const DEFAULT_OSM_USER_AGENT: &str = "CampusCoffee/1.0";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is invalid.
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
/// Returns `ConfigError` if a value is invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let database_url = lookup("DATABASE_URL").ok().filter(|url| !url.trim().is_empty());

    let env = parse_environment(&or_default("CCDB_ENV", "development"));
    let bind_addr = parse_addr("CCDB_BIND_ADDR", "0.0.0.0:8080")?;
    let log_level = or_default("CCDB_LOG_LEVEL", "info");

    let db_max_connections = parse_u32("CCDB_DB_MAX_CONNECTIONS", "10")?;
    let db_min_connections = parse_u32("CCDB_DB_MIN_CONNECTIONS", "1")?;
    let db_acquire_timeout_secs = parse_u64("CCDB_DB_ACQUIRE_TIMEOUT_SECS", "10")?;

    let osm_api_base_url = or_default("CCDB_OSM_API_BASE_URL", DEFAULT_OSM_API_BASE_URL);
    if osm_api_base_url.trim().is_empty() {
        return Err(ConfigError::InvalidEnvVar {
            var: "CCDB_OSM_API_BASE_URL".to_string(),
            reason: "must not be blank".to_string(),
        });
    }
    let osm_user_agent = or_default("CCDB_OSM_USER_AGENT", DEFAULT_OSM_USER_AGENT);
    let osm_request_timeout_secs = parse_u64("CCDB_OSM_REQUEST_TIMEOUT_SECS", "30")?;

    Ok(AppConfig {
        database_url,
        env,
        bind_addr,
        log_level,
        db_max_connections,
        db_min_connections,
        db_acquire_timeout_secs,
        osm_api_base_url,
        osm_user_agent,
        osm_request_timeout_secs,
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
