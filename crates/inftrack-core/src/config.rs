use std::path::PathBuf;

use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

const ENV_VAR: &str = "INFTRACK_ENV";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from the variables already in the process,
/// without reading `.env`.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Parsing and validation over an arbitrary env-var lookup, so tests can
/// drive it from a `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| default.to_string())
    };

    let env = parse_environment(&or_default(ENV_VAR, "development"))?;
    let data_dir = PathBuf::from(or_default("INFTRACK_DATA_DIR", "./data"));
    let log_level = or_default("INFTRACK_LOG_LEVEL", "info");
    let sample_path = PathBuf::from(or_default(
        "INFTRACK_SAMPLE_PATH",
        "./config/sample_influencers.yaml",
    ));

    Ok(AppConfig {
        env,
        data_dir,
        log_level,
        sample_path,
    })
}

fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s.trim().to_lowercase().as_str() {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: ENV_VAR.to_string(),
            reason: format!("expected development, test, or production; got '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
