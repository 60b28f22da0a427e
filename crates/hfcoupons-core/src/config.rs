use thiserror::Error;

use crate::app_config::{AppConfig, DEFAULT_BASE_URL, DEFAULT_USER_AGENT};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

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

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every variable is optional; unset ones fall back to [`AppConfig::default`].
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.trim()
            .parse::<u64>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let base_url = parse_base_url(&or_default("HFC_BASE_URL", DEFAULT_BASE_URL))?;
    let log_level = or_default("HFC_LOG_LEVEL", "info");
    let request_timeout_secs = parse_u64("HFC_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("HFC_USER_AGENT", DEFAULT_USER_AGENT);
    let inter_page_delay_ms = parse_u64("HFC_INTER_PAGE_DELAY_MS", "50")?;

    if request_timeout_secs == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "HFC_REQUEST_TIMEOUT_SECS".to_string(),
            reason: "timeout must be at least 1 second".to_string(),
        });
    }

    Ok(AppConfig {
        base_url,
        log_level,
        request_timeout_secs,
        user_agent,
        inter_page_delay_ms,
    })
}

/// Normalizes the coupon site root: trims whitespace and trailing slashes.
fn parse_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(ConfigError::InvalidEnvVar {
            var: "HFC_BASE_URL".to_string(),
            reason: "base URL must not be empty".to_string(),
        });
    }
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(ConfigError::InvalidEnvVar {
            var: "HFC_BASE_URL".to_string(),
            reason: format!("\"{trimmed}\" is not an http(s) URL"),
        });
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
