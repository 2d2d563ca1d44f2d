//! Environment-driven configuration.
//!
//! Every key has a default, so a bare environment is valid; a value that is
//! present but unparsable is a hard error (caller contract, not a soft
//! warning).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

/// Runtime configuration shared by the fetcher, the rank client, and the
/// binary.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Per-request timeout for all HTTP calls, in seconds.
    pub request_timeout_secs: u64,
    /// Fixed sleep before every outgoing request, in milliseconds.
    pub inter_request_delay_ms: u64,
    /// `User-Agent` header sent on every request.
    pub user_agent: String,
    /// Base URL of the Scimago journal-rank API.
    pub scimago_base_url: String,
    /// Default tracing filter when `RUST_LOG` is unset.
    pub log_level: String,
}

/// Load configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a set variable has an invalid value.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_config_from_env()
}

/// Load configuration from environment variables already in the process.
///
/// Unlike [`load_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a set variable has an invalid value.
pub fn load_config_from_env() -> Result<AppConfig, ConfigError> {
    build_config(|key| std::env::var(key))
}

/// Build configuration using the provided env-var lookup function.
///
/// The parsing/validation logic is decoupled from the actual environment so
/// it can be tested with a pure `HashMap` lookup.
fn build_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    Ok(AppConfig {
        request_timeout_secs: parse_u64("CFPD_REQUEST_TIMEOUT_SECS", "20")?,
        inter_request_delay_ms: parse_u64("CFPD_INTER_REQUEST_DELAY_MS", "1000")?,
        user_agent: or_default("CFPD_USER_AGENT", "cfpd/0.1 (cfp-aggregation)"),
        scimago_base_url: or_default("CFPD_SCIMAGO_BASE_URL", "https://www.scimagojr.com"),
        log_level: or_default("CFPD_LOG_LEVEL", "info"),
    })
}
