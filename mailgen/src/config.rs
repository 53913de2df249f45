//! Configuration module for environment variable parsing.
//!
//! Reads all configuration from environment variables with safe defaults;
//! invalid values fall back to the default with a warning.

use std::env;

use tracing::warn;

/// Default base URL of the remote mail API.
pub const DEFAULT_BASE_URL: &str = "https://api.mail.tm";

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the remote mail API
    pub base_url: String,

    /// HTTP request timeout in milliseconds
    pub request_timeout_ms: u64,

    /// Seconds between inbox poll rounds
    pub poll_interval_secs: u64,

    /// Uninterruptible pacing delay between successive account creations
    pub account_pacing_secs: u64,

    /// Fixed delay before retrying after a transport failure
    pub transport_retry_secs: u64,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Config {
            base_url: env::var("MAILGEN_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),

            request_timeout_ms: parse_u64("MAILGEN_REQUEST_TIMEOUT_MS", 8000),

            poll_interval_secs: parse_u64("MAILGEN_POLL_INTERVAL_SECS", 5),

            account_pacing_secs: parse_u64("MAILGEN_ACCOUNT_PACING_SECS", 1),

            transport_retry_secs: parse_u64("MAILGEN_TRANSPORT_RETRY_SECS", 5),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_ms: 8000,
            poll_interval_secs: 5,
            account_pacing_secs: 1,
            transport_retry_secs: 5,
        }
    }
}

/// Parse an integer environment variable, warning on invalid values.
fn parse_u64(name: &str, default: u64) -> u64 {
    let raw = match env::var(name) {
        Ok(v) => v,
        Err(_) => return default,
    };

    match raw.trim().parse::<u64>() {
        Ok(v) => v,
        Err(_) => {
            warn!(env_var = name, value = %raw, "Invalid integer value, using default");
            default
        }
    }
}
