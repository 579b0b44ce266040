//! Client configuration parsed from environment variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080/api";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid API base URL '{0}' (expected http:// or https://)")]
    InvalidBaseUrl(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self { request_secs: DEFAULT_REQUEST_TIMEOUT_SECS, connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Backend API root, without trailing slash (e.g. `http://localhost:8080/api`).
    pub base_url: String,
    pub timeouts: Timeouts,
}

impl ClientConfig {
    /// Build a config for the given base URL with default timeouts.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is not an `http://` or `https://` URL.
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self { base_url: normalize_base_url(base_url)?, timeouts: Timeouts::default() })
    }

    /// Build typed client config from environment variables.
    ///
    /// Optional:
    /// - `SPAS_API_BASE_URL`: default `http://localhost:8080/api`
    /// - `SPAS_REQUEST_TIMEOUT_SECS`: default 30
    /// - `SPAS_CONNECT_TIMEOUT_SECS`: default 10
    ///
    /// # Errors
    ///
    /// Returns an error if `SPAS_API_BASE_URL` is set to a non-HTTP URL.
    pub fn from_env() -> Result<Self, ConfigError> {
        let raw = std::env::var("SPAS_API_BASE_URL").unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_owned());
        let base_url = normalize_base_url(&raw)?;
        let timeouts = Timeouts {
            request_secs: env_parse_u64("SPAS_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS),
            connect_secs: env_parse_u64("SPAS_CONNECT_TIMEOUT_SECS", DEFAULT_CONNECT_TIMEOUT_SECS),
        };
        Ok(Self { base_url, timeouts })
    }

    /// Replace the base URL, keeping the timeouts.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is not an `http://` or `https://` URL.
    pub fn with_base_url(self, base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self { base_url: normalize_base_url(base_url)?, ..self })
    }
}

fn normalize_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        Ok(trimmed.to_owned())
    } else {
        Err(ConfigError::InvalidBaseUrl(raw.to_owned()))
    }
}

fn env_parse_u64(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse::<u64>().ok())
        .filter(|v| *v > 0)
        .unwrap_or(default)
}
