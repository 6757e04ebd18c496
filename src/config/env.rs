//! Configuration loading from the process environment.
//!
//! Each field of [`ProxyConfig`] maps to one environment variable; unset
//! variables fall back to the schema defaults. Loading is implemented over an
//! injectable lookup function so tests never mutate process-wide state.

use crate::config::schema::{ConfigError, ProxyConfig};

const ENV_PORT: &str = "PORT";
const ENV_BASE_URL: &str = "UPSTREAM_BASE_URL";
const ENV_CHAT_PATH: &str = "UPSTREAM_CHAT_PATH";
const ENV_API_TOKEN: &str = "UPSTREAM_API_TOKEN";
const ENV_TIMEOUT_SECS: &str = "UPSTREAM_TIMEOUT_SECS";
const ENV_MAX_BODY_BYTES: &str = "MAX_BODY_BYTES";

impl ProxyConfig {
    /// Load and validate configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Overlay environment-style key-value pairs on the defaults.
    pub fn from_vars<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(port) = lookup(ENV_PORT) {
            config.port = port
                .parse()
                .map_err(|_| ConfigError::InvalidEnvValue(ENV_PORT, port.clone()))?;
        }
        if let Some(base_url) = lookup(ENV_BASE_URL) {
            config.upstream_base_url = base_url;
        }
        if let Some(path) = lookup(ENV_CHAT_PATH) {
            config.upstream_chat_path = path;
        }
        if let Some(token) = lookup(ENV_API_TOKEN) {
            config.api_token = token;
        }
        if let Some(secs) = lookup(ENV_TIMEOUT_SECS) {
            config.upstream_timeout_secs = secs
                .parse()
                .map_err(|_| ConfigError::InvalidEnvValue(ENV_TIMEOUT_SECS, secs.clone()))?;
        }
        if let Some(bytes) = lookup(ENV_MAX_BODY_BYTES) {
            config.max_body_bytes = bytes
                .parse()
                .map_err(|_| ConfigError::InvalidEnvValue(ENV_MAX_BODY_BYTES, bytes.clone()))?;
        }

        config.validate()?;
        Ok(config)
    }
}
