//! Configuration schema definitions.
//!
//! Defines the complete configuration structure for the proxy. Types derive
//! Serde traits so a config can also be captured or dumped for diagnostics.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

/// Root configuration for the role-rewriting proxy.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ProxyConfig {
    /// Port the inbound HTTP listener binds to.
    pub port: u16,

    /// Base URL of the upstream chat API (scheme + host, no trailing path).
    pub upstream_base_url: String,

    /// Path of the chat completions endpoint on the upstream.
    pub upstream_chat_path: String,

    /// Bearer token sent on every upstream call.
    pub api_token: String,

    /// Upper bound on the upstream call (response headers plus a buffered
    /// body read), in seconds.
    pub upstream_timeout_secs: u64,

    /// Maximum accepted inbound request body, in bytes.
    pub max_body_bytes: usize,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            upstream_base_url: "https://sourcegraph.com".to_string(),
            upstream_chat_path: "/.api/llm/chat/completions".to_string(),
            api_token: String::new(),
            upstream_timeout_secs: 60,
            max_body_bytes: 100 * 1024 * 1024,
        }
    }
}

impl ProxyConfig {
    /// Full URL of the upstream chat completions endpoint.
    pub fn upstream_url(&self) -> String {
        format!(
            "{}{}",
            self.upstream_base_url.trim_end_matches('/'),
            self.upstream_chat_path
        )
    }

    /// Semantic validation of values serde cannot check.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = Url::parse(&self.upstream_base_url)
            .map_err(|e| ConfigError::InvalidBaseUrl(self.upstream_base_url.clone(), e))?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ConfigError::UnsupportedScheme(url.scheme().to_string()));
        }
        if !self.upstream_chat_path.starts_with('/') {
            return Err(ConfigError::InvalidChatPath(self.upstream_chat_path.clone()));
        }
        if self.upstream_timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        if self.max_body_bytes == 0 {
            return Err(ConfigError::ZeroBodyLimit);
        }
        Ok(())
    }
}

/// Error type for configuration loading and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid upstream base URL {0:?}: {1}")]
    InvalidBaseUrl(String, #[source] url::ParseError),

    #[error("unsupported upstream URL scheme {0:?} (expected http or https)")]
    UnsupportedScheme(String),

    #[error("upstream chat path {0:?} must start with '/'")]
    InvalidChatPath(String),

    #[error("upstream timeout must be greater than zero")]
    ZeroTimeout,

    #[error("request body limit must be greater than zero")]
    ZeroBodyLimit,

    #[error("environment variable {0} has invalid value {1:?}")]
    InvalidEnvValue(&'static str, String),
}
