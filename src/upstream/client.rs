//! Pooled HTTP client for the upstream chat API.

use std::time::Duration;

use crate::config::ProxyConfig;

/// Client identification string sent on every upstream call.
pub const CLIENT_ID: &str = "role-proxy v1";

/// Handle to the fixed upstream endpoint.
///
/// Owns the reusable connection pool plus the configuration snapshot taken at
/// startup. Cloning is cheap; the pool is shared.
#[derive(Clone)]
pub struct UpstreamClient {
    pub(crate) http: reqwest::Client,
    pub(crate) url: String,
    pub(crate) api_token: String,
    pub(crate) timeout: Duration,
}

impl UpstreamClient {
    /// Build the client from validated configuration.
    pub fn new(config: &ProxyConfig) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .pool_idle_timeout(Duration::from_secs(90))
            .build()?;

        Ok(Self {
            http,
            url: config.upstream_url(),
            api_token: config.api_token.clone(),
            timeout: Duration::from_secs(config.upstream_timeout_secs),
        })
    }

    /// Endpoint URL this client posts to.
    pub fn url(&self) -> &str {
        &self.url
    }
}
