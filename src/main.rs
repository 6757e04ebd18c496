//! Role-Rewriting Chat Completions Proxy
//!
//! A reverse proxy built with Tokio and Axum that adapts OpenAI-style chat
//! requests for an upstream that only accepts the `user` and `assistant`
//! message roles.
//!
//! # Architecture Overview
//!
//! ```text
//!                       ┌────────────────────────────────────────────┐
//!                       │                ROLE PROXY                   │
//!                       │                                             │
//!     Client Request    │  ┌─────────┐   ┌───────────┐   ┌─────────┐ │
//!     ──────────────────┼─▶│  http   │──▶│ transform │──▶│upstream │─┼──▶ Upstream
//!                       │  │ server  │   │  rewrite  │   │dispatch │ │    Chat API
//!                       │  └─────────┘   └───────────┘   └────┬────┘ │
//!                       │                                     │      │
//!     Client Response   │  ┌──────────────────────────┐       │      │
//!     ◀─────────────────┼──│ relay (stream or buffer) │◀──────┘      │
//!                       │  └──────────────────────────┘              │
//!                       │                                             │
//!                       │  cross-cutting: config (env), tracing,      │
//!                       │  request IDs, graceful shutdown             │
//!                       └────────────────────────────────────────────┘
//! ```

use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use role_proxy::config::ProxyConfig;
use role_proxy::http::HttpServer;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "role_proxy=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("role-proxy v0.1.0 starting");

    // Load configuration from the process environment
    let config = ProxyConfig::from_env()?;

    tracing::info!(
        port = config.port,
        upstream_base_url = %config.upstream_base_url,
        upstream_chat_path = %config.upstream_chat_path,
        upstream_timeout_secs = config.upstream_timeout_secs,
        token_configured = !config.api_token.is_empty(),
        "Configuration loaded"
    );

    if config.api_token.is_empty() {
        tracing::warn!("UPSTREAM_API_TOKEN is empty; upstream calls will be unauthenticated");
    }

    // Bind TCP listener
    let listener = TcpListener::bind(("0.0.0.0", config.port)).await?;
    let local_addr = listener.local_addr()?;

    tracing::info!(
        address = %local_addr,
        "Listening for connections"
    );

    // Create and run HTTP server
    let server = HttpServer::new(config)?;
    server.run(listener).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
