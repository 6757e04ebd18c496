//! HTTP server setup and request handling.
//!
//! # Responsibilities
//! - Create the Axum router with the chat completions handler
//! - Wire up middleware (tracing, request ID)
//! - Collect the inbound body, rewrite it, dispatch it upstream
//! - Map dispatch failures to local error responses (504/500)
//! - Emit one access-log line per completed request
//! - Graceful shutdown on Ctrl+C

use std::sync::Arc;
use std::time::Instant;

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::config::ProxyConfig;
use crate::http::request::{MakeRequestUuid, X_REQUEST_ID};
use crate::transform::transform;
use crate::upstream::{DispatchError, UpstreamClient};

const CHAT_COMPLETIONS_PATH: &str = "/chat/completions";

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub upstream: Arc<UpstreamClient>,
    pub max_body_bytes: usize,
}

/// HTTP server for the role-rewriting proxy.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ProxyConfig) -> Result<Self, reqwest::Error> {
        let upstream = Arc::new(UpstreamClient::new(&config)?);
        let state = AppState {
            upstream,
            max_body_bytes: config.max_body_bytes,
        };
        Ok(Self {
            router: Self::build_router(state),
        })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(state: AppState) -> Router {
        // Layers run outermost-last: set the request ID before tracing,
        // propagate it onto the response innermost.
        Router::new()
            .route(CHAT_COMPLETIONS_PATH, post(completions_handler))
            .with_state(state)
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Chat completions handler: collect, transform, dispatch, relay.
async fn completions_handler(
    State(state): State<AppState>,
    request: Request<Body>,
) -> Response {
    let start = Instant::now();
    let request_id = request
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .to_string();

    let response = proxy_completions(&state, request).await;

    tracing::info!(
        request_id = %request_id,
        method = "POST",
        path = CHAT_COMPLETIONS_PATH,
        status = response.status().as_u16(),
        duration_ms = start.elapsed().as_millis() as u64,
        "Request completed"
    );

    response
}

async fn proxy_completions(state: &AppState, request: Request<Body>) -> Response {
    let body = match axum::body::to_bytes(request.into_body(), state.max_body_bytes).await {
        Ok(bytes) => bytes,
        Err(e) if is_length_limit(&e) => {
            tracing::warn!(limit = state.max_body_bytes, "Request body over size limit");
            return error_response(StatusCode::PAYLOAD_TOO_LARGE, "Request body too large");
        }
        Err(e) => {
            tracing::warn!(error = %e, "Failed to read request body");
            return error_response(StatusCode::BAD_REQUEST, "Failed to read request body");
        }
    };

    let inbound: Value = match serde_json::from_slice(&body) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(error = %e, "Rejected non-JSON request body");
            return error_response(StatusCode::BAD_REQUEST, "Invalid JSON body");
        }
    };

    let outbound = transform(inbound);

    match state.upstream.dispatch(&outbound).await {
        Ok(relayed) => relayed,
        Err(DispatchError::Timeout) => {
            tracing::warn!(
                upstream_url = %state.upstream.url(),
                "Upstream request timed out"
            );
            error_response(StatusCode::GATEWAY_TIMEOUT, "Upstream request timed out")
        }
        Err(DispatchError::Transport(e)) => {
            // Full detail stays server-side; the caller gets a generic body.
            tracing::error!(
                upstream_url = %state.upstream.url(),
                error = %e,
                "Upstream dispatch failed"
            );
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
        }
    }
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

/// True when a body read failed because it exceeded the size limit, as opposed
/// to a mid-transfer I/O error.
fn is_length_limit(err: &axum::Error) -> bool {
    let mut source: Option<&(dyn std::error::Error + 'static)> = Some(err);
    while let Some(e) = source {
        if e.is::<http_body_util::LengthLimitError>() {
            return true;
        }
        source = e.source();
    }
    false
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install Ctrl+C handler");
        return;
    }
    tracing::info!("Shutdown signal received");
}
