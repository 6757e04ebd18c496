//! Single-shot upstream dispatch and response relay.

use axum::{
    body::Body,
    http::{header, HeaderValue},
    response::Response,
};
use serde_json::Value;
use thiserror::Error;
use tokio::time::Instant;

use crate::upstream::client::{UpstreamClient, CLIENT_ID};

/// Dispatch failure, mapped to a local error response at the handler boundary.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The upstream did not produce response headers within the timeout.
    #[error("upstream request timed out")]
    Timeout,

    /// Connection, DNS, or protocol failure talking to the upstream.
    #[error("upstream transport failure: {0}")]
    Transport(#[from] reqwest::Error),
}

impl UpstreamClient {
    /// Issue exactly one POST of `body` to the upstream endpoint.
    ///
    /// A deadline measured from call start bounds the wait for response
    /// headers and, on the buffered path, the full body read; crossing it
    /// drops the in-flight call, aborting the upstream connection. On success
    /// the upstream status is propagated verbatim and the body is either
    /// streamed live (event-stream responses) or buffered whole.
    pub async fn dispatch(&self, body: &Value) -> Result<Response, DispatchError> {
        let deadline = Instant::now() + self.timeout;

        let call = self
            .http
            .post(&self.url)
            .header(header::CONTENT_TYPE, "application/json")
            .header("x-requested-with", CLIENT_ID)
            .bearer_auth(&self.api_token)
            .json(body)
            .send();

        let upstream = match tokio::time::timeout_at(deadline, call).await {
            Ok(result) => result?,
            Err(_) => return Err(DispatchError::Timeout),
        };

        relay(upstream, deadline).await
    }
}

/// Relay an upstream response to the caller.
///
/// Event-stream bodies are forwarded chunk by chunk as they arrive; everything
/// else is read fully first so the caller sees a Content-Length-consistent
/// body. The buffered read stays under the dispatch deadline so a stalled
/// upstream body cannot hang the caller; a live relay may legitimately outlast
/// it. The upstream content-type is mirrored, defaulting to JSON when the
/// upstream sent none.
async fn relay(upstream: reqwest::Response, deadline: Instant) -> Result<Response, DispatchError> {
    let status = upstream.status();
    let content_type = upstream
        .headers()
        .get(header::CONTENT_TYPE)
        .cloned()
        .unwrap_or_else(|| HeaderValue::from_static("application/json"));

    let body = if is_event_stream(&content_type) {
        Body::from_stream(upstream.bytes_stream())
    } else {
        let bytes = match tokio::time::timeout_at(deadline, upstream.bytes()).await {
            Ok(result) => result?,
            Err(_) => return Err(DispatchError::Timeout),
        };
        Body::from(bytes)
    };

    let mut response = Response::new(body);
    *response.status_mut() = status;
    response
        .headers_mut()
        .insert(header::CONTENT_TYPE, content_type);
    Ok(response)
}

fn is_event_stream(content_type: &HeaderValue) -> bool {
    content_type
        .to_str()
        .map(|value| value.to_ascii_lowercase().contains("text/event-stream"))
        .unwrap_or(false)
}
