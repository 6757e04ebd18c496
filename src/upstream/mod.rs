//! Upstream dispatch subsystem.
//!
//! # Data Flow
//! ```text
//! transformed ChatRequest (JSON)
//!     → client.rs (pooled keep-alive HTTPS client, built once)
//!     → dispatch.rs (single POST, fixed headers, timeout race)
//!     → relay decision on upstream content-type:
//!         text/event-stream → live chunk-by-chunk stream to the caller
//!         anything else     → buffer fully, send in one write
//! ```
//!
//! # Design Decisions
//! - Exactly one upstream call per inbound request; no retries
//! - Fixed outbound header set; inbound headers are never forwarded
//! - Timeout races the wait for response headers; firing it drops the
//!   in-flight call, which aborts the upstream connection
//! - Timed-out requests surface as 504, transport failures as 500

pub mod client;
pub mod dispatch;

pub use client::UpstreamClient;
pub use dispatch::DispatchError;
