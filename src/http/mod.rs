//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, POST /chat/completions)
//!     → request.rs (request ID generation and propagation)
//!     → transform (role rewriting)
//!     → upstream dispatch
//!     → relay (stream or buffered) back to the caller
//! ```

pub mod request;
pub mod server;

pub use request::{MakeRequestUuid, X_REQUEST_ID};
pub use server::HttpServer;
