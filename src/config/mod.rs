//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! process environment (PORT, UPSTREAM_*)
//!     → env.rs (overlay on defaults)
//!     → schema.rs validate() (semantic checks)
//!     → ProxyConfig (validated, immutable)
//!     → shared via Arc with the HTTP server and dispatcher
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; it is read exactly once at startup
//! - All fields have defaults except the API token (empty default means
//!   unauthenticated upstream calls, which fail upstream-side)
//! - No hidden statics: the config is constructed in main and injected

pub mod env;
pub mod schema;

pub use schema::{ConfigError, ProxyConfig};
