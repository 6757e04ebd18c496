//! Role-rewriting chat completions proxy library.

pub mod config;
pub mod http;
pub mod transform;
pub mod upstream;

pub use config::ProxyConfig;
pub use http::HttpServer;
