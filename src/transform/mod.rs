//! Request body transformation subsystem.
//!
//! # Data Flow
//! ```text
//! inbound ChatRequest (JSON)
//!     → rewrite.rs transform()
//!         system turns  → user turns inside <SYSTEM_PROMPT> envelopes
//!         tool turns    → user turns inside <TOOL_RESULT> envelopes
//!         blank turns   → "(Calling tool)" placeholder
//!         temperature   → defaulted when falsy
//!     → outbound ChatRequest (JSON), unknown fields untouched
//! ```
//!
//! # Design Decisions
//! - Pure function over `serde_json::Value`: no I/O, no shared state, never fails
//! - Bodies without a messages array pass through completely unmodified
//! - Unknown top-level fields are preserved in their original order
//!   (serde_json `preserve_order`)

pub mod rewrite;

pub use rewrite::transform;
