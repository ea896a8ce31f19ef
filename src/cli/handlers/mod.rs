//! CLI command handlers module
//!
//! - serve: API server
//! - analyze: one-shot tone analysis and projection
//! - chat: interactive terminal chat
//! - info: configuration display

pub mod analyze;
pub mod chat;
pub mod info;
pub mod serve;

// Re-export all public handlers
pub use analyze::*;
pub use chat::*;
pub use info::*;
pub use serve::*;
