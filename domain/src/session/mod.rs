//! Conversation session domain
//!
//! [`History`] is the single source of truth for what the backend sees on
//! every completion request.

pub mod entities;

pub use entities::{History, Message, Role};
