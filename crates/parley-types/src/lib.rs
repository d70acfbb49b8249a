//! Shared domain types for Parley.
//!
//! This crate contains the core domain types used across the Parley backend:
//! chats, messages, completion request/response shapes, and their error types.
//!
//! Zero infrastructure dependencies -- only serde, chrono, thiserror.

pub mod chat;
pub mod error;
pub mod llm;
