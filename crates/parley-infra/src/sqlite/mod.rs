//! SQLite persistence: database pool and chat repository.

pub mod chat;
pub mod pool;
