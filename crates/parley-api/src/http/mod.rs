//! HTTP/REST API layer for Parley.
//!
//! Axum-based REST API at `/api/` with typed request/response structs,
//! CORS support, and static frontend serving.

pub mod error;
pub mod handlers;
pub mod router;
