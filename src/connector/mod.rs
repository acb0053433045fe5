//! # Connector Layer
//!
//! External integrations implementing application interfaces:
//! - Token endpoint and embedding endpoint (reqwest)
//! - Point storage (Qdrant REST, in-memory)
//! - The genlang interpreter process
//! - The HTTP API served to clients (axum)

pub mod adapter;
pub mod api;

pub use adapter::*;
