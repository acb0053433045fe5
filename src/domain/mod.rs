//! # Domain Layer
//!
//! Core models, the error taxonomy and the pure result-handling rules.
//! This layer is independent of external frameworks and infrastructure.

mod error;
pub mod models;
pub mod services;

pub use error::*;
pub use models::*;
pub use services::*;
