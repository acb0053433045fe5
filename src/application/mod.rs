//! # Application Layer
//!
//! Collaborator interfaces, the shared token cache and the use cases that
//! coordinate domain rules with connector implementations.

mod context;
pub mod interfaces;
mod token_cache;
pub mod use_cases;

pub use context::*;
pub use interfaces::*;
pub use token_cache::*;
pub use use_cases::*;
