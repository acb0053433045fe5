//! Domain services containing the pure result-handling rules.

mod result_extractor;
mod vector_policy;

pub use result_extractor::*;
pub use vector_policy::*;
