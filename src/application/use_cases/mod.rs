mod execute_code;
mod vector_store_pipeline;

pub use execute_code::*;
pub use vector_store_pipeline::*;
