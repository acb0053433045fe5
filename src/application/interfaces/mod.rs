mod code_interpreter;
mod embedding_service;
mod point_repository;
mod token_provider;

pub use code_interpreter::*;
pub use embedding_service::*;
pub use point_repository::*;
pub use token_provider::*;
