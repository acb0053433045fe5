use async_trait::async_trait;

use crate::domain::DomainError;

/// Runs genlang source code and returns everything the program printed.
#[async_trait]
pub trait CodeInterpreter: Send + Sync {
    async fn run(&self, source: &str) -> Result<String, DomainError>;
}
