use async_trait::async_trait;

use crate::domain::DomainError;

/// Issues a fresh bearer token from the upstream authorization endpoint.
///
/// Every call is a network round trip; callers go through
/// [`crate::application::TokenCache`] instead of using this directly.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    async fn fetch_token(&self) -> Result<String, DomainError>;
}
