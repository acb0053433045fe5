use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Auth error: {0}")]
    AuthError(String),

    #[error("Upstream error: {0}")]
    UpstreamError(String),

    #[error("Store error: {0}")]
    StoreError(String),

    /// Carries the interpreter output verbatim.
    #[error("{0}")]
    ExecutionError(String),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::ValidationError(msg.into())
    }

    pub fn auth(msg: impl Into<String>) -> Self {
        Self::AuthError(msg.into())
    }

    pub fn upstream(msg: impl Into<String>) -> Self {
        Self::UpstreamError(msg.into())
    }

    pub fn store(msg: impl Into<String>) -> Self {
        Self::StoreError(msg.into())
    }

    pub fn execution(msg: impl Into<String>) -> Self {
        Self::ExecutionError(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::ValidationError(_))
    }

    pub fn is_auth(&self) -> bool {
        matches!(self, Self::AuthError(_))
    }

    pub fn is_upstream(&self) -> bool {
        matches!(self, Self::UpstreamError(_))
    }

    pub fn is_store(&self) -> bool {
        matches!(self, Self::StoreError(_))
    }

    pub fn is_execution(&self) -> bool {
        matches!(self, Self::ExecutionError(_))
    }

    /// Whether the failure was caused by the caller's input rather than by
    /// this service or one of its collaborators.
    pub fn is_client_error(&self) -> bool {
        self.is_validation()
    }
}
