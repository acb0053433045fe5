use std::time::Duration;

use tokio::time::Instant;

/// A bearer token together with the instant after which it must not be served.
#[derive(Debug, Clone)]
pub struct Token {
    value: String,
    expiry: Instant,
}

impl Token {
    pub fn new(value: impl Into<String>, expiry: Instant) -> Self {
        Self {
            value: value.into(),
            expiry,
        }
    }

    /// Token issued now and valid for `ttl`.
    pub fn issued_now(value: impl Into<String>, ttl: Duration) -> Self {
        Self::new(value, Instant::now() + ttl)
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn expiry(&self) -> Instant {
        self.expiry
    }

    pub fn is_valid_at(&self, now: Instant) -> bool {
        !self.value.is_empty() && now < self.expiry
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid_at(Instant::now())
    }
}
