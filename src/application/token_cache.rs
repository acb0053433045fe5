//! Shared bearer-token cache in front of the authorization endpoint.
//!
//! The fast path hands out the cached token while it is valid. Once it has
//! expired, the first caller starts a refresh in its own task and every
//! other caller that arrives before the refresh finishes joins the same
//! in-flight future, so the upstream endpoint sees exactly one request per
//! refresh cycle. A failed refresh leaves the cache untouched.

use std::sync::Arc;
use std::time::Duration;

use futures_util::future::{BoxFuture, FutureExt, Shared};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::application::{CallContext, TokenProvider};
use crate::domain::{DomainError, Token};

/// Default lifetime of a cached token. Deliberately shorter than the upstream
/// token lifetime to absorb clock skew.
pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(180);

type RefreshOutcome = Result<String, String>;
type SharedRefresh = Shared<BoxFuture<'static, RefreshOutcome>>;

enum Refresh {
    Ready(String),
    Pending(SharedRefresh),
}

pub struct TokenCache {
    inner: Arc<Inner>,
}

struct Inner {
    provider: Arc<dyn TokenProvider>,
    ttl: Duration,
    token: Mutex<Option<Token>>,
    in_flight: Mutex<Option<SharedRefresh>>,
}

impl TokenCache {
    pub fn new(provider: Arc<dyn TokenProvider>, ttl: Duration) -> Self {
        Self {
            inner: Arc::new(Inner {
                provider,
                ttl,
                token: Mutex::new(None),
                in_flight: Mutex::new(None),
            }),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.inner.ttl
    }

    /// Returns a valid bearer token, refreshing it if necessary.
    ///
    /// The context bounds how long this caller waits; abandoning the wait
    /// does not abort the refresh other callers may be sharing.
    pub async fn acquire(&self, ctx: &CallContext) -> Result<String, DomainError> {
        if let Some(value) = self.inner.cached().await {
            return Ok(value);
        }

        let pending = match self.join_or_start_refresh().await {
            Refresh::Ready(value) => return Ok(value),
            Refresh::Pending(pending) => pending,
        };

        match ctx.run(pending).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(message)) => Err(DomainError::auth(message)),
            Err(interrupted) => Err(DomainError::auth(format!(
                "waiting for token refresh {interrupted}"
            ))),
        }
    }

    async fn join_or_start_refresh(&self) -> Refresh {
        let mut in_flight = self.inner.in_flight.lock().await;

        // A refresh may have finished between the fast-path check and taking
        // the slot lock.
        if let Some(value) = self.inner.cached().await {
            return Refresh::Ready(value);
        }

        if let Some(pending) = in_flight.as_ref() {
            debug!("Joining in-flight token refresh");
            return Refresh::Pending(pending.clone());
        }

        let pending = Self::spawn_refresh(Arc::clone(&self.inner));
        *in_flight = Some(pending.clone());
        Refresh::Pending(pending)
    }

    fn spawn_refresh(inner: Arc<Inner>) -> SharedRefresh {
        let handle = tokio::spawn(async move {
            debug!("Requesting new access token");
            let outcome = inner.provider.fetch_token().await.map_err(auth_message);

            match &outcome {
                Ok(value) => {
                    *inner.token.lock().await = Some(Token::issued_now(value.clone(), inner.ttl));
                    info!("Access token refreshed, cached for {}s", inner.ttl.as_secs());
                }
                Err(message) => warn!("Access token refresh failed: {}", message),
            }

            // Token is stored before the slot is cleared, so a caller that
            // finds the slot empty also finds the new token.
            inner.in_flight.lock().await.take();
            outcome
        });

        async move {
            handle
                .await
                .unwrap_or_else(|e| Err(format!("token refresh task failed: {}", e)))
        }
        .boxed()
        .shared()
    }
}

impl Inner {
    async fn cached(&self) -> Option<String> {
        let token = self.token.lock().await;
        token
            .as_ref()
            .filter(|token| token.is_valid())
            .map(|token| token.value().to_string())
    }
}

fn auth_message(error: DomainError) -> String {
    match error {
        DomainError::AuthError(message) => message,
        other => other.to_string(),
    }
}
