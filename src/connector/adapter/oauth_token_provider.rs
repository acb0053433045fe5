use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use serde_json::Value;
use tracing::{debug, warn};

use crate::application::TokenProvider;
use crate::domain::DomainError;

pub const DEFAULT_TOKEN_URL: &str = "http://10.63.0.110:8000/oauth/";

/// Obtains bearer tokens from the OAuth-style token endpoint.
///
/// The endpoint takes an empty `POST` and answers with a JSON object whose
/// `access_token` field holds the token. No other fields are read.
pub struct OAuthTokenProvider {
    client: reqwest::Client,
    url: String,
}

impl OAuthTokenProvider {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, DomainError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DomainError::internal(format!("Failed to build token client: {}", e)))?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl TokenProvider for OAuthTokenProvider {
    async fn fetch_token(&self) -> Result<String, DomainError> {
        debug!("Requesting access token from {}", self.url);

        let response = self
            .client
            .post(&self.url)
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await
            .map_err(|e| DomainError::auth(format!("token request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Token endpoint returned {}: {}", status, body);
            return Err(DomainError::auth(format!(
                "token endpoint returned {}",
                status
            )));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| DomainError::auth(format!("failed to parse token response: {}", e)))?;

        body.get("access_token")
            .and_then(Value::as_str)
            .filter(|token| !token.is_empty())
            .map(str::to_string)
            .ok_or_else(|| DomainError::auth("token response has no access_token"))
    }
}
