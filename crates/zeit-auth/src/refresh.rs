//! Token refresh collaborator.
//!
//! The request pipeline performs exactly one refresh attempt when the server
//! answers 401/403. What "refresh" means is up to the implementation; the
//! backend variant exchanges the expired bearer token at the auth router's
//! refresh route.

use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{AuthError, Result};

/// Exchanges an expired session token for a fresh one.
#[async_trait]
pub trait TokenRefresher: Send + Sync + std::fmt::Debug {
    /// Attempt a refresh. Returns the new token on success.
    async fn refresh(&self, expired: &str) -> Result<String>;
}

#[derive(Debug, Serialize)]
struct RefreshRequest<'a> {
    token: &'a str,
}

#[derive(Debug, Deserialize)]
struct RefreshResponse {
    access_token: String,
}

// ============================================================================
// HttpTokenRefresher
// ============================================================================

/// Refresher that exchanges the expired token against the backend.
#[derive(Debug, Clone)]
pub struct HttpTokenRefresher {
    http: reqwest::Client,
    refresh_url: String,
}

impl HttpTokenRefresher {
    /// Create a refresher posting to the given refresh endpoint URL.
    pub fn new(refresh_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            refresh_url: refresh_url.into(),
        }
    }
}

#[async_trait]
impl TokenRefresher for HttpTokenRefresher {
    async fn refresh(&self, expired: &str) -> Result<String> {
        let response = self
            .http
            .post(&self.refresh_url)
            .header("Content-Type", "application/json")
            .json(&RefreshRequest { token: expired })
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(AuthError::Refresh(format!(
                "refresh endpoint returned {status}: {body}"
            )));
        }

        let tokens: RefreshResponse = response
            .json()
            .await
            .map_err(|e| AuthError::Refresh(format!("invalid refresh response: {e}")))?;

        if tokens.access_token.is_empty() {
            return Err(AuthError::Refresh("empty access token".to_string()));
        }

        tracing::info!("session token refreshed");
        Ok(tokens.access_token)
    }
}

// ============================================================================
// StaticTokenRefresher (for testing)
// ============================================================================

/// Fixed-outcome refresher for testing. Counts how often it was asked.
#[derive(Debug)]
pub struct StaticTokenRefresher {
    token: Option<String>,
    calls: AtomicU32,
}

impl StaticTokenRefresher {
    /// A refresher that always succeeds with the given token.
    pub fn returning(token: &str) -> Self {
        Self {
            token: Some(token.to_string()),
            calls: AtomicU32::new(0),
        }
    }

    /// A refresher that always fails.
    pub fn failing() -> Self {
        Self {
            token: None,
            calls: AtomicU32::new(0),
        }
    }

    /// How often `refresh` has been called.
    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TokenRefresher for StaticTokenRefresher {
    async fn refresh(&self, _expired: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.token {
            Some(token) => Ok(token.clone()),
            None => Err(AuthError::Refresh("refresh rejected".to_string())),
        }
    }
}
