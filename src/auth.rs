//! OAuth2 client-credentials token cache for the upstream tracking API.

use std::sync::Arc;
use std::time::{Duration, Instant};

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde::Deserialize;
use tokio::sync::RwLock;

use crate::config::Config;
use crate::errors::AppError;

/// Safety margin subtracted from the upstream `expires_in` so a token is
/// never used right at its expiry.
const EXPIRY_MARGIN: Duration = Duration::from_secs(60);

#[derive(Clone)]
struct CachedToken {
    value: String,
    expires_at: Instant,
}

/// Single-slot bearer-token cache, shared across requests.
///
/// Cheaply cloneable; all clones share the same slot. A valid cached token
/// is returned without I/O, otherwise the configured client credentials are
/// exchanged for a fresh one. No retry is performed here — callers decide.
#[derive(Clone)]
pub struct TokenCache {
    auth_url: String,
    client_id: Option<String>,
    client_secret: Option<String>,
    client: reqwest::Client,
    slot: Arc<RwLock<Option<CachedToken>>>,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: u64,
}

impl TokenCache {
    pub fn new(config: &Config) -> Self {
        Self {
            auth_url: config.auth_url.clone(),
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            client: reqwest::Client::new(),
            slot: Arc::new(RwLock::new(None)),
        }
    }

    /// Return a bearer token, refreshing it through the token endpoint when
    /// the cached one is missing or past its margin.
    pub async fn get_token(&self) -> Result<String, AppError> {
        if let Some(token) = self.slot.read().await.as_ref() {
            if Instant::now() < token.expires_at {
                return Ok(token.value.clone());
            }
        }

        // Refresh under the write lock; a racing caller re-checks the slot
        // so concurrent expiry costs at most one extra upstream call.
        let mut slot = self.slot.write().await;
        if let Some(token) = slot.as_ref() {
            if Instant::now() < token.expires_at {
                return Ok(token.value.clone());
            }
        }

        let (client_id, client_secret) = match (&self.client_id, &self.client_secret) {
            (Some(id), Some(secret)) => (id, secret),
            _ => return Err(AppError::AuthConfig),
        };

        let credentials = BASE64.encode(format!("{}:{}", client_id, client_secret));
        let resp = self
            .client
            .post(&self.auth_url)
            .header("Authorization", format!("Basic {}", credentials))
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body("grant_type=client_credentials")
            .send()
            .await
            .map_err(|e| AppError::AuthUpstream(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(AppError::AuthUpstream(format!(
                "token endpoint returned {}",
                status
            )));
        }

        let body: TokenResponse = resp
            .json()
            .await
            .map_err(|e| AppError::AuthUpstream(e.to_string()))?;

        let ttl = Duration::from_secs(body.expires_in.saturating_sub(EXPIRY_MARGIN.as_secs()));
        *slot = Some(CachedToken {
            value: body.access_token.clone(),
            expires_at: Instant::now() + ttl,
        });
        tracing::debug!("obtained new access token (ttl {}s)", ttl.as_secs());

        Ok(body.access_token)
    }

    /// Drop the cached token; the next `get_token` call refreshes.
    pub async fn invalidate(&self) {
        *self.slot.write().await = None;
    }
}
