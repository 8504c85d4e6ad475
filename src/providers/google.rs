// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Google OAuth2 access tokens for the Firebase REST APIs.
//!
//! ## Credential Modes
//!
//! - **Service account**: signs an RS256 assertion with the account's private
//!   key and exchanges it at the account's `token_uri` (JWT bearer grant).
//!   The resulting access token is cached until shortly before it expires.
//! - **Static**: a fixed bearer token, for emulators and local testing.

use std::{
    fmt,
    sync::Arc,
    time::{Duration, Instant},
};

use chrono::Utc;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::debug;

use super::ProviderError;

/// Scopes covering Realtime Database reads and FCM sends.
pub const FIREBASE_SCOPES: &str = "https://www.googleapis.com/auth/firebase.database \
    https://www.googleapis.com/auth/firebase.messaging \
    https://www.googleapis.com/auth/userinfo.email";

const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const ASSERTION_LIFETIME_SECS: i64 = 3600;

/// Refresh this long before the provider-reported expiry.
const EXPIRY_MARGIN: Duration = Duration::from_secs(60);

/// Fields of a Google service-account JSON document the relay needs.
#[derive(Clone, Deserialize)]
pub struct ServiceAccountKey {
    #[serde(default)]
    pub project_id: Option<String>,
    #[serde(default)]
    pub private_key_id: Option<String>,
    pub private_key: String,
    pub client_email: String,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

impl ServiceAccountKey {
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }
}

impl fmt::Debug for ServiceAccountKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceAccountKey")
            .field("project_id", &self.project_id)
            .field("client_email", &self.client_email)
            .field("token_uri", &self.token_uri)
            .finish_non_exhaustive()
    }
}

#[derive(Clone)]
pub enum GoogleCredentials {
    ServiceAccount(ServiceAccountKey),
    Static(String),
}

impl fmt::Debug for GoogleCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GoogleCredentials::ServiceAccount(key) => {
                f.debug_tuple("ServiceAccount").field(key).finish()
            }
            GoogleCredentials::Static(_) => f.write_str("Static(<redacted>)"),
        }
    }
}

#[derive(Serialize)]
struct AssertionClaims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default = "default_expires_in")]
    expires_in: u64,
}

fn default_expires_in() -> u64 {
    ASSERTION_LIFETIME_SECS as u64
}

struct CachedToken {
    access_token: String,
    refresh_at: Instant,
}

/// Source of bearer tokens for Firebase requests.
#[derive(Clone)]
pub struct AccessTokenSource {
    credentials: GoogleCredentials,
    http: Client,
    cache: Arc<RwLock<Option<CachedToken>>>,
}

impl AccessTokenSource {
    pub fn new(credentials: GoogleCredentials, http: Client) -> Self {
        Self {
            credentials,
            http,
            cache: Arc::new(RwLock::new(None)),
        }
    }

    /// Return a valid access token, exchanging a new one when the cache is cold.
    pub async fn access_token(&self) -> Result<String, ProviderError> {
        let key = match &self.credentials {
            GoogleCredentials::Static(token) => return Ok(token.clone()),
            GoogleCredentials::ServiceAccount(key) => key,
        };

        {
            let cache = self.cache.read().await;
            if let Some(entry) = &*cache {
                if Instant::now() < entry.refresh_at {
                    return Ok(entry.access_token.clone());
                }
            }
        }

        let fresh = self.exchange(key).await?;
        let access_token = fresh.access_token.clone();
        *self.cache.write().await = Some(fresh);

        Ok(access_token)
    }

    async fn exchange(&self, key: &ServiceAccountKey) -> Result<CachedToken, ProviderError> {
        let assertion = build_assertion(key, Utc::now().timestamp())?;

        let response = self
            .http
            .post(&key.token_uri)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
            .send()
            .await
            .map_err(|e| ProviderError::Auth(format!("token request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Auth(format!(
                "token request returned {status}: {body}"
            )));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Auth(format!("invalid token response: {e}")))?;

        if token.access_token.trim().is_empty() {
            return Err(ProviderError::Auth(
                "token response did not include access_token".to_string(),
            ));
        }

        debug!(
            client_email = %key.client_email,
            expires_in = token.expires_in,
            "Exchanged service account assertion for access token"
        );

        let lifetime = Duration::from_secs(token.expires_in).saturating_sub(EXPIRY_MARGIN);
        Ok(CachedToken {
            access_token: token.access_token,
            refresh_at: Instant::now() + lifetime,
        })
    }
}

/// Sign the JWT bearer assertion for the service account.
fn build_assertion(key: &ServiceAccountKey, now: i64) -> Result<String, ProviderError> {
    let mut header = Header::new(Algorithm::RS256);
    header.kid = key.private_key_id.clone();

    let claims = AssertionClaims {
        iss: &key.client_email,
        scope: FIREBASE_SCOPES,
        aud: &key.token_uri,
        iat: now,
        exp: now + ASSERTION_LIFETIME_SECS,
    };

    let signing_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes())
        .map_err(|e| ProviderError::Auth(format!("invalid service account private key: {e}")))?;

    encode(&header, &claims, &signing_key)
        .map_err(|e| ProviderError::Auth(format!("failed to sign assertion: {e}")))
}
