// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Read-only client for user records in Firebase Realtime Database.
//!
//! Records live at `users/<userId>` and are fetched through the REST API
//! (`GET <DB_URL>/users/<userId>.json`). An absent record comes back as
//! JSON `null`.

use reqwest::Client;
use serde::Deserialize;
use tracing::debug;
use url::Url;

use super::{google::AccessTokenSource, read_reply, ProviderError};

/// A stored user as far as the credential check is concerned.
///
/// Any further fields in the stored document are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UserRecord {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// Whether `key` can address a single child node in the database.
pub fn is_valid_key(key: &str) -> bool {
    !key.is_empty()
        && !key
            .chars()
            .any(|c| matches!(c, '.' | '$' | '#' | '[' | ']' | '/') || c.is_ascii_control())
}

#[derive(Clone)]
pub struct CredentialStore {
    database_url: Url,
    tokens: AccessTokenSource,
    http: Client,
}

impl CredentialStore {
    pub fn new(database_url: Url, tokens: AccessTokenSource, http: Client) -> Self {
        Self {
            database_url,
            tokens,
            http,
        }
    }

    /// Fetch the record stored under `users/<user_id>`.
    pub async fn read_user(&self, user_id: &str) -> Result<Option<UserRecord>, ProviderError> {
        let url = self.user_url(user_id)?;
        let token = self.tokens.access_token().await?;

        let response = self
            .http
            .get(url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| ProviderError::Transport(format!("user lookup failed: {e}")))?;
        let reply = read_reply(response).await?;

        let record: Option<UserRecord> = serde_json::from_slice(&reply.body)
            .map_err(|e| ProviderError::InvalidResponse(format!("user record: {e}")))?;

        debug!(user_id = %user_id, found = record.is_some(), "Read user record");
        Ok(record)
    }

    fn user_url(&self, user_id: &str) -> Result<Url, ProviderError> {
        let mut url = self.database_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                ProviderError::InvalidResponse("database URL cannot carry a path".to_string())
            })?
            .pop_if_empty()
            .push("users")
            .push(&format!("{user_id}.json"));
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::google::GoogleCredentials;
    use httpmock::prelude::*;

    fn store(base_url: &str) -> CredentialStore {
        CredentialStore::new(
            Url::parse(base_url).unwrap(),
            AccessTokenSource::new(GoogleCredentials::Static("owner".to_string()), Client::new()),
            Client::new(),
        )
    }

    #[test]
    fn keys_with_path_characters_are_invalid() {
        assert!(is_valid_key("u1"));
        assert!(is_valid_key("-NxA9c_user"));
        assert!(!is_valid_key(""));
        assert!(!is_valid_key("u1/../admins"));
        assert!(!is_valid_key("a.b"));
        assert!(!is_valid_key("$uid"));
        assert!(!is_valid_key("line\nbreak"));
    }

    #[test]
    fn user_url_appends_json_suffix() {
        let url = store("https://demo.firebaseio.com/").user_url("u1").unwrap();
        assert_eq!(url.as_str(), "https://demo.firebaseio.com/users/u1.json");
    }

    #[test]
    fn user_url_encodes_identifier() {
        let url = store("https://demo.firebaseio.com").user_url("a b?c").unwrap();
        assert_eq!(url.as_str(), "https://demo.firebaseio.com/users/a%20b%3Fc.json");
    }

    #[tokio::test]
    async fn read_user_returns_stored_record() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/users/u1.json")
                    .header("authorization", "Bearer owner");
                then.status(200)
                    .header("content-type", "application/json")
                    .body(r#"{"name":"alice","password":"pw1","bloodGroup":"O+"}"#);
            })
            .await;

        let record = store(&server.base_url())
            .read_user("u1")
            .await
            .expect("lookup succeeds");

        mock.assert_async().await;
        assert_eq!(
            record,
            Some(UserRecord {
                name: Some("alice".to_string()),
                password: Some("pw1".to_string()),
            })
        );
    }

    #[tokio::test]
    async fn read_user_maps_null_to_none() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/users/ghost.json");
                then.status(200)
                    .header("content-type", "application/json")
                    .body("null");
            })
            .await;

        let record = store(&server.base_url()).read_user("ghost").await.unwrap();
        assert_eq!(record, None);
    }

    #[tokio::test]
    async fn read_user_surfaces_permission_denied() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/users/u1.json");
                then.status(401)
                    .header("content-type", "application/json")
                    .body(r#"{"error":"Permission denied"}"#);
            })
            .await;

        let err = store(&server.base_url()).read_user("u1").await.unwrap_err();
        assert!(matches!(err, ProviderError::Rejected { status, .. } if status.as_u16() == 401));
    }
}
