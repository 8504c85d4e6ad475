// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Clients for the external managed services the relay depends on.
//!
//! - `google` - OAuth2 access tokens for Firebase APIs
//! - `firebase` - Realtime Database user lookups
//! - `fcm` - Firebase Cloud Messaging push delivery
//! - `emailjs` - EmailJS transactional email

use std::time::Duration;

use axum::{
    body::Bytes,
    http::{header::CONTENT_TYPE, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use reqwest::Client;
use serde::Serialize;

pub mod emailjs;
pub mod fcm;
pub mod firebase;
pub mod google;

/// A successful provider reply, relayed to the caller unchanged.
#[derive(Debug, Clone)]
pub struct ProviderResponse {
    pub content_type: Option<HeaderValue>,
    pub body: Bytes,
}

#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("provider authentication failed: {0}")]
    Auth(String),

    #[error("provider request failed: {0}")]
    Transport(String),

    #[error("provider returned {status}: {}", String::from_utf8_lossy(.body))]
    Rejected {
        status: StatusCode,
        content_type: Option<HeaderValue>,
        body: Bytes,
    },

    #[error("provider response was invalid: {0}")]
    InvalidResponse(String),
}

impl ProviderError {
    pub fn error_code(&self) -> &'static str {
        match self {
            ProviderError::Auth(_) => "provider_auth_failed",
            ProviderError::Transport(_) => "provider_unreachable",
            ProviderError::Rejected { .. } => "provider_rejected",
            ProviderError::InvalidResponse(_) => "provider_invalid_response",
        }
    }
}

#[derive(Serialize)]
struct ProviderErrorBody {
    error: String,
    error_code: String,
}

impl IntoResponse for ProviderResponse {
    fn into_response(self) -> Response {
        with_content_type(StatusCode::OK, self.content_type, self.body)
    }
}

impl IntoResponse for ProviderError {
    fn into_response(self) -> Response {
        match self {
            // The provider's own error document goes back verbatim.
            ProviderError::Rejected {
                content_type, body, ..
            } => with_content_type(StatusCode::INTERNAL_SERVER_ERROR, content_type, body),
            other => {
                let body = Json(ProviderErrorBody {
                    error: other.to_string(),
                    error_code: other.error_code().to_string(),
                });
                (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
            }
        }
    }
}

fn with_content_type(status: StatusCode, content_type: Option<HeaderValue>, body: Bytes) -> Response {
    match content_type {
        Some(content_type) => (status, [(CONTENT_TYPE, content_type)], body).into_response(),
        None => (status, body).into_response(),
    }
}

/// Build the HTTP client shared by all provider clients.
pub fn http_client(timeout: Duration) -> Result<Client, ProviderError> {
    Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| ProviderError::Transport(format!("failed to build HTTP client: {e}")))
}

/// Read a provider reply, splitting success from rejection by status code.
pub(crate) async fn read_reply(response: reqwest::Response) -> Result<ProviderResponse, ProviderError> {
    let status = response.status();
    let content_type = response.headers().get(CONTENT_TYPE).cloned();
    let body = response
        .bytes()
        .await
        .map_err(|e| ProviderError::Transport(format!("failed to read response body: {e}")))?;

    if status.is_success() {
        Ok(ProviderResponse { content_type, body })
    } else {
        Err(ProviderError::Rejected {
            status,
            content_type,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[tokio::test]
    async fn rejected_error_passes_provider_body_through() {
        let err = ProviderError::Rejected {
            status: StatusCode::BAD_REQUEST,
            content_type: Some(HeaderValue::from_static("application/json")),
            body: Bytes::from_static(br#"{"error":{"code":400,"status":"INVALID_ARGUMENT"}}"#),
        };
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.headers()[CONTENT_TYPE], "application/json");

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], br#"{"error":{"code":400,"status":"INVALID_ARGUMENT"}}"#);
    }

    #[tokio::test]
    async fn transport_error_renders_json_body() {
        let response = ProviderError::Transport("connection refused".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["error_code"], "provider_unreachable");
    }

    #[tokio::test]
    async fn provider_response_is_relayed_with_ok_status() {
        let response = ProviderResponse {
            content_type: Some(HeaderValue::from_static("text/plain")),
            body: Bytes::from_static(b"OK"),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[CONTENT_TYPE], "text/plain");

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"OK");
    }

    #[test]
    fn rejected_display_includes_body() {
        let err = ProviderError::Rejected {
            status: StatusCode::FORBIDDEN,
            content_type: None,
            body: Bytes::from_static(b"The user ID is invalid"),
        };
        assert_eq!(
            err.to_string(),
            "provider returned 403 Forbidden: The user ID is invalid"
        );
    }
}
