// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Firebase Cloud Messaging (HTTP v1) push delivery.

use std::collections::BTreeMap;

use reqwest::Client;
use serde::Serialize;
use serde_json::Value;

use super::{google::AccessTokenSource, read_reply, ProviderError, ProviderResponse};
use crate::models::NotificationRequest;

/// Visible part of the notification, rendered by the device OS.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Notification {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

/// An FCM v1 `Message` addressed to one registration token.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PushMessage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    pub notification: Notification,
    /// Opaque key/value payload handed to the app. FCM only accepts strings.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub data: BTreeMap<String, String>,
}

impl From<NotificationRequest> for PushMessage {
    fn from(request: NotificationRequest) -> Self {
        let mut data = BTreeMap::new();
        let fields = [
            ("senderId", request.sender_id),
            ("userId", request.user_id),
            ("profileImage", request.profile_image),
            ("confirmation", request.confirmation.and_then(data_value)),
        ];
        for (key, value) in fields {
            if let Some(value) = value {
                data.insert(key.to_string(), value);
            }
        }

        Self {
            token: request.target_token,
            notification: Notification {
                title: request.title,
                body: request.body,
            },
            data,
        }
    }
}

fn data_value(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

#[derive(Serialize)]
struct SendRequest<'a> {
    message: &'a PushMessage,
}

#[derive(Clone)]
pub struct PushClient {
    base_url: String,
    project_id: String,
    tokens: AccessTokenSource,
    http: Client,
}

impl PushClient {
    pub fn new(
        base_url: impl Into<String>,
        project_id: impl Into<String>,
        tokens: AccessTokenSource,
        http: Client,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            project_id: project_id.into(),
            tokens,
            http,
        }
    }

    /// Submit `message` and return FCM's reply unchanged.
    pub async fn send(&self, message: &PushMessage) -> Result<ProviderResponse, ProviderError> {
        let token = self.tokens.access_token().await?;
        let url = format!(
            "{}/v1/projects/{}/messages:send",
            self.base_url.trim_end_matches('/'),
            self.project_id
        );

        let response = self
            .http
            .post(url)
            .bearer_auth(token)
            .json(&SendRequest { message })
            .send()
            .await
            .map_err(|e| ProviderError::Transport(format!("FCM send failed: {e}")))?;

        read_reply(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::google::GoogleCredentials;
    use httpmock::prelude::*;
    use serde_json::json;

    fn client(base_url: &str) -> PushClient {
        PushClient::new(
            base_url,
            "bloodbank-demo",
            AccessTokenSource::new(GoogleCredentials::Static("ya29.test".to_string()), Client::new()),
            Client::new(),
        )
    }

    fn full_request() -> NotificationRequest {
        NotificationRequest {
            title: Some("Blood request".to_string()),
            body: Some("O+ needed at City Hospital".to_string()),
            sender_id: Some("u1".to_string()),
            user_id: Some("u2".to_string()),
            profile_image: Some("https://cdn.example.com/u1.png".to_string()),
            confirmation: Some(json!(false)),
            target_token: Some("device-token".to_string()),
        }
    }

    #[test]
    fn message_separates_notification_from_data() {
        let message = PushMessage::from(full_request());
        let rendered = serde_json::to_value(SendRequest { message: &message }).unwrap();

        assert_eq!(
            rendered,
            json!({
                "message": {
                    "token": "device-token",
                    "notification": {
                        "title": "Blood request",
                        "body": "O+ needed at City Hospital"
                    },
                    "data": {
                        "senderId": "u1",
                        "userId": "u2",
                        "profileImage": "https://cdn.example.com/u1.png",
                        "confirmation": "false"
                    }
                }
            })
        );
    }

    #[test]
    fn missing_fields_are_omitted() {
        let message = PushMessage::from(NotificationRequest {
            title: Some("Ping".to_string()),
            confirmation: Some(Value::Null),
            ..Default::default()
        });
        let rendered = serde_json::to_value(&message).unwrap();
        assert_eq!(rendered, json!({ "notification": { "title": "Ping" } }));
    }

    #[tokio::test]
    async fn send_posts_to_project_endpoint() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/v1/projects/bloodbank-demo/messages:send")
                    .header("authorization", "Bearer ya29.test")
                    .json_body(json!({
                        "message": {
                            "token": "device-token",
                            "notification": { "title": "Ping" }
                        }
                    }));
                then.status(200)
                    .header("content-type", "application/json")
                    .body(r#"{"name":"projects/bloodbank-demo/messages/0:1700000000"}"#);
            })
            .await;

        let message = PushMessage::from(NotificationRequest {
            title: Some("Ping".to_string()),
            target_token: Some("device-token".to_string()),
            ..Default::default()
        });
        let reply = client(&server.base_url()).send(&message).await.unwrap();

        mock.assert_async().await;
        assert_eq!(
            &reply.body[..],
            br#"{"name":"projects/bloodbank-demo/messages/0:1700000000"}"#
        );
    }

    #[tokio::test]
    async fn send_surfaces_provider_rejection() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/v1/projects/bloodbank-demo/messages:send");
                then.status(404)
                    .header("content-type", "application/json")
                    .body(r#"{"error":{"code":404,"status":"NOT_FOUND"}}"#);
            })
            .await;

        let err = client(&server.base_url())
            .send(&PushMessage::from(full_request()))
            .await
            .unwrap_err();
        match err {
            ProviderError::Rejected { status, body, .. } => {
                assert_eq!(status.as_u16(), 404);
                assert_eq!(&body[..], br#"{"error":{"code":404,"status":"NOT_FOUND"}}"#);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
