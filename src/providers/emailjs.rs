// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! EmailJS REST delivery for contact form submissions.

use reqwest::Client;
use serde::Serialize;

use super::{read_reply, ProviderError, ProviderResponse};
use crate::{config::EmailConfig, models::ContactFormRequest};

const SEND_PATH: &str = "/api/v1.0/email/send";

/// Variables substituted into the EmailJS template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactTemplateParams {
    pub from_name: String,
    pub from_email: String,
    pub message: String,
}

impl From<ContactFormRequest> for ContactTemplateParams {
    fn from(form: ContactFormRequest) -> Self {
        Self {
            from_name: form.name,
            from_email: form.email,
            message: form.message,
        }
    }
}

#[derive(Serialize)]
struct SendRequest<'a> {
    service_id: &'a str,
    template_id: &'a str,
    /// EmailJS calls the public key `user_id`.
    user_id: &'a str,
    #[serde(rename = "accessToken")]
    access_token: &'a str,
    template_params: &'a ContactTemplateParams,
}

#[derive(Clone)]
pub struct EmailClient {
    config: EmailConfig,
    http: Client,
}

impl EmailClient {
    pub fn new(config: EmailConfig, http: Client) -> Self {
        Self { config, http }
    }

    /// Send the configured template with `params` and return EmailJS's reply.
    pub async fn send(&self, params: &ContactTemplateParams) -> Result<ProviderResponse, ProviderError> {
        let url = format!("{}{}", self.config.base_url.trim_end_matches('/'), SEND_PATH);
        let body = SendRequest {
            service_id: &self.config.service_id,
            template_id: &self.config.template_id,
            user_id: &self.config.public_key,
            access_token: &self.config.private_key,
            template_params: params,
        };

        let response = self
            .http
            .post(url)
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::Transport(format!("EmailJS send failed: {e}")))?;

        read_reply(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn client(base_url: &str) -> EmailClient {
        EmailClient::new(
            EmailConfig {
                base_url: base_url.to_string(),
                service_id: "service_1".to_string(),
                template_id: "template_1".to_string(),
                public_key: "public-key".to_string(),
                private_key: "private-key".to_string(),
            },
            Client::new(),
        )
    }

    fn params() -> ContactTemplateParams {
        ContactTemplateParams::from(ContactFormRequest {
            name: "Alice".to_string(),
            email: "alice@example.com".to_string(),
            message: "Where can I donate?".to_string(),
        })
    }

    #[tokio::test]
    async fn send_maps_form_onto_template_variables() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST).path(SEND_PATH).json_body(json!({
                    "service_id": "service_1",
                    "template_id": "template_1",
                    "user_id": "public-key",
                    "accessToken": "private-key",
                    "template_params": {
                        "from_name": "Alice",
                        "from_email": "alice@example.com",
                        "message": "Where can I donate?"
                    }
                }));
                then.status(200).header("content-type", "text/plain").body("OK");
            })
            .await;

        let reply = client(&server.base_url()).send(&params()).await.unwrap();

        mock.assert_async().await;
        assert_eq!(&reply.body[..], b"OK");
        assert_eq!(reply.content_type.unwrap(), "text/plain");
    }

    #[tokio::test]
    async fn send_surfaces_provider_rejection() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path(SEND_PATH);
                then.status(400).body("The Public Key is invalid");
            })
            .await;

        let err = client(&server.base_url()).send(&params()).await.unwrap_err();
        assert!(matches!(err, ProviderError::Rejected { status, .. } if status.as_u16() == 400));
    }
}
