// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use crate::{
    auth::TokenService,
    config::Config,
    providers::{
        emailjs::EmailClient, fcm::PushClient, firebase::CredentialStore,
        google::AccessTokenSource, http_client, ProviderError,
    },
};

/// Per-process handles shared by every request. Immutable after startup.
#[derive(Clone)]
pub struct AppState {
    pub tokens: TokenService,
    pub credentials: CredentialStore,
    pub push: PushClient,
    pub email: EmailClient,
}

impl AppState {
    pub fn new(config: &Config) -> Result<Self, ProviderError> {
        let http = http_client(config.provider_timeout)?;
        let google = AccessTokenSource::new(config.firebase.credentials.clone(), http.clone());

        Ok(Self {
            tokens: TokenService::new(&config.jwt_secret, config.token_ttl),
            credentials: CredentialStore::new(
                config.firebase.database_url.clone(),
                google.clone(),
                http.clone(),
            ),
            push: PushClient::new(
                config.firebase.fcm_base_url.clone(),
                config.firebase.project_id.clone(),
                google,
                http.clone(),
            ),
            email: EmailClient::new(config.email.clone(), http),
        })
    }
}
