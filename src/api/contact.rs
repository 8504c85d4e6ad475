// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Contact form relay.

use axum::{extract::State, Json};
use tracing::{error, info};

use crate::{
    auth::Session,
    models::ContactFormRequest,
    providers::{emailjs::ContactTemplateParams, ProviderError, ProviderResponse},
    state::AppState,
};

#[utoipa::path(
    post,
    path = "/sendContactForm",
    tag = "Relay",
    security(("bearer" = [])),
    request_body = ContactFormRequest,
    responses(
        (status = 200, description = "EmailJS accepted the submission"),
        (status = 401, description = "Missing authorization header"),
        (status = 403, description = "Invalid session token"),
        (status = 500, description = "EmailJS rejected the submission or was unreachable"),
    )
)]
pub async fn send_contact_form(
    Session(user): Session,
    State(state): State<AppState>,
    Json(form): Json<ContactFormRequest>,
) -> Result<ProviderResponse, ProviderError> {
    let params = ContactTemplateParams::from(form);

    match state.email.send(&params).await {
        Ok(reply) => {
            info!(
                caller = %user.user_id,
                response = %String::from_utf8_lossy(&reply.body),
                "Successfully sent contact form"
            );
            Ok(reply)
        }
        Err(e) => {
            error!(caller = %user.user_id, error = %e, "Error sending contact form");
            Err(e)
        }
    }
}
