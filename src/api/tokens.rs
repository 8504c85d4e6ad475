// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Session token issuance.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use tracing::{info, warn};

use crate::{
    auth::{credentials::check_credentials, AuthError},
    models::{TokenRequest, TokenResponse},
    state::AppState,
};

/// Exchange user credentials for a session token.
///
/// Unknown users and wrong names or passwords are indistinguishable to the
/// caller; all of them return 401. A body that is not a JSON object of
/// string fields is a credential mismatch too, not a client error.
#[utoipa::path(
    post,
    path = "/genToken",
    tag = "Auth",
    request_body = TokenRequest,
    responses(
        (status = 200, description = "Credentials accepted", body = TokenResponse),
        (status = 401, description = "Credentials rejected"),
    )
)]
pub async fn generate_token(
    State(state): State<AppState>,
    request: Result<Json<TokenRequest>, JsonRejection>,
) -> Result<Json<TokenResponse>, AuthError> {
    let request = match request {
        Ok(Json(request)) => request,
        Err(rejection) => {
            warn!(
                reason = "unreadable_body",
                error = %rejection.body_text(),
                "Credential check failed"
            );
            return Err(AuthError::AuthenticationFailed);
        }
    };

    if let Err(e) = check_credentials(
        &state.credentials,
        &request.user_id,
        &request.username,
        &request.password,
    )
    .await
    {
        warn!(
            user_id = %request.user_id,
            reason = e.reason(),
            error = %e,
            "Credential check failed"
        );
        return Err(e.into());
    }

    let token = state.tokens.issue(&request.user_id)?;
    info!(user_id = %request.user_id, "Issued session token");

    Ok(Json(TokenResponse { token }))
}
