// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Push notification relay.

use axum::{extract::State, Json};
use tracing::{error, info};

use crate::{
    auth::Session,
    models::NotificationRequest,
    providers::{fcm::PushMessage, ProviderError, ProviderResponse},
    state::AppState,
};

/// Forward a notification to one device through FCM.
///
/// The FCM reply is returned as-is; FCM errors come back with status 500 and
/// FCM's error body.
#[utoipa::path(
    post,
    path = "/sendNotification",
    tag = "Relay",
    security(("bearer" = [])),
    request_body = NotificationRequest,
    responses(
        (status = 200, description = "FCM accepted the message"),
        (status = 401, description = "Missing authorization header"),
        (status = 403, description = "Invalid session token"),
        (status = 500, description = "FCM rejected the message or was unreachable"),
    )
)]
pub async fn send_notification(
    Session(user): Session,
    State(state): State<AppState>,
    Json(request): Json<NotificationRequest>,
) -> Result<ProviderResponse, ProviderError> {
    let message = PushMessage::from(request);

    match state.push.send(&message).await {
        Ok(reply) => {
            info!(
                caller = %user.user_id,
                response = %String::from_utf8_lossy(&reply.body),
                "Successfully sent message"
            );
            Ok(reply)
        }
        Err(e) => {
            error!(caller = %user.user_id, error = %e, "Error sending message");
            Err(e)
        }
    }
}
