// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    http::{Method, StatusCode, Uri},
    middleware,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    auth::middleware::require_session,
    models::{ContactFormRequest, HealthResponse, NotificationRequest, TokenRequest, TokenResponse},
    state::AppState,
};

pub mod contact;
pub mod health;
pub mod notifications;
pub mod tokens;

pub fn router(state: AppState) -> Router {
    let protected = Router::new()
        .route("/sendNotification", post(notifications::send_notification))
        .route("/sendContactForm", post(contact::send_contact_form))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_session));

    let public = Router::new()
        .route("/genToken", post(tokens::generate_token))
        .route("/health", get(health::liveness));

    Router::new()
        .merge(protected)
        .merge(public)
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .fallback(fallback)
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id()),
        )
}

/// Unknown routes answer `404 {"error": "Cannot <METHOD> <path>"}`.
async fn fallback(method: Method, uri: Uri) -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": format!("Cannot {method} {}", uri.path()) })),
    )
}

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        tokens::generate_token,
        notifications::send_notification,
        contact::send_contact_form,
        health::liveness
    ),
    components(
        schemas(
            TokenRequest,
            TokenResponse,
            NotificationRequest,
            ContactFormRequest,
            HealthResponse
        )
    ),
    modifiers(&BearerAuth),
    tags(
        (name = "Auth", description = "Session token issuance"),
        (name = "Relay", description = "Push notification and contact form relays"),
        (name = "Health", description = "Liveness probe")
    )
)]
struct ApiDoc;
