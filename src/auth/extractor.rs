// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Axum extractor for the authenticated caller.
//!
//! ```rust,ignore
//! async fn my_handler(Session(user): Session) -> impl IntoResponse {
//!     // user is AuthenticatedUser
//! }
//! ```

use axum::{extract::FromRequestParts, http::request::Parts};

use super::{middleware::authenticate, AuthError, AuthenticatedUser};
use crate::state::AppState;

/// Extractor for the caller admitted by the session gate.
///
/// Uses the identity the middleware stored in request extensions, and
/// verifies the `Authorization` header itself when mounted without it.
pub struct Session(pub AuthenticatedUser);

impl FromRequestParts<AppState> for Session {
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        if let Some(user) = parts.extensions.get::<AuthenticatedUser>().cloned() {
            return Ok(Session(user));
        }

        let user = authenticate(&parts.headers, &state.tokens)?;
        parts.extensions.insert(user.clone());

        Ok(Session(user))
    }
}
