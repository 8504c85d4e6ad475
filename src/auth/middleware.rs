// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Admission gate for protected routes.
//!
//! Applied with `route_layer` so it runs before any body extraction:
//!
//! ```rust,ignore
//! let protected = Router::new()
//!     .route("/sendNotification", post(send_notification))
//!     .route_layer(axum::middleware::from_fn_with_state(
//!         state.clone(),
//!         require_session,
//!     ));
//! ```

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::debug;

use super::{token::TokenService, AuthError, AuthenticatedUser};
use crate::state::AppState;

/// Authentication middleware function.
///
/// On success the verified [`AuthenticatedUser`] is added to the request
/// extensions before the downstream handler runs.
pub async fn require_session(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    match authenticate(request.headers(), &state.tokens) {
        Ok(user) => {
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        Err(e) => {
            debug!(
                path = %request.uri().path(),
                error_code = e.error_code(),
                "Rejected request at admission gate"
            );
            e.into_response()
        }
    }
}

/// Verify the bearer token in `headers`.
///
/// A blank `Authorization` value counts as no header at all.
pub fn authenticate(headers: &HeaderMap, tokens: &TokenService) -> Result<AuthenticatedUser, AuthError> {
    let auth_header = headers
        .get(AUTHORIZATION)
        .ok_or(AuthError::MissingAuthHeader)?
        .to_str()
        .map_err(|_| AuthError::InvalidAuthHeader)?
        .trim();
    if auth_header.is_empty() {
        return Err(AuthError::MissingAuthHeader);
    }

    let token = match auth_header.split_once(' ') {
        Some((scheme, token)) if scheme.eq_ignore_ascii_case("Bearer") => token.trim(),
        _ => return Err(AuthError::InvalidAuthHeader),
    };

    tokens.verify(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn missing_header_is_missing_credential() {
        let tokens = TokenService::new("secret", None);
        assert!(matches!(
            authenticate(&HeaderMap::new(), &tokens),
            Err(AuthError::MissingAuthHeader)
        ));
    }

    #[test]
    fn non_bearer_header_is_invalid() {
        let tokens = TokenService::new("secret", None);
        let token = tokens.issue("u1").unwrap();

        for value in [token.clone(), format!("Basic {token}"), "Bearer".to_string()] {
            assert!(
                matches!(authenticate(&headers(&value), &tokens), Err(AuthError::InvalidAuthHeader)),
                "{value:?}"
            );
        }
    }

    #[test]
    fn bearer_scheme_is_case_insensitive() {
        let tokens = TokenService::new("secret", None);
        let token = tokens.issue("u1").unwrap();

        let user = authenticate(&headers(&format!("bearer {token}")), &tokens).unwrap();
        assert_eq!(user.user_id, "u1");
    }

    #[test]
    fn blank_header_is_missing_credential() {
        let tokens = TokenService::new("secret", None);
        for value in ["", "   "] {
            assert!(
                matches!(authenticate(&headers(value), &tokens), Err(AuthError::MissingAuthHeader)),
                "{value:?}"
            );
        }
    }

    #[test]
    fn bearer_without_token_is_invalid_header() {
        let tokens = TokenService::new("secret", None);
        for value in ["Bearer", "Bearer  ", "bearer\t"] {
            assert!(
                matches!(authenticate(&headers(value), &tokens), Err(AuthError::InvalidAuthHeader)),
                "{value:?}"
            );
        }
    }
}
