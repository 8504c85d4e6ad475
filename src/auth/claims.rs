// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Session token claims and authenticated user representation.

use serde::{Deserialize, Serialize};

/// Claims carried by a session token.
///
/// `exp` is only written when a token lifetime is configured.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    #[serde(rename = "userId")]
    pub user_id: String,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
}

/// Authenticated user information extracted from a verified session token.
///
/// Inserted into request extensions by the admission gate and read by
/// protected handlers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// User record key the token was issued for
    pub user_id: String,

    /// Issuance time (Unix timestamp)
    pub issued_at: i64,

    /// Expiration (Unix timestamp), absent for non-expiring tokens
    pub expires_at: Option<i64>,
}

impl AuthenticatedUser {
    /// Create from verified session claims.
    pub fn from_claims(claims: SessionClaims) -> Self {
        Self {
            user_id: claims.user_id,
            issued_at: claims.iat,
            expires_at: claims.exp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn claims_use_camel_case_user_id() {
        let claims = SessionClaims {
            user_id: "u1".to_string(),
            iat: 1700000000,
            exp: None,
        };
        assert_eq!(
            serde_json::to_value(&claims).unwrap(),
            json!({ "userId": "u1", "iat": 1700000000 })
        );
    }

    #[test]
    fn from_claims_carries_expiry() {
        let user = AuthenticatedUser::from_claims(SessionClaims {
            user_id: "u1".to_string(),
            iat: 1700000000,
            exp: Some(1700003600),
        });
        assert_eq!(user.user_id, "u1");
        assert_eq!(user.issued_at, 1700000000);
        assert_eq!(user.expires_at, Some(1700003600));
    }
}
