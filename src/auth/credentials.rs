// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Login credential check against the stored user record.
//!
//! Every failure reason maps to the same [`AuthError::AuthenticationFailed`]
//! for the caller; the reason itself is only logged.
//!
//! Passwords are stored and compared as plaintext, matching the records
//! already present in the database.

use super::AuthError;
use crate::providers::{
    firebase::{is_valid_key, CredentialStore},
    ProviderError,
};

#[derive(Debug, thiserror::Error)]
pub enum CredentialCheckError {
    #[error("user identifier is not a valid record key")]
    InvalidIdentifier,

    #[error("no user record for identifier")]
    UserNotFound,

    #[error("name does not match stored record")]
    NameMismatch,

    #[error("password does not match stored record")]
    PasswordMismatch,

    #[error("credential store unavailable: {0}")]
    StoreUnavailable(#[from] ProviderError),
}

impl CredentialCheckError {
    pub fn reason(&self) -> &'static str {
        match self {
            CredentialCheckError::InvalidIdentifier => "invalid_identifier",
            CredentialCheckError::UserNotFound => "user_not_found",
            CredentialCheckError::NameMismatch => "name_mismatch",
            CredentialCheckError::PasswordMismatch => "password_mismatch",
            CredentialCheckError::StoreUnavailable(_) => "store_unavailable",
        }
    }
}

impl From<CredentialCheckError> for AuthError {
    fn from(_: CredentialCheckError) -> Self {
        AuthError::AuthenticationFailed
    }
}

/// Check `(user_id, username, password)` against the stored record.
pub async fn check_credentials(
    store: &CredentialStore,
    user_id: &str,
    username: &str,
    password: &str,
) -> Result<(), CredentialCheckError> {
    if !is_valid_key(user_id) {
        return Err(CredentialCheckError::InvalidIdentifier);
    }

    let record = store
        .read_user(user_id)
        .await?
        .ok_or(CredentialCheckError::UserNotFound)?;

    if record.name.as_deref() != Some(username) {
        return Err(CredentialCheckError::NameMismatch);
    }
    if record.password.as_deref() != Some(password) {
        return Err(CredentialCheckError::PasswordMismatch);
    }

    Ok(())
}
