// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # API Data Models
//!
//! Request and response bodies for the HTTP API. Field names follow the
//! camelCase wire format of the mobile and web clients.
//!
//! Request fields default to empty values when missing: completeness is the
//! caller's responsibility, and an incomplete request simply fails at the
//! credential check or at the provider.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// =============================================================================
// Session Tokens
// =============================================================================

/// Credentials presented to `POST /genToken`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct TokenRequest {
    /// Key of the user record in the credential store.
    pub user_id: String,
    /// Claimed display name; must equal the stored `name`.
    pub username: String,
    /// Claimed password; must equal the stored `password`.
    pub password: String,
}

/// A freshly issued session token.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TokenResponse {
    pub token: String,
}

// =============================================================================
// Relays
// =============================================================================

/// Push notification to forward to a single device.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct NotificationRequest {
    pub title: Option<String>,
    pub body: Option<String>,
    pub sender_id: Option<String>,
    pub user_id: Option<String>,
    pub profile_image: Option<String>,
    /// Confirmation flag or value; forwarded to the device as a string.
    #[schema(value_type = Option<Object>)]
    pub confirmation: Option<serde_json::Value>,
    /// FCM registration token of the receiving device.
    pub target_token: Option<String>,
}

/// Contact form submission to forward by email.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct ContactFormRequest {
    pub name: String,
    pub email: String,
    pub message: String,
}

// =============================================================================
// Health
// =============================================================================

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
}
