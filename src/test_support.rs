// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Shared fixtures for unit tests.

use std::collections::HashMap;

use crate::{
    config::{
        Config, ACCESS_TOKEN_ENV, DB_URL_ENV, EMAILJS_BASE_URL_ENV, EMAIL_PRIVATE_KEY_ENV,
        EMAIL_PUBLIC_KEY_ENV, EMAIL_SERVICE_ID_ENV, EMAIL_TEMPLATE_ID_ENV, FCM_BASE_URL_ENV,
        JWT_SECRET_ENV, PROJECT_ID_ENV,
    },
    state::AppState,
};

pub const TEST_SECRET: &str = "test-jwt-secret";
pub const TEST_ACCESS_TOKEN: &str = "ya29.test";
pub const TEST_PROJECT: &str = "bloodbank-demo";

/// Configuration with every provider pointed at `base_url`.
pub fn test_config(base_url: &str) -> Config {
    let env = HashMap::from([
        (DB_URL_ENV, base_url.to_string()),
        (FCM_BASE_URL_ENV, base_url.to_string()),
        (EMAILJS_BASE_URL_ENV, base_url.to_string()),
        (JWT_SECRET_ENV, TEST_SECRET.to_string()),
        (ACCESS_TOKEN_ENV, TEST_ACCESS_TOKEN.to_string()),
        (PROJECT_ID_ENV, TEST_PROJECT.to_string()),
        (EMAIL_SERVICE_ID_ENV, "service_1".to_string()),
        (EMAIL_TEMPLATE_ID_ENV, "template_1".to_string()),
        (EMAIL_PUBLIC_KEY_ENV, "public-key".to_string()),
        (EMAIL_PRIVATE_KEY_ENV, "private-key".to_string()),
    ]);

    Config::from_lookup(|name| env.get(name).cloned()).expect("test config is valid")
}

pub fn test_state(base_url: &str) -> AppState {
    AppState::new(&test_config(base_url)).expect("test state builds")
}
