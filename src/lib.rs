// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Relay Server - Push Notification & Contact Form Relay
//!
//! Authenticates callers with shared-secret session tokens and forwards their
//! requests to managed providers.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum)
//! - `auth` - Session tokens, admission gate, credential check
//! - `providers` - Firebase (Realtime Database, FCM) and EmailJS clients
//! - `config` - Environment configuration
//! - `telemetry` - Tracing subscriber setup

pub mod api;
pub mod auth;
pub mod config;
pub mod models;
pub mod providers;
pub mod state;
pub mod telemetry;

#[cfg(test)]
mod test_support;
