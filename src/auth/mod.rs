// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Authentication Module
//!
//! Shared-secret session tokens for the relay API.
//!
//! ## Auth Flow
//!
//! 1. Client posts `userId`, `username` and `password` to `/genToken`
//! 2. Server reads `users/<userId>` from the Realtime Database and compares
//!    name and password exactly
//! 3. On a match the server returns an HS256 JWT carrying `userId`
//! 4. Client sends `Authorization: Bearer <token>` to protected routes
//! 5. The admission gate verifies the signature and attaches the identity
//!
//! ## Status Codes
//!
//! - No `Authorization` header: 401
//! - Header present but token does not verify: 403
//! - Login credentials rejected for any reason: 401

pub mod claims;
pub mod credentials;
pub mod error;
pub mod extractor;
pub mod middleware;
pub mod token;

pub use claims::AuthenticatedUser;
pub use error::AuthError;
pub use extractor::Session;
pub use token::TokenService;
