// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Axum extractor for the shared-secret check.
//!
//! Put `ApiKey` first in a handler's argument list so it runs before any
//! other extractor:
//!
//! ```rust,ignore
//! async fn my_handler(_: ApiKey, State(state): State<AppState>) -> impl IntoResponse {
//!     // only reached with a valid secret
//! }
//! ```

use axum::{extract::FromRequestParts, http::request::Parts};

use super::AuthError;
use crate::state::AppState;

/// Header carrying the shared secret.
pub const API_SECRET_HEADER: &str = "x-api-secret";

/// Proof that the request presented the configured secret.
#[derive(Debug)]
pub struct ApiKey;

impl FromRequestParts<AppState> for ApiKey {
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let expected = state
            .auth_config
            .api_secret
            .as_ref()
            .ok_or(AuthError::NotConfigured)?;

        let presented = parts
            .headers
            .get(API_SECRET_HEADER)
            .ok_or(AuthError::MissingSecret)?;

        if expected.matches(presented.as_bytes()) {
            Ok(ApiKey)
        } else {
            Err(AuthError::InvalidSecret)
        }
    }
}
