// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authentication errors.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Authentication error type.
///
/// All variants answer 401 with a body that carries no balance,
/// address or configuration data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// No `x-api-secret` header present
    MissingSecret,
    /// Header present but does not match
    InvalidSecret,
    /// The server has no secret configured, so nothing can match
    NotConfigured,
}

#[derive(Serialize)]
struct AuthErrorBody {
    error: String,
    error_code: String,
}

impl AuthError {
    /// Get the error code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::MissingSecret => "missing_api_secret",
            // Callers cannot tell a misconfigured server from a wrong secret.
            AuthError::InvalidSecret | AuthError::NotConfigured => "invalid_api_secret",
        }
    }

    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        StatusCode::UNAUTHORIZED
    }
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthError::MissingSecret => write!(f, "Unauthorized: x-api-secret header is required"),
            AuthError::InvalidSecret | AuthError::NotConfigured => {
                write!(f, "Unauthorized: invalid API secret")
            }
        }
    }
}

impl std::error::Error for AuthError {}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        if self == AuthError::NotConfigured {
            tracing::error!("Rejected request: API_SECRET is not configured");
        } else {
            tracing::warn!(error_code = self.error_code(), "Rejected unauthenticated request");
        }

        let status = self.status_code();
        let body = Json(AuthErrorBody {
            error: self.to_string(),
            error_code: self.error_code().to_string(),
        });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[tokio::test]
    async fn missing_secret_returns_401() {
        let response = AuthError::MissingSecret.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let body_bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();
        assert_eq!(body["error_code"], "missing_api_secret");
    }

    #[tokio::test]
    async fn unconfigured_server_looks_like_wrong_secret() {
        let unconfigured = AuthError::NotConfigured.into_response();
        let wrong = AuthError::InvalidSecret.into_response();
        assert_eq!(unconfigured.status(), StatusCode::UNAUTHORIZED);

        let a = to_bytes(unconfigured.into_body(), usize::MAX).await.unwrap();
        let b = to_bytes(wrong.into_body(), usize::MAX).await.unwrap();
        assert_eq!(a, b);
    }
}
