// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{config::ConfigError, sweep::SweepError};

/// Failure of a sweep request.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    pub details: Option<String>,
    pub code: Option<i64>,
    pub reason: Option<String>,
}

/// JSON body for a failed sweep request.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Always `false`
    pub success: bool,
    /// Failure class or configuration problem
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    /// JSON-RPC error code returned by the node
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<i64>,
    /// Revert data or reason returned by the node
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            details: None,
            code: None,
            reason: None,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

impl From<&ConfigError> for ApiError {
    fn from(err: &ConfigError) -> Self {
        ApiError::internal(err.to_string())
    }
}

impl From<SweepError> for ApiError {
    fn from(err: SweepError) -> Self {
        match err {
            SweepError::Configuration(msg) => {
                ApiError::internal("Configuration error").with_details(msg)
            }
            SweepError::Network(_) | SweepError::ChainMismatch { .. } => {
                ApiError::internal("Network error").with_details(err.to_string())
            }
            SweepError::Transaction {
                message,
                code,
                reason,
            } => ApiError {
                code,
                reason,
                ..ApiError::internal("Transaction failed").with_details(message)
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorBody {
            success: false,
            error: self.message,
            details: self.details,
            code: self.code,
            reason: self.reason,
        });
        (self.status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[test]
    fn sweep_errors_map_to_500_with_class() {
        let err = ApiError::from(SweepError::Network("token balance: RPC error: refused".into()));
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message, "Network error");
        assert!(err.details.unwrap().contains("refused"));

        let err = ApiError::from(SweepError::ChainMismatch {
            expected: 8453,
            actual: 1,
        });
        assert_eq!(err.message, "Network error");

        let err = ApiError::from(SweepError::Transaction {
            message: "Failed to send: nonce too low".into(),
            code: Some(-32000),
            reason: None,
        });
        assert_eq!(err.message, "Transaction failed");
        assert_eq!(err.code, Some(-32000));
    }

    #[tokio::test]
    async fn config_error_body_names_missing_variable() {
        let response =
            ApiError::from(&ConfigError::Missing("WALLET_PRIVATE_KEY")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body_bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = String::from_utf8(body_bytes.to_vec()).unwrap();
        assert_eq!(
            body,
            r#"{"success":false,"error":"WALLET_PRIVATE_KEY not configured"}"#
        );
    }
}
