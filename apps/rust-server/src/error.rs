// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::{error, warn};

use crate::backend::BackendError;
use crate::notifications::PushError;
use crate::storage::StorageError;

/// Failure of a gateway operation below the HTTP layer.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error(transparent)]
    Backend(#[from] BackendError),

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("push error: {0}")]
    Push(#[from] PushError),

    #[error("key derivation failed: {0}")]
    KeyDerivation(String),

    #[error("{0} not found")]
    NotFound(String),
}

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

/// Every gateway failure is a 500 with a generic body. The detail goes to
/// the log only.
impl From<GatewayError> for ApiError {
    fn from(err: GatewayError) -> Self {
        match &err {
            GatewayError::Backend(e) if !e.is_transport() => {
                warn!(error = %err, "Backend rejected operation");
            }
            GatewayError::NotFound(_) => warn!(error = %err, "Lookup failed"),
            _ => error!(error = %err, "Gateway operation failed"),
        }
        ApiError::internal("Internal server error")
    }
}

impl From<BackendError> for ApiError {
    fn from(err: BackendError) -> Self {
        GatewayError::from(err).into()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorBody {
            error: self.message,
        });
        (self.status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[test]
    fn constructors_set_status_and_message() {
        let bad = ApiError::bad_request("bad");
        assert_eq!(bad.status, StatusCode::BAD_REQUEST);
        assert_eq!(bad.message, "bad");

        let internal = ApiError::internal("boom");
        assert_eq!(internal.status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn into_response_returns_json_body() {
        let response = ApiError::bad_request("bad data").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body_bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = String::from_utf8(body_bytes.to_vec()).unwrap();
        assert_eq!(body, r#"{"error":"bad data"}"#);
    }

    #[test]
    fn gateway_errors_become_generic_500() {
        let cases = [
            GatewayError::Backend(BackendError::Application {
                operation: "list.update",
                status: "conflict".into(),
            }),
            GatewayError::Backend(BackendError::Unavailable {
                service: "list",
                reason: "refused".into(),
            }),
            GatewayError::Storage(StorageError::NotInitialized),
            GatewayError::Push(PushError::NotConfigured),
            GatewayError::NotFound("Subscription".into()),
        ];

        for err in cases {
            let api: ApiError = err.into();
            assert_eq!(api.status, StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(api.message, "Internal server error");
        }
    }
}
