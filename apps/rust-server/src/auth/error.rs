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
/// Missing or malformed identity headers are rejected before any backend
/// call. `Rejected` means the identity service answered "not valid";
/// `ValidationUnavailable` means it could not be asked.
#[derive(Debug)]
pub enum AuthError {
    /// No `X-User-Subject` header, or an empty one
    MissingSubject,
    /// No bearer token
    MissingAccessToken,
    /// Authorization header present but not `Bearer <token>`
    InvalidAuthHeader,
    /// Identity service reported the principal as invalid
    Rejected,
    /// Identity service could not be reached or answered garbage
    ValidationUnavailable(String),
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
            AuthError::MissingSubject => "missing_subject",
            AuthError::MissingAccessToken => "missing_access_token",
            AuthError::InvalidAuthHeader => "invalid_auth_header",
            AuthError::Rejected => "invalid_credentials",
            AuthError::ValidationUnavailable(_) => "validation_unavailable",
        }
    }

    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::MissingSubject
            | AuthError::MissingAccessToken
            | AuthError::InvalidAuthHeader
            | AuthError::Rejected => StatusCode::UNAUTHORIZED,
            AuthError::ValidationUnavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthError::MissingSubject => write!(f, "X-User-Subject header is required"),
            AuthError::MissingAccessToken => write!(f, "Bearer access token is required"),
            AuthError::InvalidAuthHeader => {
                write!(f, "Invalid authorization header format (expected 'Bearer <token>')")
            }
            AuthError::Rejected => write!(f, "Invalid credentials"),
            // The reason is logged, never sent to the client.
            AuthError::ValidationUnavailable(_) => write!(f, "Unable to validate credentials"),
        }
    }
}

impl std::error::Error for AuthError {}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(AuthErrorBody {
            error: self.to_string(),
            error_code: self.error_code().to_string(),
        });
        (status, body).into_response()
    }
}
