// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Axum extractors for the caller's identity.
//!
//! Use `Authorized` in handlers that must only run for validated callers:
//!
//! ```rust,ignore
//! async fn my_handler(Authorized(principal): Authorized) -> impl IntoResponse {
//!     // principal.subject is the validated user id
//! }
//! ```

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use tracing::error;

use super::AuthError;
use crate::state::AppState;

/// Header carrying the caller's user id.
pub const USER_SUBJECT_HEADER: &str = "x-user-subject";

/// Unvalidated caller identity read from the request headers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    /// User id (`X-User-Subject`)
    pub subject: String,
    /// Bearer token (`Authorization: Bearer <token>`)
    pub access_token: String,
}

impl<S> FromRequestParts<S> for Principal
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let subject = parts
            .headers
            .get(USER_SUBJECT_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or(AuthError::MissingSubject)?;

        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .ok_or(AuthError::MissingAccessToken)?
            .to_str()
            .map_err(|_| AuthError::InvalidAuthHeader)?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or(AuthError::InvalidAuthHeader)?
            .trim();

        if token.is_empty() {
            return Err(AuthError::MissingAccessToken);
        }

        Ok(Principal {
            subject: subject.to_string(),
            access_token: token.to_string(),
        })
    }
}

/// A principal the identity service has confirmed.
///
/// Extraction runs validation, so a handler taking `Authorized` never starts
/// before validation succeeded.
pub struct Authorized(pub Principal);

impl FromRequestParts<AppState> for Authorized {
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let principal = Principal::from_request_parts(parts, state).await?;

        match state
            .validator
            .validate_user(&principal.access_token, &principal.subject)
            .await
        {
            Ok(true) => Ok(Authorized(principal)),
            Ok(false) => Err(AuthError::Rejected),
            Err(e) => {
                error!(error = %e, "Identity service unavailable");
                Err(AuthError::ValidationUnavailable(e.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::validator::tests::FakeIdentity;
    use crate::state::tests::test_state;
    use axum::http::Request;
    use std::sync::Arc;

    fn parts(subject: Option<&str>, authorization: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/v1/list");
        if let Some(subject) = subject {
            builder = builder.header("X-User-Subject", subject);
        }
        if let Some(authorization) = authorization {
            builder = builder.header("Authorization", authorization);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[tokio::test]
    async fn principal_reads_both_headers() {
        let mut parts = parts(Some("user-1"), Some("Bearer tok"));
        let principal = Principal::from_request_parts(&mut parts, &()).await.unwrap();
        assert_eq!(
            principal,
            Principal {
                subject: "user-1".into(),
                access_token: "tok".into()
            }
        );
    }

    #[tokio::test]
    async fn principal_requires_subject() {
        for subject in [None, Some(""), Some("   ")] {
            let mut parts = parts(subject, Some("Bearer tok"));
            let result = Principal::from_request_parts(&mut parts, &()).await;
            assert!(matches!(result, Err(AuthError::MissingSubject)));
        }
    }

    #[tokio::test]
    async fn principal_requires_bearer_token() {
        let mut missing = parts(Some("user-1"), None);
        assert!(matches!(
            Principal::from_request_parts(&mut missing, &()).await,
            Err(AuthError::MissingAccessToken)
        ));

        let mut empty = parts(Some("user-1"), Some("Bearer "));
        assert!(matches!(
            Principal::from_request_parts(&mut empty, &()).await,
            Err(AuthError::MissingAccessToken)
        ));

        let mut basic = parts(Some("user-1"), Some("Basic dXNlcjpwYXNz"));
        assert!(matches!(
            Principal::from_request_parts(&mut basic, &()).await,
            Err(AuthError::InvalidAuthHeader)
        ));
    }

    #[tokio::test]
    async fn missing_headers_never_reach_identity_service() {
        let identity = Arc::new(FakeIdentity::new(Some(true)));
        let (state, _dir) = test_state(false);
        let state = state.with_identity(identity.clone());

        let mut parts = parts(None, Some("Bearer tok"));
        let result = Authorized::from_request_parts(&mut parts, &state).await;
        assert!(matches!(result, Err(AuthError::MissingSubject)));
        assert_eq!(identity.calls(), 0);
    }

    #[tokio::test]
    async fn authorized_maps_validation_outcomes() {
        let cases = [
            (Some(true), None),
            (Some(false), Some("invalid_credentials")),
            (None, Some("validation_unavailable")),
        ];

        for (valid, expected_code) in cases {
            let (state, _dir) = test_state(false);
            let state = state.with_identity(Arc::new(FakeIdentity::new(valid)));
            let mut parts = parts(Some("user-1"), Some("Bearer tok"));

            let result = Authorized::from_request_parts(&mut parts, &state).await;
            match expected_code {
                None => assert_eq!(result.unwrap().0.subject, "user-1"),
                Some(code) => assert_eq!(result.err().unwrap().error_code(), code),
            }
        }
    }

    #[tokio::test]
    async fn development_mode_skips_identity_service() {
        let identity = Arc::new(FakeIdentity::new(Some(false)));
        let (state, _dir) = test_state(true);
        let state = state.with_identity(identity.clone());

        let mut parts = parts(Some("user-1"), Some("Bearer tok"));
        assert!(Authorized::from_request_parts(&mut parts, &state).await.is_ok());
        assert_eq!(identity.calls(), 0);
    }
}
