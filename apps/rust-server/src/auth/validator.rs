// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Principal validation against the identity service.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::backend::{BackendError, IdentityService};

#[derive(Clone)]
pub struct Validator {
    development: bool,
    identity: Arc<dyn IdentityService>,
}

impl Validator {
    pub fn new(development: bool, identity: Arc<dyn IdentityService>) -> Self {
        Self {
            development,
            identity,
        }
    }

    pub fn is_development(&self) -> bool {
        self.development
    }

    /// Ask the identity service whether `access_token` belongs to `subject`.
    ///
    /// In development mode every principal is accepted without a backend
    /// call. A transport failure is `Err`; an answered "invalid" is
    /// `Ok(false)`.
    pub async fn validate_user(&self, access_token: &str, subject: &str) -> Result<bool, BackendError> {
        if self.development {
            debug!(subject = %subject, "Development mode, skipping validation");
            return Ok(true);
        }

        match self.identity.check(access_token, subject).await {
            Ok(valid) => {
                if !valid {
                    debug!(subject = %subject, "Identity service rejected principal");
                }
                Ok(valid)
            }
            Err(e) => {
                warn!(subject = %subject, error = %e, "Identity validation failed");
                Err(e)
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Identity backend answering `valid`, or unavailable when `None`.
    pub(crate) struct FakeIdentity {
        pub(crate) valid: Option<bool>,
        pub(crate) calls: AtomicUsize,
    }

    impl FakeIdentity {
        pub(crate) fn new(valid: Option<bool>) -> Self {
            Self {
                valid,
                calls: AtomicUsize::new(0),
            }
        }

        pub(crate) fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl IdentityService for FakeIdentity {
        async fn check(&self, _access_token: &str, _subject: &str) -> Result<bool, BackendError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.valid.ok_or_else(|| BackendError::Unavailable {
                service: "identity",
                reason: "connection refused".into(),
            })
        }
    }

    #[tokio::test]
    async fn development_accepts_everything_without_backend() {
        let identity = Arc::new(FakeIdentity::new(Some(false)));
        let validator = Validator::new(true, identity.clone());

        assert!(validator.validate_user("", "").await.unwrap());
        assert!(validator.validate_user("garbage", "anyone").await.unwrap());
        assert_eq!(identity.calls(), 0);
    }

    #[tokio::test]
    async fn production_returns_backend_answer() {
        let valid = Validator::new(false, Arc::new(FakeIdentity::new(Some(true))));
        let invalid = Validator::new(false, Arc::new(FakeIdentity::new(Some(false))));

        assert!(valid.validate_user("tok", "u1").await.unwrap());
        assert!(!invalid.validate_user("tok", "u1").await.unwrap());
    }

    #[tokio::test]
    async fn transport_failure_is_error_not_false() {
        let identity = Arc::new(FakeIdentity::new(None));
        let validator = Validator::new(false, identity.clone());

        assert!(validator.validate_user("tok", "u1").await.is_err());
        assert_eq!(identity.calls(), 1);
    }
}
