// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Backend Services
//!
//! The identity, list and account backends are JSON-over-HTTP services. Every
//! RPC is a `POST` against the configured base URL:
//!
//! | Service | Path | Request | Response |
//! |---------|------|---------|----------|
//! | Identity | `/v1/check` | `{accessToken, subject}` | `{isValid}` |
//! | List | `/v1/todo/{get,insert,update,delete}` | `{userId, data?, iv?}` | `{userId, data, iv, status}` |
//! | Account | `/v1/account/delete` | `{userId, accessToken}` | `{status}` |
//!
//! Each service sits behind a trait so the gateway can be exercised with
//! in-memory fakes. The HTTP implementations open a fresh `BackendClient` per
//! call and never retry.

pub mod account;
pub mod client;
pub mod identity;
pub mod list;

pub use account::{AccountRecord, AccountService, HttpAccountService};
pub use client::BackendClient;
pub use identity::{HttpIdentityService, IdentityService};
pub use list::{HttpListService, ListRecord, ListService};

/// Errors raised while talking to a backend.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// Connection failure, timeout or non-2xx HTTP status.
    #[error("{service} service unavailable: {reason}")]
    Unavailable {
        service: &'static str,
        reason: String,
    },

    /// The response body could not be decoded.
    #[error("{service} service returned an invalid response: {reason}")]
    InvalidResponse {
        service: &'static str,
        reason: String,
    },

    /// The backend answered but reported a failure in its `status` field.
    #[error("{operation} failed with status {status:?}")]
    Application {
        operation: &'static str,
        status: String,
    },
}

impl BackendError {
    /// True for failures of the transport rather than the operation.
    pub fn is_transport(&self) -> bool {
        !matches!(self, BackendError::Application { .. })
    }
}

/// Backend `status` values that mean success.
pub(crate) fn status_is_ok(status: &str) -> bool {
    status.is_empty() || status.eq_ignore_ascii_case("ok")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_and_ok_statuses_are_success() {
        assert!(status_is_ok(""));
        assert!(status_is_ok("ok"));
        assert!(status_is_ok("OK"));
        assert!(!status_is_ok("not_found"));
        assert!(!status_is_ok("error"));
    }

    #[test]
    fn application_errors_are_not_transport_errors() {
        let app = BackendError::Application {
            operation: "list.update",
            status: "conflict".into(),
        };
        let down = BackendError::Unavailable {
            service: "list",
            reason: "connection refused".into(),
        };
        assert!(!app.is_transport());
        assert!(down.is_transport());
    }
}
