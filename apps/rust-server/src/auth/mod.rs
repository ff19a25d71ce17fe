// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Authentication Module
//!
//! Every `/v1` endpoint runs behind the identity service.
//!
//! ## Auth Flow
//!
//! 1. The client sends `X-User-Subject: <user id>` and
//!    `Authorization: Bearer <access token>`
//! 2. The gateway:
//!    - rejects the request with 401 if either header is missing or empty
//!    - asks the identity service whether the token belongs to the subject
//!    - answers 401 if it says no, 500 if it cannot be reached
//! 3. Only then does the handler run
//!
//! In development mode (`DEVELOPMENT=true`) step 2 is skipped and every
//! principal with both headers is accepted.

pub mod error;
pub mod extractor;
pub mod validator;

pub use error::AuthError;
pub use extractor::{Authorized, Principal, USER_SUBJECT_HEADER};
pub use validator::Validator;
