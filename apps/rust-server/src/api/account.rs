// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Account API endpoints.

use axum::{extract::State, http::StatusCode};

use crate::{auth::Authorized, delegate::AccountDelegate, error::ApiError, state::AppState};

/// Delete the caller's account.
///
/// The access token is forwarded so the account backend can revoke the
/// caller's sessions.
#[utoipa::path(
    delete,
    path = "/v1/account",
    tag = "Account",
    security(("bearer_auth" = []), ("user_subject" = [])),
    responses(
        (status = 204, description = "Account deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn delete_account(
    Authorized(principal): Authorized,
    State(state): State<AppState>,
) -> Result<StatusCode, ApiError> {
    AccountDelegate::new(state.accounts.as_ref())
        .delete(&principal.subject, &principal.access_token)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
