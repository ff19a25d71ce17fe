// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! List API endpoints.
//!
//! Each user owns at most one encrypted list. The gateway forwards it to the
//! list backend untouched and hands out the user's decode key alongside it.

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    Json,
};

use crate::{
    auth::Authorized,
    delegate::{ListDelegate, StoredList},
    error::{ApiError, GatewayError},
    keys::KeyService,
    models::{DeleteListResponse, EmptyListBody, ListBody, ListPayload, ListResponse},
    state::AppState,
};

/// Header carrying the salt used to create a missing decode key.
pub const KEY_SALT_HEADER: &str = "x-key-salt";

/// Fetch the caller's list and decode key.
///
/// If the caller has no decode key yet and sends `X-Key-Salt`, one is
/// derived and stored first.
#[utoipa::path(
    get,
    path = "/v1/list",
    tag = "Lists",
    security(("bearer_auth" = []), ("user_subject" = [])),
    params(
        ("X-Key-Salt" = Option<String>, Header, description = "Salt for creating a missing decode key")
    ),
    responses(
        (status = 200, description = "The list, or a 'No Lists' marker", body = ListResponse),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_list(
    Authorized(principal): Authorized,
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<ListResponse>, ApiError> {
    let list = ListDelegate::new(state.lists.as_ref())
        .get(&principal.subject)
        .await?;
    let decode_key = decode_key_for(&state, &principal.subject, &headers).await?;

    let response = match list {
        Some(list) => ListResponse::Found(ListBody {
            data: list.data,
            iv: list.iv,
            decode_key,
        }),
        None => ListResponse::Empty(EmptyListBody::new(decode_key)),
    };

    Ok(Json(response))
}

/// Create the caller's list. Creating an existing list succeeds.
#[utoipa::path(
    post,
    path = "/v1/list",
    tag = "Lists",
    security(("bearer_auth" = []), ("user_subject" = [])),
    request_body = ListPayload,
    responses(
        (status = 201, description = "List created", body = ListPayload),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn create_list(
    Authorized(principal): Authorized,
    State(state): State<AppState>,
    Json(payload): Json<ListPayload>,
) -> Result<(StatusCode, Json<ListPayload>), ApiError> {
    let list = ListDelegate::new(state.lists.as_ref())
        .create(stored(principal.subject, payload))
        .await?;

    Ok((StatusCode::CREATED, Json(payload_of(list))))
}

/// Replace the caller's list.
#[utoipa::path(
    put,
    path = "/v1/list",
    tag = "Lists",
    security(("bearer_auth" = []), ("user_subject" = [])),
    request_body = ListPayload,
    responses(
        (status = 200, description = "List updated", body = ListPayload),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn update_list(
    Authorized(principal): Authorized,
    State(state): State<AppState>,
    Json(payload): Json<ListPayload>,
) -> Result<Json<ListPayload>, ApiError> {
    let list = ListDelegate::new(state.lists.as_ref())
        .update(stored(principal.subject, payload))
        .await?;

    Ok(Json(payload_of(list)))
}

/// Delete the caller's list.
#[utoipa::path(
    delete,
    path = "/v1/list",
    tag = "Lists",
    security(("bearer_auth" = []), ("user_subject" = [])),
    responses(
        (status = 200, description = "List deleted", body = DeleteListResponse),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn delete_list(
    Authorized(principal): Authorized,
    State(state): State<AppState>,
) -> Result<Json<DeleteListResponse>, ApiError> {
    let deleted = ListDelegate::new(state.lists.as_ref())
        .delete(&principal.subject)
        .await?;

    Ok(Json(DeleteListResponse {
        user_id: deleted.user_id,
    }))
}

fn stored(user_id: String, payload: ListPayload) -> StoredList {
    StoredList {
        user_id,
        data: payload.data,
        iv: payload.iv,
    }
}

fn payload_of(list: StoredList) -> ListPayload {
    ListPayload {
        data: list.data,
        iv: list.iv,
    }
}

/// Existing decode key, or a new one when the client sent a salt.
async fn decode_key_for(
    state: &AppState,
    user_id: &str,
    headers: &HeaderMap,
) -> Result<Option<String>, GatewayError> {
    let keys = KeyService::new(state.storage());
    if let Some(key) = keys.get_key(user_id)? {
        return Ok(Some(key.decode_key));
    }

    let salt = headers
        .get(KEY_SALT_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|s| !s.is_empty());

    match salt {
        Some(salt) => Ok(Some(keys.create_key(user_id, salt).await?.decode_key)),
        None => Ok(None),
    }
}
