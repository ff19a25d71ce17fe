// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Push notification API endpoints.

use axum::{extract::State, http::StatusCode, Json};

use crate::{
    auth::Authorized,
    error::ApiError,
    models::{SubscribeResponse, SubscriptionResponse, TestPushResponse},
    notifications::{PushSubscription, SubscriptionStore},
    state::AppState,
};

fn store(state: &AppState) -> SubscriptionStore<'_> {
    SubscriptionStore::new(state.storage(), state.development(), state.push.as_ref())
}

/// Register a browser push subscription for the caller.
///
/// The subscription fills the slot of its push service. Subscriptions from
/// other browser families are kept.
#[utoipa::path(
    post,
    path = "/v1/notifications/subscribe",
    tag = "Notifications",
    security(("bearer_auth" = []), ("user_subject" = [])),
    request_body = PushSubscription,
    responses(
        (status = 201, description = "Subscription stored", body = SubscribeResponse),
        (status = 400, description = "Subscription has no endpoint"),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn subscribe(
    Authorized(principal): Authorized,
    State(state): State<AppState>,
    Json(subscription): Json<PushSubscription>,
) -> Result<(StatusCode, Json<SubscribeResponse>), ApiError> {
    if subscription.endpoint.trim().is_empty() {
        return Err(ApiError::bad_request("Subscription endpoint is required"));
    }

    let record = store(&state).store_user(&principal.subject, subscription)?;

    Ok((
        StatusCode::CREATED,
        Json(SubscribeResponse {
            latest_platform: record.latest_platform,
        }),
    ))
}

/// Fetch the caller's subscription record.
#[utoipa::path(
    get,
    path = "/v1/notifications/subscription",
    tag = "Notifications",
    security(("bearer_auth" = []), ("user_subject" = [])),
    responses(
        (status = 200, description = "Subscription record or null", body = SubscriptionResponse),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_subscription(
    Authorized(principal): Authorized,
    State(state): State<AppState>,
) -> Result<Json<SubscriptionResponse>, ApiError> {
    let subscription = store(&state).get_subscription(&principal.subject)?;
    Ok(Json(SubscriptionResponse { subscription }))
}

/// Send the test notification to the demonstration user.
#[utoipa::path(
    post,
    path = "/v1/notifications/test",
    tag = "Notifications",
    security(("bearer_auth" = []), ("user_subject" = [])),
    responses(
        (status = 202, description = "Test message accepted by the push service", body = TestPushResponse),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "No subscription, push not configured, or delivery failed")
    )
)]
pub async fn send_test(
    Authorized(_principal): Authorized,
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<TestPushResponse>), ApiError> {
    store(&state).send_test().await?;

    Ok((
        StatusCode::ACCEPTED,
        Json(TestPushResponse {
            status: "sent".to_string(),
        }),
    ))
}
