// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    http::{header, HeaderName, HeaderValue, Method, StatusCode},
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use utoipa::{
    openapi::security::{ApiKey, ApiKeyValue, HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    config::Config,
    delegate::StoredList,
    models::{
        DeleteListResponse, EmptyListBody, ListBody, ListPayload, ListResponse, SubscribeResponse,
        SubscriptionResponse, TestPushResponse,
    },
    notifications::{Platform, PushKeys, PushSubscription},
    state::AppState,
    storage::UserSubscription,
};

pub mod account;
pub mod health;
pub mod list;
pub mod notifications;

pub fn router(state: AppState) -> Router {
    let cors = cors_layer(&state.config);
    let timeout =
        TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, state.config.request_timeout);

    let v1_routes = Router::new()
        .route(
            "/list",
            get(list::get_list)
                .post(list::create_list)
                .put(list::update_list)
                .delete(list::delete_list),
        )
        .route("/account", axum::routing::delete(account::delete_account))
        .route("/notifications/subscribe", post(notifications::subscribe))
        .route(
            "/notifications/subscription",
            get(notifications::get_subscription),
        )
        .route("/notifications/test", post(notifications::send_test))
        .with_state(state.clone());

    let health_routes = Router::new()
        .route("/health", get(health::health))
        .route("/health/live", get(health::liveness))
        .route("/health/ready", get(health::readiness))
        .with_state(state);

    Router::new()
        .nest("/v1", v1_routes)
        .merge(health_routes)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(timeout)
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(cors),
        )
}

/// Permissive in development, otherwise restricted to `ALLOWED_ORIGINS`.
fn cors_layer(config: &Config) -> CorsLayer {
    if config.local.development {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            HeaderName::from_static(crate::auth::USER_SUBJECT_HEADER),
            HeaderName::from_static(list::KEY_SALT_HEADER),
        ])
}

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).build()),
            );
            components.add_security_scheme(
                "user_subject",
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new("X-User-Subject"))),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        list::get_list,
        list::create_list,
        list::update_list,
        list::delete_list,
        account::delete_account,
        notifications::subscribe,
        notifications::get_subscription,
        notifications::send_test,
        health::health,
        health::liveness,
        health::readiness
    ),
    components(
        schemas(
            ListPayload,
            ListBody,
            EmptyListBody,
            ListResponse,
            DeleteListResponse,
            StoredList,
            PushSubscription,
            PushKeys,
            Platform,
            UserSubscription,
            SubscribeResponse,
            SubscriptionResponse,
            TestPushResponse,
            health::ReadyResponse,
            health::HealthChecks,
            health::HealthResponse
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Lists", description = "Encrypted list storage and decode keys"),
        (name = "Account", description = "Account removal"),
        (name = "Notifications", description = "Web push subscriptions"),
        (name = "Health", description = "Liveness and readiness probes")
    )
)]
struct ApiDoc;
