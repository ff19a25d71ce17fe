// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # API Data Models
//!
//! Request and response bodies of the `/v1` endpoints. All types derive
//! `ToSchema` for the OpenAPI document.
//!
//! ## Model Categories
//!
//! - **Lists**: the encrypted list blob and the decode key
//! - **Notifications**: push subscription results

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::notifications::Platform;
use crate::storage::UserSubscription;

// =============================================================================
// Lists
// =============================================================================

/// Body of list create and update requests.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct ListPayload {
    /// Ciphertext
    pub data: String,
    /// Initialization vector
    pub iv: String,
}

/// A stored list as returned to its owner.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ListBody {
    pub data: String,
    pub iv: String,
    /// Base64 decode key, when one exists or was just created
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decode_key: Option<String>,
}

/// Returned instead of a list when the user has none yet.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EmptyListBody {
    /// Always "No Lists"
    pub message: String,
    /// Always an empty object
    #[schema(value_type = Object)]
    pub data: serde_json::Map<String, serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decode_key: Option<String>,
}

impl EmptyListBody {
    pub fn new(decode_key: Option<String>) -> Self {
        Self {
            message: "No Lists".to_string(),
            data: serde_json::Map::new(),
            decode_key,
        }
    }
}

/// Response of `GET /v1/list`.
#[derive(Debug, Clone, Serialize, ToSchema, PartialEq)]
#[serde(untagged)]
pub enum ListResponse {
    Found(ListBody),
    Empty(EmptyListBody),
}

/// Response of `DELETE /v1/list`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DeleteListResponse {
    pub user_id: String,
}

// =============================================================================
// Notifications
// =============================================================================

/// Response of `POST /v1/notifications/subscribe`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SubscribeResponse {
    /// Slot the new subscription was stored in
    pub latest_platform: Platform,
}

/// Response of `GET /v1/notifications/subscription`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct SubscriptionResponse {
    /// `null` when the user never subscribed
    pub subscription: Option<UserSubscription>,
}

/// Response of `POST /v1/notifications/test`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct TestPushResponse {
    pub status: String,
}
