// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Push subscriptions, message payloads and delivery.
//!
//! Delivery uses the `web-push` crate for VAPID signing and RFC 8291 payload
//! encryption only. The encrypted message is sent with `reqwest`.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use web_push::{ContentEncoding, SubscriptionInfo, VapidSignatureBuilder, WebPushMessageBuilder};

use super::VapidKeyPair;
use crate::config::NotificationsConfig;

/// How long push services keep an undelivered message (seconds).
const MESSAGE_TTL: u32 = 24 * 60 * 60;

/// A browser push subscription, as produced by `PushSubscription.toJSON()`.
///
/// Fields other than `endpoint` and `keys` (such as `expirationTime`) are
/// ignored.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct PushSubscription {
    /// Push service endpoint URL
    pub endpoint: String,
    pub keys: PushKeys,
}

/// Client encryption keys of a push subscription.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct PushKeys {
    /// Browser P-256 ECDH public key (base64url)
    pub p256dh: String,
    /// Shared authentication secret (base64url)
    pub auth: String,
}

/// Notification action button.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct NotificationAction {
    pub action: String,
    pub title: String,
}

/// JSON payload the service worker turns into a notification.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct NotificationPayload {
    pub title: String,
    pub body: String,
    pub icon: String,
    pub data: String,
    pub actions: Vec<NotificationAction>,
}

impl NotificationPayload {
    /// The fixed message sent by the test endpoint.
    pub fn test_message() -> Self {
        Self {
            title: "Test".to_string(),
            body: "Test".to_string(),
            icon: "https://beta.todo-list.app/logo512.png".to_string(),
            data: "tm9kgx578a".to_string(),
            actions: vec![
                NotificationAction {
                    action: "open".to_string(),
                    title: "Go to Task".to_string(),
                },
                NotificationAction {
                    action: "complete".to_string(),
                    title: "Task Complete".to_string(),
                },
            ],
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PushError {
    #[error("push delivery is not configured")]
    NotConfigured,

    #[error("failed to encode push payload: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("failed to sign push message: {0}")]
    Signing(String),

    #[error("push request failed: {0}")]
    Request(String),

    #[error("push service rejected the message with status {status}")]
    Rejected { status: u16 },
}

/// Sends one encrypted message to one subscription.
#[async_trait]
pub trait PushDelivery: Send + Sync {
    async fn send(&self, subscription: &PushSubscription, payload: &[u8]) -> Result<(), PushError>;
}

/// Build the delivery configured by `VAPID_*`, or one that always fails with
/// `NotConfigured` when no keys are set.
pub fn delivery_from_config(
    config: &NotificationsConfig,
    timeout: Duration,
) -> Result<Arc<dyn PushDelivery>, PushError> {
    match &config.vapid_keys {
        Some(keys) => Ok(Arc::new(WebPushDelivery::new(
            keys.clone(),
            &config.vapid_email,
            timeout,
        )?)),
        None => {
            tracing::warn!("VAPID keys not configured, push delivery disabled");
            Ok(Arc::new(UnconfiguredDelivery))
        }
    }
}

/// VAPID-signed delivery over HTTPS.
pub struct WebPushDelivery {
    keys: VapidKeyPair,
    subscriber: String,
    http: reqwest::Client,
}

impl WebPushDelivery {
    pub fn new(keys: VapidKeyPair, subscriber: &str, timeout: Duration) -> Result<Self, PushError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| PushError::Request(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            keys,
            subscriber: subscriber_claim(subscriber),
            http,
        })
    }
}

/// VAPID `sub` claim: a `mailto:` or `https:` URI.
fn subscriber_claim(subscriber: &str) -> String {
    let subscriber = subscriber.trim();
    if subscriber.starts_with("mailto:") || subscriber.starts_with("https:") {
        subscriber.to_string()
    } else {
        format!("mailto:{subscriber}")
    }
}

#[async_trait]
impl PushDelivery for WebPushDelivery {
    async fn send(&self, subscription: &PushSubscription, payload: &[u8]) -> Result<(), PushError> {
        let sub_info = SubscriptionInfo::new(
            &subscription.endpoint,
            &subscription.keys.p256dh,
            &subscription.keys.auth,
        );

        let mut sig_builder =
            VapidSignatureBuilder::from_base64(self.keys.private_key_base64url(), &sub_info)
                .map_err(|e| PushError::Signing(e.to_string()))?;
        sig_builder.add_claim("sub", self.subscriber.as_str());
        let signature = sig_builder
            .build()
            .map_err(|e| PushError::Signing(e.to_string()))?;

        let mut builder = WebPushMessageBuilder::new(&sub_info);
        builder.set_payload(ContentEncoding::Aes128Gcm, payload);
        builder.set_vapid_signature(signature);
        builder.set_ttl(MESSAGE_TTL);
        let message = builder
            .build()
            .map_err(|e| PushError::Signing(e.to_string()))?;

        let mut request = self
            .http
            .post(message.endpoint.to_string())
            .header("TTL", message.ttl.to_string());
        if let Some(urgency) = message.urgency {
            request = request.header("Urgency", urgency.to_string());
        }
        if let Some(topic) = message.topic {
            request = request.header("Topic", topic);
        }
        if let Some(push_payload) = message.payload {
            request = request
                .header("Content-Encoding", push_payload.content_encoding.to_str())
                .header("Content-Type", "application/octet-stream");
            for (key, value) in &push_payload.crypto_headers {
                request = request.header(*key, value.as_str());
            }
            request = request.body(push_payload.content);
        }

        let response = request
            .send()
            .await
            .map_err(|e| PushError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), body = %body, "Push service rejected message");
            return Err(PushError::Rejected {
                status: status.as_u16(),
            });
        }

        Ok(())
    }
}

/// Delivery used when no VAPID keys are configured.
pub struct UnconfiguredDelivery;

#[async_trait]
impl PushDelivery for UnconfiguredDelivery {
    async fn send(&self, _subscription: &PushSubscription, _payload: &[u8]) -> Result<(), PushError> {
        Err(PushError::NotConfigured)
    }
}
