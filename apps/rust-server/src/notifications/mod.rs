// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Web Push Notifications
//!
//! Browsers hand the gateway a `PushSubscription` (endpoint plus encryption
//! keys). Subscriptions are classified by push service, merged into one record
//! per user and environment, and used to deliver VAPID-signed (RFC 8292),
//! payload-encrypted (RFC 8291) messages.
//!
//! - `platform` - push service classification
//! - `vapid` - VAPID key pair validation
//! - `push` - message payloads and delivery
//! - `store` - subscription persistence and the test message

pub mod platform;
pub mod push;
pub mod store;
pub mod vapid;

pub use platform::Platform;
pub use push::{
    delivery_from_config, NotificationAction, NotificationPayload, PushDelivery, PushError,
    PushKeys, PushSubscription, UnconfiguredDelivery, WebPushDelivery,
};
pub use store::{SubscriptionStore, DEMO_USER_ID};
pub use vapid::{VapidKeyError, VapidKeyPair};
