// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Subscription persistence and the test message.

use tracing::{info, warn};

use super::{NotificationPayload, Platform, PushDelivery, PushSubscription};
use crate::error::GatewayError;
use crate::storage::{DocumentStorage, SubscriptionRepository, UserSubscription};

/// User whose subscription receives the message sent by the test endpoint.
pub const DEMO_USER_ID: &str = "b3d1940e-d182-4fab-a574-37258e13d2d6";

/// Stores subscriptions for one environment and sends push messages to them.
pub struct SubscriptionStore<'a> {
    storage: &'a DocumentStorage,
    development: bool,
    push: &'a dyn PushDelivery,
}

impl<'a> SubscriptionStore<'a> {
    pub fn new(storage: &'a DocumentStorage, development: bool, push: &'a dyn PushDelivery) -> Self {
        Self {
            storage,
            development,
            push,
        }
    }

    /// Classify the subscription and merge it into the user's record.
    ///
    /// Only the classified slot and `latest_platform` change; subscriptions
    /// from other browser families are kept, including ones stored by
    /// concurrent calls for the same user.
    pub fn store_user(
        &self,
        user_id: &str,
        subscription: PushSubscription,
    ) -> Result<UserSubscription, GatewayError> {
        let platform = Platform::classify(&subscription.endpoint);
        let record = SubscriptionRepository::new(self.storage).upsert_slot(
            user_id,
            self.development,
            platform,
            subscription,
        )?;

        info!(
            user_id = %user_id,
            platform = %platform,
            slots = record.subscriptions.len(),
            development = self.development,
            "Stored push subscription"
        );
        Ok(record)
    }

    pub fn get_subscription(&self, user_id: &str) -> Result<Option<UserSubscription>, GatewayError> {
        Ok(SubscriptionRepository::new(self.storage).get(user_id, self.development)?)
    }

    /// Send the fixed test message to the demonstration user's latest
    /// subscription. Single attempt.
    pub async fn send_test(&self) -> Result<(), GatewayError> {
        let record = self
            .get_subscription(DEMO_USER_ID)?
            .ok_or_else(|| GatewayError::NotFound(format!("Subscription for {DEMO_USER_ID}")))?;

        let subscription = record.latest().ok_or_else(|| {
            GatewayError::NotFound(format!(
                "{} subscription for {DEMO_USER_ID}",
                record.latest_platform
            ))
        })?;

        let payload = serde_json::to_vec(&NotificationPayload::test_message())
            .map_err(super::PushError::from)?;

        if let Err(e) = self.push.send(subscription, &payload).await {
            warn!(
                error = %e,
                platform = %record.latest_platform,
                "Test push delivery failed"
            );
            return Err(e.into());
        }

        info!(platform = %record.latest_platform, "Test push delivered");
        Ok(())
    }
}
