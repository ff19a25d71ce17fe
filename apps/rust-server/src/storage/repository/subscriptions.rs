// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Push subscription records.
//!
//! One record per `(user_id, development)` pair. A record keeps one slot per
//! push platform; re-subscribing from another browser family fills another
//! slot and never clears the existing ones.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::super::{DocumentStorage, StorageError, StorageResult};
use crate::notifications::{Platform, PushSubscription};

/// Push subscription record stored per user and environment.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserSubscription {
    /// Owner user ID (identity subject)
    pub user_id: String,
    /// Environment the record belongs to
    pub development: bool,
    /// Platform of the most recent subscribe call
    pub latest_platform: Platform,
    /// One subscription per platform slot
    #[schema(value_type = Object)]
    pub subscriptions: BTreeMap<Platform, PushSubscription>,
    /// When the record was last written
    pub updated_at: DateTime<Utc>,
}

impl UserSubscription {
    /// Record holding a single populated slot.
    pub fn new(
        user_id: impl Into<String>,
        development: bool,
        platform: Platform,
        subscription: PushSubscription,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            development,
            latest_platform: platform,
            subscriptions: BTreeMap::from([(platform, subscription)]),
            updated_at: Utc::now(),
        }
    }

    /// Overwrite one slot and mark it as the latest. Other slots are kept.
    pub fn merge(&mut self, platform: Platform, subscription: PushSubscription) {
        self.subscriptions.insert(platform, subscription);
        self.latest_platform = platform;
        self.updated_at = Utc::now();
    }

    /// Subscription stored for a platform slot.
    pub fn slot(&self, platform: Platform) -> Option<&PushSubscription> {
        self.subscriptions.get(&platform)
    }

    /// Subscription named by `latest_platform`.
    pub fn latest(&self) -> Option<&PushSubscription> {
        self.slot(self.latest_platform)
    }
}

/// Repository for subscription records.
pub struct SubscriptionRepository<'a> {
    storage: &'a DocumentStorage,
}

impl<'a> SubscriptionRepository<'a> {
    /// Create a new SubscriptionRepository.
    pub fn new(storage: &'a DocumentStorage) -> Self {
        Self { storage }
    }

    /// Look up the record for a user in one environment.
    pub fn get(&self, user_id: &str, development: bool) -> StorageResult<Option<UserSubscription>> {
        self.storage
            .read_json_opt(self.storage.paths().subscription(user_id, development))
    }

    /// Insert a new record. Fails if one already exists.
    pub fn insert(&self, record: &UserSubscription) -> StorageResult<()> {
        let path = self
            .storage
            .paths()
            .subscription(&record.user_id, record.development);

        self.storage
            .create_json(path, record)
            .map_err(|e| match e {
                StorageError::AlreadyExists(_) => StorageError::AlreadyExists(format!(
                    "Subscription for {}",
                    record.user_id
                )),
                other => other,
            })
    }

    /// Fill one slot of the user's record, creating the record if needed.
    ///
    /// Runs under the document lock, so concurrent calls for the same user
    /// each keep the slots written by the others.
    pub fn upsert_slot(
        &self,
        user_id: &str,
        development: bool,
        platform: Platform,
        subscription: PushSubscription,
    ) -> StorageResult<UserSubscription> {
        let path = self.storage.paths().subscription(user_id, development);

        self.storage.with_document_lock(&path, || {
            match self.get(user_id, development)? {
                Some(mut record) => {
                    record.merge(platform, subscription);
                    self.storage.write_json(&path, &record)?;
                    Ok(record)
                }
                None => {
                    let record = UserSubscription::new(user_id, development, platform, subscription);
                    self.insert(&record)?;
                    Ok(record)
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notifications::PushKeys;
    use crate::storage::StoragePaths;
    use tempfile::TempDir;

    fn test_storage() -> (DocumentStorage, TempDir) {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let mut storage = DocumentStorage::new(StoragePaths::new(temp_dir.path()));
        storage.initialize().expect("Failed to initialize");
        (storage, temp_dir)
    }

    fn subscription(endpoint: &str) -> PushSubscription {
        PushSubscription {
            endpoint: endpoint.to_string(),
            keys: PushKeys {
                p256dh: "p256dh-key".to_string(),
                auth: "auth-secret".to_string(),
            },
        }
    }

    #[test]
    fn insert_and_get_record() {
        let (storage, _dir) = test_storage();
        let repo = SubscriptionRepository::new(&storage);

        let record = UserSubscription::new(
            "user-1",
            false,
            Platform::Mozilla,
            subscription("https://updates.push.services.mozilla.com/wpush/v2/a"),
        );
        repo.insert(&record).unwrap();

        let loaded = repo.get("user-1", false).unwrap().expect("record exists");
        assert_eq!(loaded, record);
        assert_eq!(loaded.latest(), record.slot(Platform::Mozilla));
    }

    #[test]
    fn environments_are_isolated() {
        let (storage, _dir) = test_storage();
        let repo = SubscriptionRepository::new(&storage);

        let record = UserSubscription::new(
            "user-1",
            true,
            Platform::Unknown,
            subscription("https://example.org/push"),
        );
        repo.insert(&record).unwrap();

        assert!(repo.get("user-1", true).unwrap().is_some());
        assert!(repo.get("user-1", false).unwrap().is_none());
    }

    #[test]
    fn insert_twice_is_rejected() {
        let (storage, _dir) = test_storage();
        let repo = SubscriptionRepository::new(&storage);

        let record = UserSubscription::new(
            "user-1",
            false,
            Platform::Apple,
            subscription("https://web.push.apple.com/abc"),
        );
        repo.insert(&record).unwrap();
        assert!(matches!(
            repo.insert(&record),
            Err(StorageError::AlreadyExists(_))
        ));
    }

    #[test]
    fn upsert_creates_then_merges() {
        let (storage, _dir) = test_storage();
        let repo = SubscriptionRepository::new(&storage);

        let created = repo
            .upsert_slot(
                "user-1",
                false,
                Platform::Edge,
                subscription("https://push.edge.com/abc"),
            )
            .unwrap();
        assert_eq!(created.subscriptions.len(), 1);

        let merged = repo
            .upsert_slot(
                "user-1",
                false,
                Platform::Apple,
                subscription("https://web.push.apple.com/abc"),
            )
            .unwrap();
        assert_eq!(merged.latest_platform, Platform::Apple);
        assert_eq!(merged.subscriptions.len(), 2);
        assert_eq!(repo.get("user-1", false).unwrap(), Some(merged));
    }

    #[test]
    fn concurrent_upserts_keep_every_slot() {
        let endpoints = [
            (Platform::ChromeBased, "https://fcm.googleapis.com/fcm/send/a"),
            (Platform::Mozilla, "https://updates.push.services.mozilla.com/wpush/v2/b"),
            (Platform::Apple, "https://web.push.apple.com/c"),
            (Platform::Edge, "https://push.edge.com/d"),
            (Platform::Unknown, "https://example.org/push/e"),
        ];

        for trial in 0..20 {
            let (storage, _dir) = test_storage();
            let repo = SubscriptionRepository::new(&storage);
            let user = format!("user-{trial}");
            let barrier = std::sync::Barrier::new(endpoints.len());

            std::thread::scope(|scope| {
                for (platform, endpoint) in endpoints {
                    let (repo, user, barrier) = (&repo, &user, &barrier);
                    scope.spawn(move || {
                        barrier.wait();
                        repo.upsert_slot(user, false, platform, subscription(endpoint))
                            .unwrap();
                    });
                }
            });

            let record = repo.get(&user, false).unwrap().expect("record exists");
            assert_eq!(record.subscriptions.len(), endpoints.len(), "trial {trial}");
        }
    }

    #[test]
    fn merge_keeps_other_slots() {
        let mut record = UserSubscription::new(
            "user-1",
            false,
            Platform::ChromeBased,
            subscription("https://fcm.googleapis.com/fcm/send/a"),
        );
        record.merge(
            Platform::Mozilla,
            subscription("https://updates.push.services.mozilla.com/wpush/v2/b"),
        );

        assert_eq!(record.latest_platform, Platform::Mozilla);
        assert_eq!(record.subscriptions.len(), 2);
        assert_eq!(
            record.slot(Platform::ChromeBased).unwrap().endpoint,
            "https://fcm.googleapis.com/fcm/send/a"
        );
    }

    #[test]
    fn record_serializes_with_platform_keys() {
        let record = UserSubscription::new(
            "user-1",
            false,
            Platform::ChromeBased,
            subscription("https://fcm.googleapis.com/fcm/send/a"),
        );
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["latestPlatform"], "chromeBased");
        assert_eq!(json["development"], false);
        assert!(json["subscriptions"]["chromeBased"]["endpoint"].is_string());
    }
}
