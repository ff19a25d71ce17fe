// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Repository layer providing typed access to the document store.
//!
//! A repository borrows the storage for the duration of one operation; it
//! holds no state of its own.

pub mod keys;
pub mod subscriptions;

pub use keys::{ExportKey, KeyRepository};
pub use subscriptions::{SubscriptionRepository, UserSubscription};
