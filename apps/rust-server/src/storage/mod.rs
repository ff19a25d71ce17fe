// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Document Store
//!
//! Persistent storage for the documents the gateway owns itself: push
//! subscription records and exported decode keys. List blobs are NOT stored
//! here; they live in the list backend.
//!
//! ## Storage Layout
//!
//! ```text
//! /data/
//!   subscriptions/
//!     development/{sha256(user_id)}.json
//!     production/{sha256(user_id)}.json
//!   keys/
//!     {sha256(user_id)}.json
//! ```
//!
//! Every operation touches a single document.

pub mod document_fs;
pub mod paths;
pub mod repository;

pub use document_fs::{DocumentStorage, StorageError, StorageResult};
pub use paths::StoragePaths;
pub use repository::{ExportKey, KeyRepository, SubscriptionRepository, UserSubscription};
