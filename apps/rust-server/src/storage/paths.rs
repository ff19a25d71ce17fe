// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Path layout of the document store.
//!
//! User ids are opaque strings chosen by the identity provider, so they are
//! never used as file names directly. Every per-user document is addressed by
//! the SHA-256 of the user id.

use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};

/// Default root directory of the document store.
pub const DATA_ROOT: &str = "/data";

/// Storage path utilities for the document store.
#[derive(Debug, Clone)]
pub struct StoragePaths {
    root: PathBuf,
}

impl Default for StoragePaths {
    fn default() -> Self {
        Self::new(DATA_ROOT)
    }
}

impl StoragePaths {
    /// Create a new StoragePaths with a custom root (useful for testing).
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Root directory for all documents.
    pub fn root(&self) -> &Path {
        &self.root
    }

    // ========== Subscription Paths ==========

    /// Directory containing all push subscription records.
    pub fn subscriptions_dir(&self) -> PathBuf {
        self.root.join("subscriptions")
    }

    /// Directory for one environment's subscription records.
    ///
    /// Development and production records never share a directory.
    pub fn subscriptions_env_dir(&self, development: bool) -> PathBuf {
        self.subscriptions_dir().join(environment_name(development))
    }

    /// Path to a user's subscription record for the given environment.
    pub fn subscription(&self, user_id: &str, development: bool) -> PathBuf {
        self.subscriptions_env_dir(development)
            .join(format!("{}.json", document_name(user_id)))
    }

    // ========== Key Paths ==========

    /// Directory containing all exported decode keys.
    pub fn keys_dir(&self) -> PathBuf {
        self.root.join("keys")
    }

    /// Path to a user's decode key document.
    pub fn key(&self, user_id: &str) -> PathBuf {
        self.keys_dir()
            .join(format!("{}.json", document_name(user_id)))
    }
}

fn environment_name(development: bool) -> &'static str {
    if development {
        "development"
    } else {
        "production"
    }
}

/// Stable, filesystem-safe document name for a user id.
pub fn document_name(user_id: &str) -> String {
    format!("{:x}", Sha256::digest(user_id.as_bytes()))
}
