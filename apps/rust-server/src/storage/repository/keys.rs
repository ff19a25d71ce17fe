// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Exported decode keys.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::super::{DocumentStorage, StorageError, StorageResult};

/// Decode key document. Written once per user, never replaced.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ExportKey {
    pub user_id: String,
    /// Standard base64 of the 32-byte derived key
    pub decode_key: String,
}

/// Repository for decode key documents.
pub struct KeyRepository<'a> {
    storage: &'a DocumentStorage,
}

impl<'a> KeyRepository<'a> {
    pub fn new(storage: &'a DocumentStorage) -> Self {
        Self { storage }
    }

    pub fn get(&self, user_id: &str) -> StorageResult<Option<ExportKey>> {
        self.storage.read_json_opt(self.storage.paths().key(user_id))
    }

    /// Store a key. Fails with `AlreadyExists` if the user already has one.
    pub fn insert(&self, key: &ExportKey) -> StorageResult<()> {
        self.storage
            .create_json(self.storage.paths().key(&key.user_id), key)
            .map_err(|e| match e {
                StorageError::AlreadyExists(_) => {
                    StorageError::AlreadyExists(format!("Key for {}", key.user_id))
                }
                other => other,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::StoragePaths;
    use tempfile::TempDir;

    #[test]
    fn insert_then_get() {
        let temp_dir = TempDir::new().unwrap();
        let mut storage = DocumentStorage::new(StoragePaths::new(temp_dir.path()));
        storage.initialize().unwrap();
        let repo = KeyRepository::new(&storage);

        assert!(repo.get("u1").unwrap().is_none());

        let key = ExportKey {
            user_id: "u1".to_string(),
            decode_key: "c2VjcmV0".to_string(),
        };
        repo.insert(&key).unwrap();
        assert_eq!(repo.get("u1").unwrap(), Some(key.clone()));

        let replacement = ExportKey {
            decode_key: "b3RoZXI=".to_string(),
            ..key.clone()
        };
        assert!(matches!(
            repo.insert(&replacement),
            Err(StorageError::AlreadyExists(_))
        ));
        assert_eq!(repo.get("u1").unwrap(), Some(key));
    }
}
