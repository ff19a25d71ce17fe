// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Decode Key Derivation
//!
//! Each user gets one symmetric key for encrypting their list on the client.
//! The key is derived with scrypt (N = 2^15, r = 8, p = 1, 32 bytes) from the
//! user id as password and a client supplied salt, then stored as standard
//! base64. Once stored, a key is never derived again or replaced.

use base64ct::{Base64, Encoding};
use tracing::info;

use crate::error::GatewayError;
use crate::storage::{DocumentStorage, ExportKey, KeyRepository, StorageError};

const SCRYPT_LOG_N: u8 = 15;
const SCRYPT_R: u32 = 8;
const SCRYPT_P: u32 = 1;
pub const KEY_LEN: usize = 32;

/// Derive the raw key. CPU and memory heavy; call from a blocking thread.
pub fn derive_key(user_id: &str, salt: &str) -> Result<[u8; KEY_LEN], GatewayError> {
    let params = scrypt::Params::new(SCRYPT_LOG_N, SCRYPT_R, SCRYPT_P, KEY_LEN)
        .map_err(|e| GatewayError::KeyDerivation(e.to_string()))?;

    let mut key = [0u8; KEY_LEN];
    scrypt::scrypt(user_id.as_bytes(), salt.as_bytes(), &params, &mut key)
        .map_err(|e| GatewayError::KeyDerivation(e.to_string()))?;
    Ok(key)
}

/// Reads and creates decode keys in the document store.
pub struct KeyService<'a> {
    storage: &'a DocumentStorage,
}

impl<'a> KeyService<'a> {
    pub fn new(storage: &'a DocumentStorage) -> Self {
        Self { storage }
    }

    pub fn get_key(&self, user_id: &str) -> Result<Option<ExportKey>, GatewayError> {
        Ok(KeyRepository::new(self.storage).get(user_id)?)
    }

    /// Derive and store a key, or return the one already stored.
    pub async fn create_key(&self, user_id: &str, salt: &str) -> Result<ExportKey, GatewayError> {
        let repo = KeyRepository::new(self.storage);
        if let Some(existing) = repo.get(user_id)? {
            return Ok(existing);
        }

        let (owned_user, owned_salt) = (user_id.to_string(), salt.to_string());
        let key = tokio::task::spawn_blocking(move || derive_key(&owned_user, &owned_salt))
            .await
            .map_err(|e| GatewayError::KeyDerivation(format!("derivation task failed: {e}")))??;

        let export = ExportKey {
            user_id: user_id.to_string(),
            decode_key: Base64::encode_string(&key),
        };

        match repo.insert(&export) {
            Ok(()) => {
                info!(user_id = %user_id, "Decode key created");
                Ok(export)
            }
            // A concurrent request stored a key first; that one wins.
            Err(StorageError::AlreadyExists(_)) => repo
                .get(user_id)?
                .ok_or_else(|| GatewayError::NotFound(format!("Key for {user_id}"))),
            Err(e) => Err(e.into()),
        }
    }
}
