// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! List delegate.
//!
//! | Backend status | Operation | Outcome |
//! |----------------|-----------|---------|
//! | `""` / `"ok"` | any | success |
//! | `"not_found"` | get | `None` |
//! | `"duplicate_key"` / `"already_exists"` | create | submitted list, no error |
//! | anything else | any | `BackendError::Application` |

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use utoipa::ToSchema;

use crate::backend::{status_is_ok, BackendError, ListRecord, ListService};

const STATUS_NOT_FOUND: &str = "not_found";
const DUPLICATE_STATUSES: [&str; 2] = ["duplicate_key", "already_exists"];

/// A user's encrypted list. `data` and `iv` are opaque to the gateway.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StoredList {
    pub user_id: String,
    /// Ciphertext
    pub data: String,
    /// Initialization vector
    pub iv: String,
}

impl From<ListRecord> for StoredList {
    fn from(record: ListRecord) -> Self {
        Self {
            user_id: record.user_id,
            data: record.data,
            iv: record.iv,
        }
    }
}

impl From<&StoredList> for ListRecord {
    fn from(list: &StoredList) -> Self {
        Self {
            user_id: list.user_id.clone(),
            data: list.data.clone(),
            iv: list.iv.clone(),
            status: String::new(),
        }
    }
}

pub struct ListDelegate<'a> {
    service: &'a dyn ListService,
}

impl<'a> ListDelegate<'a> {
    pub fn new(service: &'a dyn ListService) -> Self {
        Self { service }
    }

    /// `None` when the user has no list.
    pub async fn get(&self, user_id: &str) -> Result<Option<StoredList>, BackendError> {
        let record = self.service.get(user_id).await?;

        if record.status == STATUS_NOT_FOUND {
            return Ok(None);
        }
        ensure_ok("list.get", &record.status)?;

        if record.data.is_empty() {
            return Ok(None);
        }

        Ok(Some(StoredList {
            user_id: if record.user_id.is_empty() {
                user_id.to_string()
            } else {
                record.user_id
            },
            data: record.data,
            iv: record.iv,
        }))
    }

    /// Create the list. A duplicate key counts as success and returns the
    /// submitted list.
    pub async fn create(&self, list: StoredList) -> Result<StoredList, BackendError> {
        let record = self.service.insert(&ListRecord::from(&list)).await?;

        if DUPLICATE_STATUSES.contains(&record.status.as_str()) {
            debug!(user_id = %list.user_id, "List already exists, treating create as success");
            return Ok(list);
        }
        ensure_ok("list.create", &record.status)?;

        info!(user_id = %list.user_id, "List created");
        Ok(list)
    }

    pub async fn update(&self, list: StoredList) -> Result<StoredList, BackendError> {
        let record = self.service.update(&ListRecord::from(&list)).await?;
        ensure_ok("list.update", &record.status)?;
        Ok(list)
    }

    pub async fn delete(&self, user_id: &str) -> Result<StoredList, BackendError> {
        let record = self.service.delete(user_id).await?;
        ensure_ok("list.delete", &record.status)?;

        info!(user_id = %user_id, "List deleted");
        Ok(StoredList {
            user_id: user_id.to_string(),
            data: record.data,
            iv: record.iv,
        })
    }
}

fn ensure_ok(operation: &'static str, status: &str) -> Result<(), BackendError> {
    if status_is_ok(status) {
        Ok(())
    } else {
        Err(BackendError::Application {
            operation,
            status: status.to_string(),
        })
    }
}
