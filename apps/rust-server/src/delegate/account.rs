// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Account delegate. Callers must have validated the principal already.

use tracing::info;

use crate::backend::{status_is_ok, AccountService, BackendError};

pub struct AccountDelegate<'a> {
    service: &'a dyn AccountService,
}

impl<'a> AccountDelegate<'a> {
    pub fn new(service: &'a dyn AccountService) -> Self {
        Self { service }
    }

    pub async fn delete(&self, user_id: &str, access_token: &str) -> Result<(), BackendError> {
        let record = self.service.delete(user_id, access_token).await?;

        if !status_is_ok(&record.status) {
            return Err(BackendError::Application {
                operation: "account.delete",
                status: record.status,
            });
        }

        info!(user_id = %user_id, "Account deleted");
        Ok(())
    }
}
