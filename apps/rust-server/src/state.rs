// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use crate::auth::Validator;
use crate::backend::{
    AccountService, HttpAccountService, HttpIdentityService, HttpListService, IdentityService,
    ListService,
};
use crate::config::Config;
use crate::notifications::{delivery_from_config, PushDelivery, PushError};
use crate::storage::DocumentStorage;

/// Shared, read-only application state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub validator: Validator,
    pub lists: Arc<dyn ListService>,
    pub accounts: Arc<dyn AccountService>,
    pub storage: Arc<DocumentStorage>,
    pub push: Arc<dyn PushDelivery>,
}

impl AppState {
    /// Build state with HTTP backends and push delivery taken from `config`.
    pub fn new(config: Config, storage: DocumentStorage) -> Result<Self, PushError> {
        let push = delivery_from_config(&config.notifications, config.services.identity.timeout)?;
        let identity = Arc::new(HttpIdentityService::new(config.services.identity.clone()));

        Ok(Self {
            validator: Validator::new(config.local.development, identity),
            lists: Arc::new(HttpListService::new(config.services.list.clone())),
            accounts: Arc::new(HttpAccountService::new(config.services.account.clone())),
            storage: Arc::new(storage),
            push,
            config: Arc::new(config),
        })
    }

    /// Replace the identity backend.
    pub fn with_identity(mut self, identity: Arc<dyn IdentityService>) -> Self {
        self.validator = Validator::new(self.config.local.development, identity);
        self
    }

    /// Replace the list backend.
    pub fn with_lists(mut self, lists: Arc<dyn ListService>) -> Self {
        self.lists = lists;
        self
    }

    /// Replace the account backend.
    pub fn with_accounts(mut self, accounts: Arc<dyn AccountService>) -> Self {
        self.accounts = accounts;
        self
    }

    /// Replace push delivery.
    pub fn with_push(mut self, push: Arc<dyn PushDelivery>) -> Self {
        self.push = push;
        self
    }

    pub fn development(&self) -> bool {
        self.validator.is_development()
    }

    pub fn storage(&self) -> &DocumentStorage {
        &self.storage
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::auth::validator::tests::FakeIdentity;
    use crate::config::tests::test_config;
    use crate::storage::StoragePaths;
    use tempfile::TempDir;

    /// State whose backends point at a closed port, over a fresh store.
    pub(crate) fn test_state(development: bool) -> (AppState, TempDir) {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let mut storage = DocumentStorage::new(StoragePaths::new(temp_dir.path()));
        storage.initialize().expect("Failed to initialize storage");

        let state = AppState::new(test_config("http://127.0.0.1:1", development), storage)
            .expect("state builds");
        (state, temp_dir)
    }

    #[test]
    fn builder_replaces_identity_but_keeps_mode() {
        let (state, _dir) = test_state(true);
        let state = state.with_identity(Arc::new(FakeIdentity::new(Some(false))));
        assert!(state.validator.is_development());
        assert!(state.development());
        assert!(state.storage().is_initialized());
    }
}
