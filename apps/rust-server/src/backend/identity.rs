// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Identity backend: confirms that an access token belongs to a subject.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{BackendClient, BackendError};
use crate::config::ServiceEndpoint;

const SERVICE: &str = "identity";
const CHECK_PATH: &str = "/v1/check";

#[async_trait]
pub trait IdentityService: Send + Sync {
    /// `Ok(false)` means the backend answered and rejected the principal.
    async fn check(&self, access_token: &str, subject: &str) -> Result<bool, BackendError>;
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CheckRequest<'a> {
    access_token: &'a str,
    subject: &'a str,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CheckResponse {
    is_valid: bool,
}

pub struct HttpIdentityService {
    endpoint: ServiceEndpoint,
}

impl HttpIdentityService {
    pub fn new(endpoint: ServiceEndpoint) -> Self {
        Self { endpoint }
    }
}

#[async_trait]
impl IdentityService for HttpIdentityService {
    async fn check(&self, access_token: &str, subject: &str) -> Result<bool, BackendError> {
        let mut client = BackendClient::new(SERVICE, &self.endpoint);
        client.connect()?;

        let response: CheckResponse = client
            .post_json(
                CHECK_PATH,
                &CheckRequest {
                    access_token,
                    subject,
                },
            )
            .await?;

        Ok(response.is_valid)
    }
}
