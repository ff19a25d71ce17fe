// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Account backend RPCs.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{BackendClient, BackendError};
use crate::config::ServiceEndpoint;

const SERVICE: &str = "account";
const DELETE_PATH: &str = "/v1/account/delete";

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct AccountRecord {
    #[serde(default)]
    pub status: String,
}

#[async_trait]
pub trait AccountService: Send + Sync {
    async fn delete(&self, user_id: &str, access_token: &str) -> Result<AccountRecord, BackendError>;
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DeleteRequest<'a> {
    user_id: &'a str,
    access_token: &'a str,
}

pub struct HttpAccountService {
    endpoint: ServiceEndpoint,
}

impl HttpAccountService {
    pub fn new(endpoint: ServiceEndpoint) -> Self {
        Self { endpoint }
    }
}

#[async_trait]
impl AccountService for HttpAccountService {
    async fn delete(&self, user_id: &str, access_token: &str) -> Result<AccountRecord, BackendError> {
        let mut client = BackendClient::new(SERVICE, &self.endpoint);
        client.connect()?;
        client
            .post_json(
                DELETE_PATH,
                &DeleteRequest {
                    user_id,
                    access_token,
                },
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::Duration;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn delete_forwards_user_and_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/account/delete"))
            .and(body_json(json!({"userId": "u1", "accessToken": "tok"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "ok"})))
            .expect(1)
            .mount(&server)
            .await;

        let service = HttpAccountService::new(
            ServiceEndpoint::parse("ACCOUNT_SERVICE", &server.uri(), Duration::from_secs(2))
                .unwrap(),
        );
        let record = service.delete("u1", "tok").await.unwrap();
        assert_eq!(record.status, "ok");
    }
}
