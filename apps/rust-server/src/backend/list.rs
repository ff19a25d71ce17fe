// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! List backend RPCs.
//!
//! Responses are returned raw, `status` included. Interpreting the status is
//! the delegate's job.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{BackendClient, BackendError};
use crate::config::ServiceEndpoint;

const SERVICE: &str = "list";

/// Wire shape of every list backend request and response.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ListRecord {
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub data: String,
    #[serde(default)]
    pub iv: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub status: String,
}

#[async_trait]
pub trait ListService: Send + Sync {
    async fn get(&self, user_id: &str) -> Result<ListRecord, BackendError>;
    async fn insert(&self, record: &ListRecord) -> Result<ListRecord, BackendError>;
    async fn update(&self, record: &ListRecord) -> Result<ListRecord, BackendError>;
    async fn delete(&self, user_id: &str) -> Result<ListRecord, BackendError>;
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct UserRequest<'a> {
    user_id: &'a str,
}

pub struct HttpListService {
    endpoint: ServiceEndpoint,
}

impl HttpListService {
    pub fn new(endpoint: ServiceEndpoint) -> Self {
        Self { endpoint }
    }

    async fn call<B>(&self, path: &str, body: &B) -> Result<ListRecord, BackendError>
    where
        B: Serialize + Sync,
    {
        let mut client = BackendClient::new(SERVICE, &self.endpoint);
        client.connect()?;
        client.post_json(path, body).await
    }
}

#[async_trait]
impl ListService for HttpListService {
    async fn get(&self, user_id: &str) -> Result<ListRecord, BackendError> {
        self.call("/v1/todo/get", &UserRequest { user_id }).await
    }

    async fn insert(&self, record: &ListRecord) -> Result<ListRecord, BackendError> {
        self.call("/v1/todo/insert", record).await
    }

    async fn update(&self, record: &ListRecord) -> Result<ListRecord, BackendError> {
        self.call("/v1/todo/update", record).await
    }

    async fn delete(&self, user_id: &str) -> Result<ListRecord, BackendError> {
        self.call("/v1/todo/delete", &UserRequest { user_id }).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::Duration;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn service_for(server: &MockServer) -> HttpListService {
        HttpListService::new(
            ServiceEndpoint::parse("TODO_SERVICE", &server.uri(), Duration::from_secs(2)).unwrap(),
        )
    }

    #[tokio::test]
    async fn get_posts_user_id() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/todo/get"))
            .and(body_json(json!({"userId": "u1"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "userId": "u1", "data": "cipher", "iv": "nonce", "status": "ok"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let record = service_for(&server).get("u1").await.unwrap();
        assert_eq!(record.data, "cipher");
        assert_eq!(record.status, "ok");
    }

    #[tokio::test]
    async fn insert_sends_payload_without_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/todo/insert"))
            .and(body_json(json!({"userId": "u1", "data": "c", "iv": "n"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "duplicate_key"})))
            .expect(1)
            .mount(&server)
            .await;

        let record = ListRecord {
            user_id: "u1".into(),
            data: "c".into(),
            iv: "n".into(),
            status: String::new(),
        };
        let response = service_for(&server).insert(&record).await.unwrap();
        assert_eq!(response.status, "duplicate_key");
        assert!(response.data.is_empty());
    }

    #[tokio::test]
    async fn update_and_delete_use_their_paths() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/todo/update"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "ok"})))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/v1/todo/delete"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"userId": "u1"})))
            .expect(1)
            .mount(&server)
            .await;

        let service = service_for(&server);
        service.update(&ListRecord::default()).await.unwrap();
        let deleted = service.delete("u1").await.unwrap();
        assert_eq!(deleted.user_id, "u1");
    }
}
