// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Per-call backend client.
//!
//! A `BackendClient` is created for one call, connected explicitly, and
//! dropped when the call returns. Dropping it releases its connection; no
//! idle connections are pooled across calls.

use std::time::Instant;

use reqwest::Client;
use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;

use super::BackendError;
use crate::config::ServiceEndpoint;

pub struct BackendClient<'a> {
    service: &'static str,
    endpoint: &'a ServiceEndpoint,
    connection: Option<Client>,
}

impl<'a> BackendClient<'a> {
    /// Create an unconnected client for one backend.
    pub fn new(service: &'static str, endpoint: &'a ServiceEndpoint) -> Self {
        Self {
            service,
            endpoint,
            connection: None,
        }
    }

    /// Build the HTTP connection, bounded by the endpoint timeout.
    pub fn connect(&mut self) -> Result<(), BackendError> {
        if self.connection.is_some() {
            return Ok(());
        }

        let client = Client::builder()
            .timeout(self.endpoint.timeout)
            .connect_timeout(self.endpoint.timeout)
            .pool_max_idle_per_host(0)
            .build()
            .map_err(|e| BackendError::Unavailable {
                service: self.service,
                reason: format!("failed to build HTTP client: {e}"),
            })?;

        self.connection = Some(client);
        Ok(())
    }

    /// POST a JSON body to `path` and decode the JSON response.
    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, BackendError>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let connection = self
            .connection
            .as_ref()
            .ok_or_else(|| BackendError::Unavailable {
                service: self.service,
                reason: "client is not connected".to_string(),
            })?;

        let url = self.endpoint.url_for(path);
        let started = Instant::now();

        let response = connection
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| BackendError::Unavailable {
                service: self.service,
                reason: format!("POST {path} failed: {e}"),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BackendError::Unavailable {
                service: self.service,
                reason: format!("POST {path} returned {status}: {body}"),
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| BackendError::Unavailable {
                service: self.service,
                reason: format!("POST {path} body read failed: {e}"),
            })?;

        debug!(
            service = self.service,
            path,
            status = status.as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Backend call completed"
        );

        serde_json::from_slice(&bytes).map_err(|e| BackendError::InvalidResponse {
            service: self.service,
            reason: format!("POST {path} invalid JSON: {e}"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;
    use std::time::Duration;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[derive(Debug, Deserialize, PartialEq)]
    struct Echo {
        value: u32,
    }

    fn endpoint(base: &str, timeout: Duration) -> ServiceEndpoint {
        ServiceEndpoint::parse("TEST_SERVICE", base, timeout).unwrap()
    }

    #[tokio::test]
    async fn post_requires_connect() {
        let endpoint = endpoint("http://127.0.0.1:9", Duration::from_secs(1));
        let client = BackendClient::new("test", &endpoint);

        let result: Result<Echo, _> = client.post_json("/v1/echo", &json!({})).await;
        assert!(matches!(result, Err(BackendError::Unavailable { .. })));
    }

    #[tokio::test]
    async fn post_json_round_trips_with_backend() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/echo"))
            .and(body_json(json!({"value": 7})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"value": 7})))
            .expect(1)
            .mount(&server)
            .await;

        let endpoint = endpoint(&server.uri(), Duration::from_secs(2));
        let mut client = BackendClient::new("test", &endpoint);
        client.connect().unwrap();
        assert!(client.connection.is_some());

        let echo: Echo = client.post_json("/v1/echo", &json!({"value": 7})).await.unwrap();
        assert_eq!(echo, Echo { value: 7 });
    }

    #[tokio::test]
    async fn non_success_status_is_unavailable() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let endpoint = endpoint(&server.uri(), Duration::from_secs(2));
        let mut client = BackendClient::new("test", &endpoint);
        client.connect().unwrap();

        let result: Result<Echo, _> = client.post_json("/v1/echo", &json!({})).await;
        assert!(matches!(result, Err(BackendError::Unavailable { .. })));
    }

    #[tokio::test]
    async fn garbage_body_is_invalid_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&server)
            .await;

        let endpoint = endpoint(&server.uri(), Duration::from_secs(2));
        let mut client = BackendClient::new("test", &endpoint);
        client.connect().unwrap();

        let result: Result<Echo, _> = client.post_json("/v1/echo", &json!({})).await;
        assert!(matches!(result, Err(BackendError::InvalidResponse { .. })));
    }

    #[tokio::test]
    async fn slow_backend_hits_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"value": 1}))
                    .set_delay(Duration::from_secs(3)),
            )
            .mount(&server)
            .await;

        let endpoint = endpoint(&server.uri(), Duration::from_millis(200));
        let mut client = BackendClient::new("test", &endpoint);
        client.connect().unwrap();

        let result: Result<Echo, _> = client.post_json("/v1/echo", &json!({})).await;
        assert!(matches!(result, Err(BackendError::Unavailable { .. })));
    }
}
