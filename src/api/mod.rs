//! HTTP client for the ingestion service.
//!
//! Thin typed wrapper over reqwest: two endpoints, a shared error-body
//! discipline, and no retry or timeout policy of its own.

use crate::model::{ClientConfig, ErrorBody, IngestAccepted, IngestRequest, Priority, StatusReport};
use anyhow::{anyhow, Context, Result};
use serde::de::DeserializeOwned;

/// Fallback shown when an ingest error response carries no `detail`.
pub const SUBMIT_FALLBACK_MSG: &str = "Failed to submit batch";
/// Fallback shown when a status error response carries no `detail`.
pub const STATUS_FALLBACK_MSG: &str = "Failed to fetch status";

#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(cfg: &ClientConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(cfg.user_agent.clone())
            .build()
            .context("build HTTP client")?;
        Ok(Self {
            http,
            base_url: cfg.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// `POST /ingest` with the parsed ids and priority.
    pub async fn submit_batch(&self, ids: &[i64], priority: Priority) -> Result<IngestAccepted> {
        let body = IngestRequest {
            ids: ids.to_vec(),
            priority,
        };
        let resp = self
            .http
            .post(format!("{}/ingest", self.base_url))
            .json(&body)
            .send()
            .await
            .context("send ingest request")?;
        Self::decode(resp, SUBMIT_FALLBACK_MSG).await
    }

    /// `GET /status/{ingestion_id}`.
    pub async fn fetch_status(&self, ingestion_id: &str) -> Result<StatusReport> {
        let resp = self
            .http
            .get(format!("{}/status/{}", self.base_url, ingestion_id))
            .send()
            .await
            .context("send status request")?;
        Self::decode(resp, STATUS_FALLBACK_MSG).await
    }

    /// Shared response handling: 2xx decodes the typed body, anything else
    /// surfaces the error body's `detail` verbatim (or the fallback when the
    /// body is missing, not JSON, or has no detail).
    async fn decode<T: DeserializeOwned>(resp: reqwest::Response, fallback: &str) -> Result<T> {
        if !resp.status().is_success() {
            let detail = resp
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(|b| b.detail)
                .unwrap_or_else(|| fallback.to_string());
            return Err(anyhow!(detail));
        }
        resp.json::<T>().await.context("decode response body")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_config(base_url: String) -> ClientConfig {
        ClientConfig {
            base_url,
            user_agent: "batch-ingest-cli/test".into(),
            toast_ttl: Duration::from_secs(3),
        }
    }

    #[tokio::test]
    async fn submit_posts_ids_and_priority_and_returns_id() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/ingest"))
            .and(body_json(serde_json::json!({
                "ids": [1, 2, 4],
                "priority": "HIGH"
            })))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"ingestion_id": "abc123"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = ApiClient::new(&test_config(server.uri())).unwrap();
        let accepted = client
            .submit_batch(&[1, 2, 4], Priority::High)
            .await
            .unwrap();
        assert_eq!(accepted.ingestion_id, "abc123");
    }

    #[tokio::test]
    async fn error_detail_is_surfaced_verbatim() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/status/missing"))
            .respond_with(
                ResponseTemplate::new(404).set_body_json(serde_json::json!({"detail": "not found"})),
            )
            .mount(&server)
            .await;

        let client = ApiClient::new(&test_config(server.uri())).unwrap();
        let err = client.fetch_status("missing").await.unwrap_err();
        assert_eq!(format!("{err:#}"), "not found");
    }

    #[tokio::test]
    async fn missing_detail_falls_back_to_generic_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/ingest"))
            .respond_with(ResponseTemplate::new(500).set_body_json(serde_json::json!({})))
            .mount(&server)
            .await;

        let client = ApiClient::new(&test_config(server.uri())).unwrap();
        let err = client.submit_batch(&[1], Priority::Medium).await.unwrap_err();
        assert_eq!(format!("{err:#}"), SUBMIT_FALLBACK_MSG);
    }

    #[tokio::test]
    async fn non_json_error_body_falls_back_to_generic_message() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/status/abc"))
            .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
            .mount(&server)
            .await;

        let client = ApiClient::new(&test_config(server.uri())).unwrap();
        let err = client.fetch_status("abc").await.unwrap_err();
        assert_eq!(format!("{err:#}"), STATUS_FALLBACK_MSG);
    }

    #[tokio::test]
    async fn success_body_without_ingestion_id_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/ingest"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .mount(&server)
            .await;

        let client = ApiClient::new(&test_config(server.uri())).unwrap();
        assert!(client.submit_batch(&[1], Priority::Low).await.is_err());
    }

    #[tokio::test]
    async fn base_url_trailing_slash_is_tolerated() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/status/abc"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "ingestion_id": "abc",
                "status": "completed",
                "batches": []
            })))
            .mount(&server)
            .await;

        let cfg = test_config(format!("{}/", server.uri()));
        let client = ApiClient::new(&cfg).unwrap();
        let report = client.fetch_status("abc").await.unwrap();
        assert_eq!(report.status, "completed");
    }
}
