//! HTTP submission sink
//!
//! Each accepted submission is POSTed as JSON to a collection endpoint.

use super::record::SubmissionRecord;
use super::traits::{SinkError, SubmissionSink};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;

/// Default collection host
pub const DEFAULT_ENDPOINT: &str = "https://jsonplaceholder.typicode.com";

/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(5000);

const COLLECTION_PATH: &str = "/posts";

/// Client for the remote submission collection
#[derive(Debug, Clone)]
pub struct RemoteSink {
    client: Client,
    base_url: String,
}

impl RemoteSink {
    /// Create a sink posting under `base_url`
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, SinkError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn collection_url(&self) -> String {
        format!("{}{}", self.base_url, COLLECTION_PATH)
    }
}

#[async_trait]
impl SubmissionSink for RemoteSink {
    async fn load(&self) -> Result<Vec<SubmissionRecord>, SinkError> {
        let response = self.client.get(self.collection_url()).send().await?;
        let status = response.status();
        if status != StatusCode::OK {
            return Err(SinkError::UnexpectedStatus(status.as_u16()));
        }

        // The collection may hold entries that are not submissions
        let entries: Vec<serde_json::Value> = response.json().await?;
        let total = entries.len();
        let records: Vec<SubmissionRecord> = entries
            .into_iter()
            .filter_map(|entry| serde_json::from_value(entry).ok())
            .collect();
        if records.len() < total {
            tracing::debug!(
                skipped = total - records.len(),
                "ignored collection entries that are not submissions"
            );
        }
        Ok(records)
    }

    async fn append(&self, record: &SubmissionRecord) -> Result<(), SinkError> {
        let url = self.collection_url();
        let response = self.client.post(&url).json(record).send().await?;

        // The body does not have to echo the payload
        match response.status() {
            StatusCode::OK | StatusCode::CREATED => {
                tracing::info!(%url, "submission posted");
                Ok(())
            }
            status => {
                tracing::warn!(%url, %status, "submission rejected by endpoint");
                Err(SinkError::UnexpectedStatus(status.as_u16()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn record() -> SubmissionRecord {
        SubmissionRecord {
            nom: "Dupont".to_string(),
            prenom: "Jean".to_string(),
            email: "jean@example.com".to_string(),
            dob: "1990-05-15".to_string(),
            postal: "75001".to_string(),
            city: "Paris".to_string(),
            submitted_at: Utc.with_ymd_and_hms(2026, 10, 18, 9, 30, 0).unwrap(),
        }
    }

    async fn sink_for(server: &MockServer) -> RemoteSink {
        RemoteSink::new(&format!("{}/", server.uri()), DEFAULT_TIMEOUT).unwrap()
    }

    #[tokio::test]
    async fn test_append_posts_json_and_accepts_created() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/posts"))
            .and(body_partial_json(serde_json::json!({
                "nom": "Dupont",
                "city": "Paris",
                "submittedAt": "2026-10-18T09:30:00Z"
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({"id": 101})))
            .expect(1)
            .mount(&server)
            .await;

        sink_for(&server).await.append(&record()).await.unwrap();
    }

    #[tokio::test]
    async fn test_append_accepts_ok() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/posts"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        assert!(sink_for(&server).await.append(&record()).await.is_ok());
    }

    #[tokio::test]
    async fn test_append_rejects_other_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/posts"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let err = sink_for(&server).await.append(&record()).await.unwrap_err();
        assert!(matches!(err, SinkError::UnexpectedStatus(500)));
    }

    #[tokio::test]
    async fn test_load_reads_collection() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/posts"))
            .respond_with(ResponseTemplate::new(200).set_body_json(vec![record()]))
            .mount(&server)
            .await;

        let records = sink_for(&server).await.load().await.unwrap();
        assert_eq!(records, vec![record()]);
    }

    #[tokio::test]
    async fn test_load_skips_foreign_entries() {
        let server = MockServer::start().await;
        let body = serde_json::json!([
            {"userId": 1, "id": 1, "title": "sunt aut facere", "body": "quia et suscipit"},
            serde_json::to_value(record()).unwrap(),
            {"userId": 1, "id": 2, "title": "qui est esse", "body": "est rerum tempore"}
        ]);
        Mock::given(method("GET"))
            .and(path("/posts"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&server)
            .await;

        let records = sink_for(&server).await.load().await.unwrap();
        assert_eq!(records, vec![record()]);
    }

    #[tokio::test]
    async fn test_load_non_array_body_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/posts"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"id": 1})))
            .mount(&server)
            .await;

        assert!(matches!(
            sink_for(&server).await.load().await,
            Err(SinkError::Http(_))
        ));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_http_error() {
        let sink = RemoteSink::new("http://127.0.0.1:9", Duration::from_millis(500)).unwrap();
        assert!(matches!(
            sink.append(&record()).await,
            Err(SinkError::Http(_))
        ));
    }
}
