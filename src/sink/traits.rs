//! Trait abstraction for submission sinks to enable mocking in tests

use super::record::SubmissionRecord;
use async_trait::async_trait;
use thiserror::Error;

/// Errors raised while reading or writing submissions
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("stored submissions are not valid JSON: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("endpoint answered with status {0}")]
    UnexpectedStatus(u16),
}

/// Where accepted submissions end up
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubmissionSink: Send + Sync {
    /// Every record stored so far
    async fn load(&self) -> Result<Vec<SubmissionRecord>, SinkError>;

    /// Record one more submission
    async fn append(&self, record: &SubmissionRecord) -> Result<(), SinkError>;
}
