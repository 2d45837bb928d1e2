//! Local submission store
//!
//! Submissions are kept as a JSON array in a single file, the
//! `form_submissions` key. Reads treat a missing file as an empty list and
//! every append rewrites the whole list.

use super::record::SubmissionRecord;
use super::traits::{SinkError, SubmissionSink};
use async_trait::async_trait;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Well-known key the submissions are stored under
pub const STORAGE_KEY: &str = "form_submissions";

/// Append-only list of submissions on disk
#[derive(Debug, Clone)]
pub struct LocalStore {
    path: PathBuf,
}

impl LocalStore {
    /// Store backed by an explicit file
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Default store location in the platform data directory
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("io", "signup", "signup-form")
            .map(|dirs| dirs.data_dir().join(format!("{STORAGE_KEY}.json")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl SubmissionSink for LocalStore {
    async fn load(&self) -> Result<Vec<SubmissionRecord>, SinkError> {
        match fs::read_to_string(&self.path).await {
            Ok(content) if content.trim().is_empty() => Ok(Vec::new()),
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }

    async fn append(&self, record: &SubmissionRecord) -> Result<(), SinkError> {
        let mut records = self.load().await?;
        records.push(record.clone());

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }
        let content = serde_json::to_string(&records)?;
        fs::write(&self.path, content).await?;

        tracing::info!(
            path = %self.path.display(),
            count = records.len(),
            "submission stored locally"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use tempfile::tempdir;

    fn record(nom: &str) -> SubmissionRecord {
        SubmissionRecord {
            nom: nom.to_string(),
            prenom: "Jean".to_string(),
            email: "jean@example.com".to_string(),
            dob: "1990-05-15".to_string(),
            postal: "75001".to_string(),
            city: "Paris".to_string(),
            submitted_at: Utc::now(),
        }
    }

    #[test]
    fn test_default_path_uses_storage_key() {
        if let Some(path) = LocalStore::default_path() {
            assert!(path.ends_with("form_submissions.json"));
        }
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let dir = tempdir().unwrap();
        let store = LocalStore::new(dir.path().join("none.json"));
        let records = tokio_test::block_on(store.load()).unwrap();
        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn test_append_preserves_existing_records() {
        let dir = tempdir().unwrap();
        let store = LocalStore::new(dir.path().join("nested").join("subs.json"));

        store.append(&record("Dupont")).await.unwrap();
        store.append(&record("Martin")).await.unwrap();

        let records = store.load().await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].nom, "Dupont");
        assert_eq!(records[1].nom, "Martin");
    }

    #[tokio::test]
    async fn test_file_holds_a_json_array() {
        let dir = tempdir().unwrap();
        let store = LocalStore::new(dir.path().join("subs.json"));
        store.append(&record("Dupont")).await.unwrap();

        let raw = std::fs::read_to_string(store.path()).unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(json.as_array().map(Vec::len), Some(1));
        assert!(json[0].get("submittedAt").is_some());
    }

    #[tokio::test]
    async fn test_corrupt_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("subs.json");
        std::fs::write(&path, "not json").unwrap();

        let store = LocalStore::new(&path);
        assert!(matches!(
            store.load().await,
            Err(SinkError::Serialization(_))
        ));
        assert!(store.append(&record("Dupont")).await.is_err());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "not json");
    }
}
