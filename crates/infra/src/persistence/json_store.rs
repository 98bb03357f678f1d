//! JSON file storage for the batch queue
//!
//! The queue is a single JSON array of drafts. A missing file means an
//! empty queue; a corrupt file is logged and treated as empty rather
//! than blocking the application. Writes go through a temp file and
//! rename so a crash mid-write never truncates the queue.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use fakturo_core::queue::QueueStore;
use fakturo_domain::{FakturoError, InvoiceDraft, Result};
use tracing::{debug, warn};

/// File-backed [`QueueStore`] holding the queue as pretty-printed JSON.
pub struct JsonFileQueueStore {
    path: PathBuf,
}

impl JsonFileQueueStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl QueueStore for JsonFileQueueStore {
    async fn load(&self) -> Result<Vec<InvoiceDraft>> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no queue file yet, starting empty");
                return Ok(Vec::new());
            }
            Err(err) => {
                return Err(FakturoError::Persistence(format!(
                    "Failed to read queue file {}: {err}",
                    self.path.display()
                )));
            }
        };

        match serde_json::from_str::<Vec<InvoiceDraft>>(&raw) {
            Ok(drafts) => {
                debug!(count = drafts.len(), "loaded queue from disk");
                Ok(drafts)
            }
            Err(err) => {
                warn!(
                    path = %self.path.display(),
                    error = %err,
                    "queue file is corrupt, starting with an empty queue"
                );
                Ok(Vec::new())
            }
        }
    }

    async fn persist(&self, drafts: &[InvoiceDraft]) -> Result<()> {
        let json = serde_json::to_string_pretty(drafts)
            .map_err(|e| FakturoError::Persistence(format!("Failed to encode queue: {e}")))?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await.map_err(|e| {
                    FakturoError::Persistence(format!(
                        "Failed to create queue directory {}: {e}",
                        parent.display()
                    ))
                })?;
            }
        }

        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json.as_bytes()).await.map_err(|e| {
            FakturoError::Persistence(format!(
                "Failed to write queue file {}: {e}",
                tmp.display()
            ))
        })?;
        tokio::fs::rename(&tmp, &self.path).await.map_err(|e| {
            FakturoError::Persistence(format!(
                "Failed to replace queue file {}: {e}",
                self.path.display()
            ))
        })?;

        debug!(count = drafts.len(), path = %self.path.display(), "persisted queue");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use fakturo_domain::LineItem;
    use tempfile::TempDir;

    use super::*;

    fn draft(label: &str) -> InvoiceDraft {
        InvoiceDraft {
            contact_id: Some(1),
            contact_label: label.to_string(),
            invoice_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            due_date: None,
            invoice_number: None,
            line_items: vec![LineItem {
                description: "Item".to_string(),
                quantity: 1.0,
                unit_price: 10.0,
                tax_rate_percent: 19.0,
            }],
        }
    }

    #[tokio::test]
    async fn missing_file_loads_as_empty_queue() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileQueueStore::new(dir.path().join("invoice_batch.json"));
        assert!(store.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn persist_then_load_round_trips() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileQueueStore::new(dir.path().join("invoice_batch.json"));

        store.persist(&[draft("Acme"), draft("Beta")]).await.unwrap();
        let loaded = store.load().await.unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].contact_label, "Acme");
        assert_eq!(loaded[1].contact_label, "Beta");
    }

    #[tokio::test]
    async fn corrupt_file_is_treated_as_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("invoice_batch.json");
        std::fs::write(&path, "{ not valid json").unwrap();

        let store = JsonFileQueueStore::new(&path);
        assert!(store.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn persist_creates_missing_parent_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("state").join("invoice_batch.json");

        let store = JsonFileQueueStore::new(&path);
        store.persist(&[draft("Acme")]).await.unwrap();
        assert!(path.exists());
    }

    #[tokio::test]
    async fn persist_overwrites_previous_contents() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileQueueStore::new(dir.path().join("invoice_batch.json"));

        store.persist(&[draft("Acme"), draft("Beta")]).await.unwrap();
        store.persist(&[]).await.unwrap();
        assert!(store.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn no_temp_file_left_behind() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileQueueStore::new(dir.path().join("invoice_batch.json"));

        store.persist(&[draft("Acme")]).await.unwrap();
        let leftovers: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .filter(|name| name.to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }
}
