//! Persisted batch queue
//!
//! An ordered collection of invoice drafts that survives restarts.
//! Every mutation is flushed through the [`QueueStore`] port before
//! the call returns, so an already-added draft is never lost.

pub mod ports;

use std::sync::Arc;

use fakturo_domain::{InvoiceDraft, Result};
use tokio::sync::Mutex;
use tracing::{debug, info};

pub use ports::QueueStore;

/// The ordered, persisted batch of queued invoice drafts.
///
/// Duplicates are legal: the user may queue the same invoice twice
/// deliberately. The queue owns its drafts exclusively; the submitter
/// works on a snapshot taken at run start.
pub struct BatchQueue {
    store: Arc<dyn QueueStore>,
    drafts: Mutex<Vec<InvoiceDraft>>,
}

impl BatchQueue {
    /// Restore the queue from persisted state at startup.
    ///
    /// Missing or corrupt state comes back from the store as an empty
    /// list; only unavailable storage propagates as an error.
    pub async fn load(store: Arc<dyn QueueStore>) -> Result<Self> {
        let drafts = store.load().await?;
        info!(count = drafts.len(), "batch queue restored");
        Ok(Self { store, drafts: Mutex::new(drafts) })
    }

    /// Append a draft to the end of the queue and persist.
    pub async fn append(&self, draft: InvoiceDraft) -> Result<()> {
        let mut drafts = self.drafts.lock().await;
        drafts.push(draft);
        self.store.persist(&drafts).await?;
        debug!(count = drafts.len(), "draft appended to batch queue");
        Ok(())
    }

    /// Remove the draft at `index` and persist.
    ///
    /// Out-of-range indices are a silent no-op, which also makes
    /// repeated removal of the same index idempotent.
    pub async fn remove_at(&self, index: usize) -> Result<()> {
        let mut drafts = self.drafts.lock().await;
        if index >= drafts.len() {
            return Ok(());
        }
        drafts.remove(index);
        self.store.persist(&drafts).await?;
        debug!(index, count = drafts.len(), "draft removed from batch queue");
        Ok(())
    }

    /// Empty the queue and persist.
    pub async fn clear(&self) -> Result<()> {
        let mut drafts = self.drafts.lock().await;
        drafts.clear();
        self.store.persist(&drafts).await?;
        debug!("batch queue cleared");
        Ok(())
    }

    /// Immutable ordered copy for the submitter to iterate.
    ///
    /// The live queue may keep changing during a run; the snapshot is
    /// unaffected.
    pub async fn snapshot(&self) -> Vec<InvoiceDraft> {
        self.drafts.lock().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.drafts.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.drafts.lock().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use fakturo_domain::LineItem;

    use super::*;

    /// In-memory store recording every persisted state.
    #[derive(Default)]
    struct MemoryStore {
        state: std::sync::Mutex<Vec<InvoiceDraft>>,
        writes: std::sync::atomic::AtomicUsize,
    }

    #[async_trait]
    impl QueueStore for MemoryStore {
        async fn load(&self) -> Result<Vec<InvoiceDraft>> {
            Ok(self.state.lock().unwrap().clone())
        }

        async fn persist(&self, drafts: &[InvoiceDraft]) -> Result<()> {
            *self.state.lock().unwrap() = drafts.to_vec();
            self.writes.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            Ok(())
        }
    }

    fn draft(label: &str) -> InvoiceDraft {
        InvoiceDraft {
            contact_id: Some(1),
            contact_label: label.to_string(),
            invoice_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
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
    async fn append_persists_immediately() {
        let store = Arc::new(MemoryStore::default());
        let queue = BatchQueue::load(store.clone()).await.unwrap();

        queue.append(draft("A")).await.unwrap();
        queue.append(draft("B")).await.unwrap();

        assert_eq!(store.state.lock().unwrap().len(), 2);
        assert_eq!(store.writes.load(std::sync::atomic::Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn load_restores_previous_state() {
        let store = Arc::new(MemoryStore::default());
        {
            let queue = BatchQueue::load(store.clone()).await.unwrap();
            queue.append(draft("A")).await.unwrap();
        }
        let queue = BatchQueue::load(store).await.unwrap();
        assert_eq!(queue.len().await, 1);
    }

    #[tokio::test]
    async fn remove_at_out_of_range_is_noop() {
        let store = Arc::new(MemoryStore::default());
        let queue = BatchQueue::load(store).await.unwrap();
        queue.append(draft("A")).await.unwrap();

        queue.remove_at(0).await.unwrap();
        // Second removal of the same index: no error, no change.
        queue.remove_at(0).await.unwrap();
        assert!(queue.is_empty().await);
    }

    #[tokio::test]
    async fn remove_at_keeps_order() {
        let store = Arc::new(MemoryStore::default());
        let queue = BatchQueue::load(store).await.unwrap();
        for label in ["A", "B", "C"] {
            queue.append(draft(label)).await.unwrap();
        }

        queue.remove_at(1).await.unwrap();
        let snapshot = queue.snapshot().await;
        let labels: Vec<_> = snapshot.iter().map(|d| d.contact_label.as_str()).collect();
        assert_eq!(labels, ["A", "C"]);
    }

    #[tokio::test]
    async fn duplicates_are_legal() {
        let store = Arc::new(MemoryStore::default());
        let queue = BatchQueue::load(store).await.unwrap();
        queue.append(draft("A")).await.unwrap();
        queue.append(draft("A")).await.unwrap();
        assert_eq!(queue.len().await, 2);
    }

    #[tokio::test]
    async fn snapshot_is_unaffected_by_later_mutation() {
        let store = Arc::new(MemoryStore::default());
        let queue = BatchQueue::load(store).await.unwrap();
        queue.append(draft("A")).await.unwrap();

        let snapshot = queue.snapshot().await;
        queue.clear().await.unwrap();

        assert_eq!(snapshot.len(), 1);
        assert!(queue.is_empty().await);
    }
}
