//! Port interfaces for batch queue persistence

use async_trait::async_trait;
use fakturo_domain::{InvoiceDraft, Result};

/// Trait for the persisted backing store of the batch queue.
///
/// Implementations must treat corrupt persisted state as an empty
/// queue (logged, never surfaced); only unavailable storage is an
/// error.
#[async_trait]
pub trait QueueStore: Send + Sync {
    /// Restore the persisted drafts, or an empty list if none exist.
    async fn load(&self) -> Result<Vec<InvoiceDraft>>;

    /// Persist the full draft list, replacing any previous state.
    async fn persist(&self, drafts: &[InvoiceDraft]) -> Result<()>;
}
