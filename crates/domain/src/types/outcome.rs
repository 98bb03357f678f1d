//! Per-draft submission outcomes and run summaries

use serde::{Deserialize, Serialize};

/// Identifiers returned by the remote API for a created invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedInvoice {
    pub id: i64,
    pub invoice_number: Option<String>,
}

/// Result of one submission attempt.
///
/// The submitter records exactly one outcome per draft, in snapshot
/// order, so index `i` always refers to the `i`-th queued draft.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SubmissionOutcome {
    Success { remote_id: i64, remote_invoice_number: Option<String> },
    Failure { reason: String },
}

impl SubmissionOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

/// Aggregated result of a batch run, ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub success_count: usize,
    pub failure_count: usize,
    /// One line per draft, 1-based, in original queue order.
    pub per_item_messages: Vec<String>,
}
