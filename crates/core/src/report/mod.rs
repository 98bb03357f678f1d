//! Outcome reporter
//!
//! Pure presentation aggregator: turns an ordered outcome sequence
//! into counts and human-readable per-item messages. Indexing is
//! 1-based and matches the original draft order, so "Invoice 3" in
//! the report is always the third queued draft.

use fakturo_domain::{BatchSummary, SubmissionOutcome};

/// Aggregate a run's outcomes into a displayable summary.
pub fn summarize(outcomes: &[SubmissionOutcome]) -> BatchSummary {
    let mut success_count = 0;
    let mut failure_count = 0;

    let per_item_messages = outcomes
        .iter()
        .enumerate()
        .map(|(idx, outcome)| match outcome {
            SubmissionOutcome::Success { remote_id, remote_invoice_number } => {
                success_count += 1;
                match remote_invoice_number {
                    Some(number) => {
                        format!("Invoice {} - created (id {}, number {})", idx + 1, remote_id, number)
                    }
                    None => format!("Invoice {} - created (id {})", idx + 1, remote_id),
                }
            }
            SubmissionOutcome::Failure { reason } => {
                failure_count += 1;
                format!("Invoice {} - failed: {}", idx + 1, reason)
            }
        })
        .collect();

    BatchSummary { success_count, failure_count, per_item_messages }
}
