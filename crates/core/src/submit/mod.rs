//! Batch submitter
//!
//! Drains a snapshot of the batch queue against the invoice gateway,
//! one draft at a time, in original order. Per-item failures are
//! recorded and never abort the run; a fixed pacing delay separates
//! consecutive requests; a cancellation token is honored at the top of
//! each iteration.

pub mod ports;

use std::sync::Arc;
use std::time::Duration;

use fakturo_domain::{FakturoError, SubmissionOutcome};
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

use crate::queue::BatchQueue;
pub use ports::InvoiceGateway;

/// Errors that surface before or after the submission loop.
///
/// Failures of individual drafts are not errors; they become
/// [`SubmissionOutcome::Failure`] entries in the run report.
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("nothing to submit: the batch queue is empty")]
    NothingToSubmit,

    #[error(transparent)]
    Fakturo(#[from] FakturoError),
}

/// Result of one batch run.
#[derive(Debug, Clone)]
pub struct BatchRunReport {
    /// One outcome per attempted draft, in snapshot order.
    pub outcomes: Vec<SubmissionOutcome>,
    pub success_count: usize,
    /// True when the run was cancelled before reaching the last draft.
    /// Outcomes cover only the drafts attempted up to that point.
    pub cancelled: bool,
}

impl BatchRunReport {
    pub fn failure_count(&self) -> usize {
        self.outcomes.len() - self.success_count
    }
}

/// Sequential batch submitter.
///
/// Processing is strictly one draft at a time: the remote API enforces
/// undocumented rate limits, and sequential order keeps outcome
/// indexing deterministic.
pub struct BatchSubmitter {
    gateway: Arc<dyn InvoiceGateway>,
    queue: Arc<BatchQueue>,
    pacing: Duration,
}

impl BatchSubmitter {
    pub fn new(gateway: Arc<dyn InvoiceGateway>, queue: Arc<BatchQueue>) -> Self {
        Self { gateway, queue, pacing: Duration::from_millis(200) }
    }

    /// Override the inter-item pacing delay.
    pub fn with_pacing(mut self, pacing: Duration) -> Self {
        self.pacing = pacing;
        self
    }

    /// Run one batch submission over a snapshot of the queue.
    ///
    /// Short-circuits with [`SubmitError::NothingToSubmit`] on an
    /// empty queue, before any network traffic. After the loop, the
    /// live queue is cleared whenever at least one draft succeeded,
    /// including any failed drafts. That mirrors the long-standing
    /// observed behavior and is chosen deliberately; callers that want
    /// failed drafts retained must re-queue them from the report.
    #[instrument(skip(self, cancel))]
    pub async fn run(&self, cancel: &CancellationToken) -> Result<BatchRunReport, SubmitError> {
        let snapshot = self.queue.snapshot().await;
        if snapshot.is_empty() {
            return Err(SubmitError::NothingToSubmit);
        }

        info!(count = snapshot.len(), "starting batch submission");

        let mut outcomes = Vec::with_capacity(snapshot.len());
        let mut success_count = 0usize;
        let mut cancelled = false;
        let last = snapshot.len() - 1;

        for (index, draft) in snapshot.iter().enumerate() {
            if cancel.is_cancelled() {
                warn!(attempted = index, total = snapshot.len(), "batch run cancelled");
                cancelled = true;
                break;
            }

            match self.gateway.create_invoice(draft).await {
                Ok(created) => {
                    debug!(index = index + 1, remote_id = created.id, "invoice created");
                    success_count += 1;
                    outcomes.push(SubmissionOutcome::Success {
                        remote_id: created.id,
                        remote_invoice_number: created.invoice_number,
                    });
                }
                Err(err) => {
                    warn!(index = index + 1, error = %err, "invoice submission failed");
                    outcomes.push(SubmissionOutcome::Failure { reason: err.reason() });
                }
            }

            // Pace the next request regardless of this one's outcome.
            // The wait itself stays cancel-aware so an abort does not
            // linger for a full pacing interval.
            if index < last {
                tokio::select! {
                    _ = tokio::time::sleep(self.pacing) => {}
                    _ = cancel.cancelled() => {}
                }
            }
        }

        if success_count > 0 {
            // Observed source behavior, preserved: any success clears
            // the whole queue, dropping failed drafts with it.
            self.queue.clear().await.map_err(SubmitError::Fakturo)?;
        }

        info!(
            submitted = success_count,
            failed = outcomes.len() - success_count,
            cancelled,
            "batch submission finished"
        );

        Ok(BatchRunReport { outcomes, success_count, cancelled })
    }
}
