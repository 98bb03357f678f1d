//! Shared request pacing gate
//!
//! Enforces a minimum interval between any two outgoing requests
//! issued through one gateway instance, across all endpoints. This is
//! a fixed pacing discipline, not adaptive to rate-limit feedback,
//! and it composes with the submitter's own inter-item delay.

use std::time::{Duration, Instant};

use tokio::sync::Mutex;
use tracing::trace;

/// Minimum-interval gate over all requests of one gateway.
pub struct RequestGate {
    min_interval: Duration,
    last_request: Mutex<Option<Instant>>,
}

impl RequestGate {
    pub fn new(min_interval: Duration) -> Self {
        Self { min_interval, last_request: Mutex::new(None) }
    }

    /// Wait until the minimum interval since the previous request has
    /// elapsed, then claim the current slot.
    ///
    /// The slot is claimed while holding the lock, so concurrent
    /// callers queue up behind each other and each pair of requests
    /// stays at least `min_interval` apart.
    pub async fn pace(&self) {
        let mut last = self.last_request.lock().await;
        if let Some(previous) = *last {
            let elapsed = previous.elapsed();
            if elapsed < self.min_interval {
                let wait = self.min_interval - elapsed;
                trace!(wait_ms = wait.as_millis() as u64, "pacing outgoing request");
                tokio::time::sleep(wait).await;
            }
        }
        *last = Some(Instant::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn consecutive_requests_are_spaced() {
        let gate = RequestGate::new(Duration::from_millis(40));
        let start = Instant::now();
        gate.pace().await;
        gate.pace().await;
        gate.pace().await;
        // Two enforced gaps of 40ms each.
        assert!(start.elapsed() >= Duration::from_millis(80));
    }

    #[tokio::test]
    async fn first_request_passes_immediately() {
        let gate = RequestGate::new(Duration::from_millis(200));
        let start = Instant::now();
        gate.pace().await;
        assert!(start.elapsed() < Duration::from_millis(100));
    }

    #[tokio::test]
    async fn idle_gate_does_not_delay() {
        let gate = RequestGate::new(Duration::from_millis(20));
        gate.pace().await;
        tokio::time::sleep(Duration::from_millis(30)).await;
        let start = Instant::now();
        gate.pace().await;
        assert!(start.elapsed() < Duration::from_millis(15));
    }
}
