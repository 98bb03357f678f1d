//! Configuration structures

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub batch: BatchConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Remote API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL for the sevDesk API
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
    /// Minimum interval between outgoing requests in milliseconds
    pub min_request_interval_ms: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: constants::DEFAULT_BASE_URL.to_string(),
            timeout_seconds: constants::DEFAULT_TIMEOUT_SECS,
            min_request_interval_ms: constants::DEFAULT_MIN_REQUEST_INTERVAL_MS,
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    pub fn min_request_interval(&self) -> Duration {
        Duration::from_millis(self.min_request_interval_ms)
    }
}

/// Batch submission settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Delay between consecutive submissions in milliseconds
    pub pacing_ms: u64,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self { pacing_ms: constants::DEFAULT_PACING_MS }
    }
}

impl BatchConfig {
    pub fn pacing(&self) -> Duration {
        Duration::from_millis(self.pacing_ms)
    }
}

/// Local persistence settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path of the persisted batch queue file
    pub queue_path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self { queue_path: PathBuf::from(constants::QUEUE_FILE_NAME) }
    }
}
