//! Application context - dependency injection container

use std::sync::Arc;

use fakturo_core::queue::BatchQueue;
use fakturo_core::submit::BatchSubmitter;
use fakturo_domain::{Config, FakturoError, Result};
use fakturo_infra::{JsonFileQueueStore, SevdeskGateway, StaticApiKey};
use tracing::debug;

/// Environment variable holding the sevDesk API key.
///
/// Kept out of the config file so the key never ends up committed next
/// to pacing settings.
const API_KEY_VAR: &str = "FAKTURO_API_KEY";

/// Holds the loaded configuration and the restored batch queue.
///
/// The gateway is built on demand: queue-only commands (`list`,
/// `remove`, `clear`, `import`, `add`) must work without an API key.
pub struct AppContext {
    pub config: Config,
    pub queue: Arc<BatchQueue>,
}

impl AppContext {
    /// Load configuration and restore the persisted queue.
    pub async fn init() -> Result<Self> {
        let config = fakturo_infra::config::load()?;
        Self::with_config(config).await
    }

    pub async fn with_config(config: Config) -> Result<Self> {
        debug!(queue_path = %config.storage.queue_path.display(), "initialising context");
        let store = Arc::new(JsonFileQueueStore::new(config.storage.queue_path.clone()));
        let queue = Arc::new(BatchQueue::load(store).await?);
        Ok(Self { config, queue })
    }

    /// Build the API gateway from the environment-provided key.
    pub fn gateway(&self) -> Result<Arc<SevdeskGateway>> {
        let key = std::env::var(API_KEY_VAR)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| {
                FakturoError::Auth(format!("{API_KEY_VAR} is not set; export your sevDesk API key"))
            })?;

        let gateway = SevdeskGateway::new(&self.config.api, Arc::new(StaticApiKey::new(key)))?;
        Ok(Arc::new(gateway))
    }

    /// Build a submitter over the shared queue with configured pacing.
    pub fn submitter(&self, gateway: Arc<SevdeskGateway>) -> BatchSubmitter {
        BatchSubmitter::new(gateway, self.queue.clone()).with_pacing(self.config.batch.pacing())
    }
}
