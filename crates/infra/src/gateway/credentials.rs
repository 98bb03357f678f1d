//! API credential provider
//!
//! The sevDesk API authenticates with a static key sent verbatim as
//! the `Authorization` header value (no Bearer prefix). The trait
//! exists so the gateway never reaches for ambient credential state
//! and so tests and future keychain-backed providers can be injected.

use async_trait::async_trait;
use fakturo_domain::GatewayError;

/// Trait for providing the API key attached to every request.
#[async_trait]
pub trait CredentialProvider: Send + Sync {
    /// Get the current API key.
    async fn api_key(&self) -> Result<String, GatewayError>;
}

/// Fixed API key held in memory, typically read from the environment
/// at startup.
#[derive(Clone)]
pub struct StaticApiKey {
    key: String,
}

impl StaticApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

impl std::fmt::Debug for StaticApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never log the key itself.
        f.debug_struct("StaticApiKey").finish_non_exhaustive()
    }
}

#[async_trait]
impl CredentialProvider for StaticApiKey {
    async fn api_key(&self) -> Result<String, GatewayError> {
        Ok(self.key.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn static_key_is_returned_verbatim() {
        let provider = StaticApiKey::new("abc123");
        assert_eq!(provider.api_key().await.unwrap(), "abc123");
    }

    #[test]
    fn debug_does_not_leak_the_key() {
        let provider = StaticApiKey::new("secret");
        assert!(!format!("{provider:?}").contains("secret"));
    }
}
