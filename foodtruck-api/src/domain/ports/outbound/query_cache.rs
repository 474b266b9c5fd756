use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache backend error: {0}")]
    Backend(String),
}

/// Outbound port for the query-result cache.
///
/// A best-effort accelerator: entries may vanish at any time according to the
/// backend's own eviction policy, and callers treat every error as a miss.
#[async_trait]
pub trait QueryCache: Send + Sync + 'static {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError>;

    async fn set(&self, key: &str, value: Vec<u8>) -> Result<(), CacheError>;
}
