use std::time::Duration;

use async_trait::async_trait;
use moka::sync::Cache;

use crate::domain::ports::outbound::{CacheError, QueryCache};

/// In-process query cache backed by moka.
///
/// Entries are evicted by entry count and, when configured, by age.
#[derive(Clone)]
pub struct MokaQueryCache {
    entries: Cache<String, Vec<u8>>,
}

impl MokaQueryCache {
    pub fn new(max_capacity: u64, time_to_live: Option<Duration>) -> Self {
        let mut builder = Cache::builder().max_capacity(max_capacity);
        if let Some(ttl) = time_to_live {
            builder = builder.time_to_live(ttl);
        }

        Self {
            entries: builder.build(),
        }
    }
}

#[async_trait]
impl QueryCache for MokaQueryCache {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        Ok(self.entries.get(key))
    }

    async fn set(&self, key: &str, value: Vec<u8>) -> Result<(), CacheError> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn stores_and_returns_bytes() {
        let cache = MokaQueryCache::new(100, None);
        assert_eq!(cache.get("k").await.unwrap(), None);

        cache.set("k", b"[1,2]".to_vec()).await.unwrap();
        assert_eq!(cache.get("k").await.unwrap(), Some(b"[1,2]".to_vec()));
    }

    #[tokio::test]
    async fn last_writer_wins() {
        let cache = MokaQueryCache::new(100, None);
        cache.set("k", b"old".to_vec()).await.unwrap();
        cache.set("k", b"new".to_vec()).await.unwrap();
        assert_eq!(cache.get("k").await.unwrap(), Some(b"new".to_vec()));
    }

    #[tokio::test]
    async fn entries_expire_after_ttl() {
        let cache = MokaQueryCache::new(100, Some(Duration::from_millis(50)));
        cache.set("k", b"v".to_vec()).await.unwrap();
        tokio::time::sleep(Duration::from_millis(150)).await;
        assert_eq!(cache.get("k").await.unwrap(), None);
    }
}
