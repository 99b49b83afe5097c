use async_trait::async_trait;
use moka::future::Cache;
use std::time::Duration;

use crate::error::LoaderError;
use crate::store::Store;

/// Configuration for MokaStore.
#[derive(Debug, Clone)]
pub struct MokaStoreConfig {
    /// Maximum number of blobs the store can hold.
    pub max_capacity: u64,

    /// Time to live: blobs are dropped this long after insertion.
    /// `None` means blobs are kept until replaced.
    ///
    /// This only frees memory; record freshness is still decided by the
    /// record's own timestamp.
    pub time_to_live: Option<Duration>,
}

impl Default for MokaStoreConfig {
    fn default() -> Self {
        MokaStoreConfig {
            max_capacity: 16,
            time_to_live: None,
        }
    }
}

/// Concurrent in-process store backed by Moka.
pub struct MokaStore {
    cache: Cache<String, String>,
}

impl MokaStore {
    /// Create a new MokaStore with the given configuration.
    ///
    /// # Example
    /// ```ignore
    /// let store = MokaStore::new(MokaStoreConfig {
    ///     max_capacity: 16,
    ///     time_to_live: Some(Duration::from_secs(3600)),
    /// });
    /// ```
    pub fn new(config: MokaStoreConfig) -> Self {
        let mut builder = Cache::builder().max_capacity(config.max_capacity);

        if let Some(ttl) = config.time_to_live {
            builder = builder.time_to_live(ttl);
        }

        MokaStore {
            cache: builder.build(),
        }
    }

    /// Number of stored blobs (for monitoring/debugging).
    pub fn entry_count(&self) -> u64 {
        self.cache.entry_count()
    }
}

#[async_trait]
impl Store for MokaStore {
    fn name(&self) -> &'static str {
        "moka"
    }

    async fn get(&self, key: &str) -> Result<Option<String>, LoaderError> {
        Ok(self.cache.get(key).await)
    }

    async fn set(&self, key: &str, value: String) -> Result<(), LoaderError> {
        self.cache.insert(key.to_string(), value).await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_get_set() {
        let store = MokaStore::new(MokaStoreConfig::default());

        let result = store.get("locales").await.unwrap();
        assert!(result.is_none());

        store.set("locales", "blob".to_string()).await.unwrap();

        let result = store.get("locales").await.unwrap();
        assert_eq!(result.as_deref(), Some("blob"));
    }

    #[tokio::test]
    async fn test_time_to_live_drops_blob() {
        let store = MokaStore::new(MokaStoreConfig {
            max_capacity: 16,
            time_to_live: Some(Duration::from_millis(20)),
        });

        store.set("locales", "blob".to_string()).await.unwrap();
        tokio::time::sleep(Duration::from_millis(60)).await;

        let result = store.get("locales").await.unwrap();
        assert!(result.is_none());
    }
}
