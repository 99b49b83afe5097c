use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::error::LoaderError;
use crate::store::Store;

/// In-process store using a HashMap behind an async RwLock.
///
/// Contents live as long as the store does. Suitable for tests and for
/// processes that only need to avoid refetching within their own lifetime.
#[derive(Default)]
pub struct HashMapStore {
    state: RwLock<HashMap<String, String>>,
}

impl HashMapStore {
    /// Create an empty HashMapStore.
    pub fn new() -> Self {
        HashMapStore {
            state: RwLock::new(HashMap::new()),
        }
    }

    /// Create a store pre-populated with `value` under `key`.
    pub fn with_value(key: &str, value: impl Into<String>) -> Self {
        let mut state = HashMap::new();
        state.insert(key.to_string(), value.into());
        HashMapStore {
            state: RwLock::new(state),
        }
    }

    /// Number of stored keys.
    pub async fn len(&self) -> usize {
        self.state.read().await.len()
    }

    /// Whether the store is empty.
    pub async fn is_empty(&self) -> bool {
        self.state.read().await.is_empty()
    }
}

#[async_trait]
impl Store for HashMapStore {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn get(&self, key: &str) -> Result<Option<String>, LoaderError> {
        let state = self.state.read().await;
        Ok(state.get(key).cloned())
    }

    async fn set(&self, key: &str, value: String) -> Result<(), LoaderError> {
        let mut state = self.state.write().await;
        state.insert(key.to_string(), value);
        Ok(())
    }
}
