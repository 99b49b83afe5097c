use async_trait::async_trait;

use crate::error::LoaderError;

/// A store holds serialized blobs under string keys.
///
/// The loader only ever uses a single key ([`STORAGE_KEY`](crate::STORAGE_KEY))
/// and writes whole records, so stores need no partial-update or eviction
/// support. Values are opaque strings; the loader owns their format.
#[async_trait]
pub trait Store: Send + Sync {
    /// A name for diagnostics.
    ///
    /// # Example
    /// - "memory"
    /// - "moka"
    /// - "redis"
    fn name(&self) -> &'static str;

    /// Return the stored blob.
    ///
    /// The response must be `None` when nothing is stored under `key`.
    async fn get(&self, key: &str) -> Result<Option<String>, LoaderError>;

    /// Store `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: String) -> Result<(), LoaderError>;
}
