use serde::{Deserialize, Serialize};

use crate::Dictionary;

/// Fixed time-to-live of a stored record, in milliseconds (1 hour).
pub const TTL_MS: i64 = 60 * 60 * 1000;

/// The persisted cache record.
///
/// Serialized as `{ "fetchTimeStamp": <ms>, "locales": {..}, "language": ".." }`
/// and stored whole under [`STORAGE_KEY`](crate::STORAGE_KEY).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheRecord {
    /// Unix timestamp in milliseconds, set at write time.
    pub fetch_time_stamp: i64,

    /// The flat dictionary.
    pub locales: Dictionary,

    /// Language code active at write time.
    pub language: String,
}

impl CacheRecord {
    /// Create a new record.
    pub fn new(fetch_time_stamp: i64, locales: Dictionary, language: impl Into<String>) -> Self {
        CacheRecord {
            fetch_time_stamp,
            locales,
            language: language.into(),
        }
    }

    /// Age of the record at `now_ms`. Negative if written "in the future".
    ///
    /// Saturates at the `i64` bounds for out-of-range stored timestamps.
    pub fn age_ms(&self, now_ms: i64) -> i64 {
        now_ms.saturating_sub(self.fetch_time_stamp)
    }

    /// Check if the record is still within its TTL.
    ///
    /// A record written exactly `TTL_MS` ago is still fresh.
    pub fn is_fresh(&self, now_ms: i64) -> bool {
        self.fetch_time_stamp >= now_ms.saturating_sub(TTL_MS)
    }

    /// Check if the record was written for `language`.
    pub fn matches_language(&self, language: &str) -> bool {
        self.language == language
    }

    /// Serialize to the stored JSON form.
    pub fn to_json(&self) -> Result<String, crate::LoaderError> {
        serde_json::to_string(self)
            .map_err(|e| crate::LoaderError::Serialization(format!("Serialization failed: {}", e)))
    }
}
