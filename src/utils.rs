//! Shared utilities.

use std::fmt::Display;
use std::time::{SystemTime, UNIX_EPOCH};

/// Build a composite key from a prefix and key.
///
/// Format: `{prefix}::{key}`
pub fn build_cache_key<N: Display>(prefix: &N, key: &str) -> String {
    format!("{}::{}", prefix, key)
}

/// Get the current time in milliseconds since UNIX epoch.
///
/// A clock set before the epoch reads as `0`.
pub fn now_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_cache_key() {
        let key = build_cache_key(&"shop", "locales");
        assert_eq!(key, "shop::locales");
    }

    #[test]
    fn test_now_ms_is_positive() {
        let now = now_ms();
        assert!(now > 0);
    }
}
