use serde_json::Value;

use crate::Dictionary;
use crate::events::{CacheRejection, EventSink, LoaderEvent};
use crate::record::CacheRecord;
use crate::store::Store;

/// Key under which the record is stored.
pub const STORAGE_KEY: &str = "locales";

/// Return the stored dictionary if a usable record exists.
///
/// Anything wrong with the stored record, including a failing store, is a
/// miss: the reason is emitted to `sink` and `None` is returned.
pub async fn try_read_cache(
    store: &dyn Store,
    language: &str,
    now_ms: i64,
    sink: &dyn EventSink,
) -> Option<Dictionary> {
    let blob = match store.get(STORAGE_KEY).await {
        Ok(blob) => blob,
        Err(e) => {
            sink.emit(LoaderEvent::StoreReadFailed {
                store: store.name().to_string(),
                message: e.to_string(),
            });
            return None;
        }
    };

    let Some(blob) = blob else {
        sink.emit(LoaderEvent::CacheRejected(CacheRejection::Absent));
        return None;
    };

    match validate(&blob, language, now_ms) {
        Ok(locales) => {
            sink.emit(LoaderEvent::CacheHit {
                language: language.to_string(),
                entries: locales.len(),
            });
            Some(locales)
        }
        Err(reason) => {
            sink.emit(LoaderEvent::CacheRejected(reason));
            None
        }
    }
}

/// Decide whether a stored blob is usable for `language` at `now_ms`.
///
/// Checks run in order: parseable object, `locales` and `fetchTimeStamp`
/// present, age within the TTL, language match.
pub fn validate(blob: &str, language: &str, now_ms: i64) -> Result<Dictionary, CacheRejection> {
    let value: Value = serde_json::from_str(blob).map_err(|e| CacheRejection::Corrupt {
        detail: e.to_string(),
    })?;

    let Some(object) = value.as_object() else {
        return Err(CacheRejection::Corrupt {
            detail: format!("expected an object, got {}", value),
        });
    };

    let (Some(locales), Some(fetch_time_stamp)) = (
        object.get("locales").filter(|v| !v.is_null()),
        object.get("fetchTimeStamp").and_then(timestamp),
    ) else {
        return Err(CacheRejection::MissingProperties);
    };

    let locales: Dictionary =
        serde_json::from_value(locales.clone()).map_err(|e| CacheRejection::Corrupt {
            detail: format!("locales: {}", e),
        })?;

    let language_stored = object
        .get("language")
        .and_then(Value::as_str)
        .map(str::to_string);

    let record = CacheRecord::new(
        fetch_time_stamp,
        locales,
        language_stored.clone().unwrap_or_default(),
    );

    if !record.is_fresh(now_ms) {
        return Err(CacheRejection::Expired {
            age_ms: record.age_ms(now_ms),
        });
    }

    if language_stored.is_none() || !record.matches_language(language) {
        return Err(CacheRejection::WrongLanguage {
            stored: language_stored,
            active: language.to_string(),
        });
    }

    Ok(record.locales)
}

/// Read a timestamp field; zero and non-numbers count as missing.
fn timestamp(value: &Value) -> Option<i64> {
    let ts = value
        .as_i64()
        .or_else(|| value.as_f64().map(|f| f as i64))?;
    (ts != 0).then_some(ts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::MemorySink;
    use crate::record::TTL_MS;
    use crate::stores::memory::HashMapStore;
    use serde_json::json;

    const NOW: i64 = 1_700_000_000_000;

    fn blob(ts: i64, language: &str) -> String {
        json!({
            "fetchTimeStamp": ts,
            "locales": {"greeting": "Hi"},
            "language": language
        })
        .to_string()
    }

    #[test]
    fn test_valid_record_returns_locales_unchanged() {
        let locales = validate(&blob(NOW - 1000, "en"), "en", NOW).unwrap();
        assert_eq!(locales.len(), 1);
        assert_eq!(locales.get("greeting").map(String::as_str), Some("Hi"));
    }

    #[test]
    fn test_expired_record_rejected() {
        let result = validate(&blob(NOW - TTL_MS - 1, "en"), "en", NOW);
        assert_eq!(
            result,
            Err(CacheRejection::Expired {
                age_ms: TTL_MS + 1
            })
        );

        // Exactly one hour old is still accepted
        assert!(validate(&blob(NOW - TTL_MS, "en"), "en", NOW).is_ok());
    }

    #[test]
    fn test_far_past_timestamp_is_expired() {
        let min = json!({"fetchTimeStamp": i64::MIN, "locales": {}, "language": "en"}).to_string();
        assert_eq!(
            validate(&min, "en", NOW),
            Err(CacheRejection::Expired { age_ms: i64::MAX })
        );

        // Float timestamps beyond the i64 range clamp to its bounds
        let huge = r#"{"fetchTimeStamp": -1e30, "locales": {}, "language": "en"}"#;
        assert_eq!(
            validate(huge, "en", NOW),
            Err(CacheRejection::Expired { age_ms: i64::MAX })
        );
    }

    #[tokio::test]
    async fn test_far_past_timestamp_reads_as_miss() {
        let sink = MemorySink::new();
        let store = HashMapStore::with_value(
            STORAGE_KEY,
            r#"{"fetchTimeStamp":-9223372036854775808,"locales":{},"language":"en"}"#,
        );

        assert!(try_read_cache(&store, "en", NOW, &sink).await.is_none());
        assert!(matches!(
            sink.take_events().as_slice(),
            [LoaderEvent::CacheRejected(CacheRejection::Expired { .. })]
        ));
    }

    #[test]
    fn test_wrong_language_rejected() {
        let result = validate(&blob(NOW, "fr"), "en", NOW);
        assert_eq!(
            result,
            Err(CacheRejection::WrongLanguage {
                stored: Some("fr".into()),
                active: "en".into()
            })
        );
    }

    #[test]
    fn test_missing_language_rejected() {
        let blob = json!({"fetchTimeStamp": NOW, "locales": {}}).to_string();
        assert!(matches!(
            validate(&blob, "en", NOW),
            Err(CacheRejection::WrongLanguage { stored: None, .. })
        ));
    }

    #[test]
    fn test_missing_properties_rejected() {
        let no_locales = json!({"fetchTimeStamp": NOW, "language": "en"}).to_string();
        let no_ts = json!({"locales": {}, "language": "en"}).to_string();
        let zero_ts = json!({"fetchTimeStamp": 0, "locales": {}, "language": "en"}).to_string();
        let null_locales =
            json!({"fetchTimeStamp": NOW, "locales": null, "language": "en"}).to_string();

        for blob in [no_locales, no_ts, zero_ts, null_locales] {
            assert_eq!(
                validate(&blob, "en", NOW),
                Err(CacheRejection::MissingProperties),
                "{blob}"
            );
        }
    }

    #[test]
    fn test_corrupt_blob_rejected() {
        let full = blob(NOW, "en");
        assert!(matches!(
            validate(&full[..20], "en", NOW),
            Err(CacheRejection::Corrupt { .. })
        ));
        assert!(matches!(
            validate("null", "en", NOW),
            Err(CacheRejection::Corrupt { .. })
        ));
        let bad_locales =
            json!({"fetchTimeStamp": NOW, "locales": {"k": 1}, "language": "en"}).to_string();
        assert!(matches!(
            validate(&bad_locales, "en", NOW),
            Err(CacheRejection::Corrupt { .. })
        ));
    }

    #[test]
    fn test_empty_locales_accepted() {
        let blob = json!({"fetchTimeStamp": NOW, "locales": {}, "language": "en"}).to_string();
        assert_eq!(validate(&blob, "en", NOW), Ok(Dictionary::new()));
    }

    #[tokio::test]
    async fn test_try_read_cache_emits_reason() {
        let sink = MemorySink::new();
        let store = HashMapStore::new();

        assert!(try_read_cache(&store, "en", NOW, &sink).await.is_none());
        assert_eq!(
            sink.take_events(),
            vec![LoaderEvent::CacheRejected(CacheRejection::Absent)]
        );

        store
            .set(STORAGE_KEY, blob(NOW - TTL_MS * 2, "en"))
            .await
            .unwrap();
        assert!(try_read_cache(&store, "en", NOW, &sink).await.is_none());
        assert!(matches!(
            sink.take_events().as_slice(),
            [LoaderEvent::CacheRejected(CacheRejection::Expired { .. })]
        ));

        store.set(STORAGE_KEY, blob(NOW, "en")).await.unwrap();
        assert!(try_read_cache(&store, "en", NOW, &sink).await.is_some());
        assert_eq!(
            sink.take_events(),
            vec![LoaderEvent::CacheHit {
                language: "en".into(),
                entries: 1
            }]
        );
    }
}
