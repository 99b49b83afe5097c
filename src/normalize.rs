//! Flattening of the nested server payload into a one-language dictionary.

use serde_json::Value;

use crate::Dictionary;
use crate::events::{EventSink, LoaderEvent};

/// Top-level key under which the server nests all translations.
pub const NAMESPACE_KEY: &str = "web.cornercard.";

/// Transform a raw server payload into a flat dictionary for `language`.
///
/// Expects `{ "web.cornercard.": { <key>: { <language>: <string> } } }`.
/// Never fails: an absent payload or one without the namespace yields an empty
/// dictionary, and a key without a usable translation for `language` is left
/// out and reported as [`LoaderEvent::MissingTranslation`]. Empty strings and
/// non-string values count as missing.
pub fn normalize(payload: Option<&Value>, language: &str, sink: &dyn EventSink) -> Dictionary {
    let mut trans = Dictionary::new();

    let Some(data) = payload
        .and_then(|p| p.get(NAMESPACE_KEY))
        .and_then(Value::as_object)
    else {
        return trans;
    };

    for (key, locale) in data {
        match locale.get(language).and_then(Value::as_str) {
            Some(text) if !text.is_empty() => {
                trans.insert(key.clone(), text.to_string());
            }
            _ => sink.emit(LoaderEvent::MissingTranslation {
                key: key.clone(),
                language: language.to_string(),
                available: locale.to_string(),
            }),
        }
    }

    sink.emit(LoaderEvent::Normalized {
        language: language.to_string(),
        entries: trans.len(),
    });

    trans
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{Level, MemorySink};
    use serde_json::json;

    #[test]
    fn test_missing_translation_is_omitted() {
        let sink = MemorySink::new();
        let payload = json!({
            "web.cornercard.": {
                "greeting": {"en": "Hi"},
                "farewell": {"fr": "Au revoir"}
            }
        });

        let result = normalize(Some(&payload), "en", &sink);

        let mut expected = Dictionary::new();
        expected.insert("greeting".to_string(), "Hi".to_string());
        assert_eq!(result, expected);

        let warnings: Vec<_> = sink
            .take_events()
            .into_iter()
            .filter(|e| e.level() == Level::Warn)
            .collect();
        assert_eq!(warnings.len(), 1);
        match &warnings[0] {
            LoaderEvent::MissingTranslation { key, language, .. } => {
                assert_eq!(key, "farewell");
                assert_eq!(language, "en");
            }
            other => panic!("Expected MissingTranslation, got {:?}", other),
        }
    }

    #[test]
    fn test_absent_and_empty_payloads() {
        let sink = MemorySink::new();
        assert!(normalize(None, "en", &sink).is_empty());
        assert!(normalize(Some(&json!({})), "en", &sink).is_empty());
        assert!(normalize(Some(&json!(null)), "en", &sink).is_empty());
        assert!(normalize(Some(&json!({"web.cornercard.": "oops"})), "en", &sink).is_empty());
        assert!(normalize(Some(&json!({"other.ns.": {"k": {"en": "v"}}})), "en", &sink).is_empty());
    }

    #[test]
    fn test_same_input_same_output() {
        let sink = MemorySink::new();
        let payload = json!({
            "web.cornercard.": {
                "a": {"de": "Eins", "en": "One"},
                "b": {"de": "Zwei"},
                "c": {"en": "Three"}
            }
        });

        let first = normalize(Some(&payload), "de", &sink);
        let second = normalize(Some(&payload), "de", &sink);
        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
        assert_eq!(first.get("a").map(String::as_str), Some("Eins"));
    }

    #[test]
    fn test_empty_and_non_string_values_are_missing() {
        let sink = MemorySink::new();
        let payload = json!({
            "web.cornercard.": {
                "empty": {"en": ""},
                "number": {"en": 42},
                "flat": "not a map",
                "ok": {"en": "fine"}
            }
        });

        let result = normalize(Some(&payload), "en", &sink);
        assert_eq!(result.len(), 1);
        assert!(result.contains_key("ok"));

        let missing = sink
            .take_events()
            .into_iter()
            .filter(|e| matches!(e, LoaderEvent::MissingTranslation { .. }))
            .count();
        assert_eq!(missing, 3);
    }
}
