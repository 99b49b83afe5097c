//! Diagnostic events for the loader pipeline.
//!
//! Every anomaly the loader recovers from (unusable cache, missing
//! translation, failed write) and every outcome it reports is emitted as a
//! [`LoaderEvent`] to a user-provided [`EventSink`]. The default sink,
//! [`TracingSink`], forwards events to `tracing` at the event's level.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use locale_cache::{EventSink, LoaderEvent};
//!
//! struct StatsdSink;
//!
//! impl EventSink for StatsdSink {
//!     fn emit(&self, event: LoaderEvent) {
//!         // forward to your backend
//!     }
//! }
//!
//! let loader = LocaleLoader::builder()
//!     .sink(Arc::new(StatsdSink))
//!     .build()?;
//! ```

use std::fmt;
use std::sync::Mutex;

/// Severity of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Info,
    Warn,
    Error,
}

/// Why a stored record was not used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheRejection {
    /// Nothing is stored under the storage key.
    Absent,
    /// The stored blob is not a JSON object.
    Corrupt { detail: String },
    /// `locales` or `fetchTimeStamp` is missing or unusable.
    MissingProperties,
    /// The record is older than the TTL.
    Expired { age_ms: i64 },
    /// The record was written for another language.
    WrongLanguage {
        stored: Option<String>,
        active: String,
    },
}

impl CacheRejection {
    /// Severity of this rejection.
    ///
    /// Data that can't be read is a warning; age and language mismatches are
    /// routine.
    pub fn level(&self) -> Level {
        match self {
            CacheRejection::Corrupt { .. } | CacheRejection::MissingProperties => Level::Warn,
            CacheRejection::Absent
            | CacheRejection::Expired { .. }
            | CacheRejection::WrongLanguage { .. } => Level::Info,
        }
    }
}

impl fmt::Display for CacheRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheRejection::Absent => write!(f, "no locales stored"),
            CacheRejection::Corrupt { detail } => write!(f, "stored locales unreadable: {detail}"),
            CacheRejection::MissingProperties => {
                write!(f, "missing properties in stored locales")
            }
            CacheRejection::Expired { age_ms } => {
                write!(f, "stored locales older than 1h (age {age_ms}ms)")
            }
            CacheRejection::WrongLanguage { stored, active } => write!(
                f,
                "stored locales in wrong language ({} != {active})",
                stored.as_deref().unwrap_or("<none>")
            ),
        }
    }
}

/// Events emitted by the loader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoaderEvent {
    /// A stored record was accepted.
    CacheHit { language: String, entries: usize },
    /// A stored record was not used.
    CacheRejected(CacheRejection),
    /// Reading the store failed; treated as a cache miss.
    StoreReadFailed { store: String, message: String },
    /// A translation key has no entry for the active language.
    MissingTranslation {
        key: String,
        language: String,
        /// The key's raw per-language mapping, serialized.
        available: String,
    },
    /// The server payload was normalized.
    Normalized { language: String, entries: usize },
    /// A fresh record was written to the store.
    CacheWritten {
        language: String,
        fetch_time_stamp: i64,
        entries: usize,
    },
    /// Writing the record failed; the fetched dictionary is still returned.
    CacheWriteFailed { store: String, message: String },
    /// Fetching the locale resource failed.
    FetchFailed { status: u16, message: String },
}

impl LoaderEvent {
    /// Severity of this event.
    pub fn level(&self) -> Level {
        match self {
            LoaderEvent::CacheHit { .. }
            | LoaderEvent::Normalized { .. }
            | LoaderEvent::CacheWritten { .. } => Level::Info,
            LoaderEvent::CacheRejected(reason) => reason.level(),
            LoaderEvent::StoreReadFailed { .. }
            | LoaderEvent::MissingTranslation { .. }
            | LoaderEvent::CacheWriteFailed { .. } => Level::Warn,
            LoaderEvent::FetchFailed { .. } => Level::Error,
        }
    }
}

impl fmt::Display for LoaderEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoaderEvent::CacheHit { language, entries } => {
                write!(f, "took {entries} locales for '{language}' from store")
            }
            LoaderEvent::CacheRejected(reason) => write!(f, "{reason}, requesting from server"),
            LoaderEvent::StoreReadFailed { store, message } => {
                write!(f, "[{store}] reading stored locales failed: {message}")
            }
            LoaderEvent::MissingTranslation {
                key,
                language,
                available,
            } => write!(f, "proper {language} translation missing for {key}:{available}"),
            LoaderEvent::Normalized { language, entries } => {
                write!(f, "normalized {entries} locales for '{language}'")
            }
            LoaderEvent::CacheWritten {
                language,
                fetch_time_stamp,
                entries,
            } => write!(
                f,
                "stored {entries} locales for '{language}' at {fetch_time_stamp}"
            ),
            LoaderEvent::CacheWriteFailed { store, message } => {
                write!(f, "[{store}] storing locales failed: {message}")
            }
            LoaderEvent::FetchFailed { message, .. } => write!(f, "{message}"),
        }
    }
}

/// Receiver for loader events.
///
/// Called synchronously inside the pipeline; implementations should be fast.
pub trait EventSink: Send + Sync {
    /// Emit a single event.
    fn emit(&self, event: LoaderEvent);
}

/// Forwards events to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn emit(&self, event: LoaderEvent) {
        match event.level() {
            Level::Info => tracing::info!(target: "locale_cache", "{}", event),
            Level::Warn => tracing::warn!(target: "locale_cache", "{}", event),
            Level::Error => tracing::error!(target: "locale_cache", "{}", event),
        }
    }
}

/// Keeps every event in memory.
///
/// Useful in tests and for surfacing diagnostics in a debug view.
#[derive(Debug, Default)]
pub struct MemorySink {
    events: Mutex<Vec<LoaderEvent>>,
}

impl MemorySink {
    pub fn new() -> Self {
        MemorySink::default()
    }

    /// Drain and return the recorded events.
    pub fn take_events(&self) -> Vec<LoaderEvent> {
        match self.events.lock() {
            Ok(mut events) => std::mem::take(&mut *events),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        }
    }
}

impl EventSink for MemorySink {
    fn emit(&self, event: LoaderEvent) {
        match self.events.lock() {
            Ok(mut events) => events.push(event),
            Err(poisoned) => poisoned.into_inner().push(event),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejection_levels() {
        assert_eq!(CacheRejection::Absent.level(), Level::Info);
        assert_eq!(CacheRejection::MissingProperties.level(), Level::Warn);
        assert_eq!(
            CacheRejection::Corrupt {
                detail: "eof".into()
            }
            .level(),
            Level::Warn
        );
        assert_eq!(CacheRejection::Expired { age_ms: 1 }.level(), Level::Info);
    }

    #[test]
    fn test_event_levels() {
        let missing = LoaderEvent::MissingTranslation {
            key: "farewell".into(),
            language: "en".into(),
            available: r#"{"fr":"Au revoir"}"#.into(),
        };
        assert_eq!(missing.level(), Level::Warn);
        assert_eq!(
            missing.to_string(),
            r#"proper en translation missing for farewell:{"fr":"Au revoir"}"#
        );

        let failed = LoaderEvent::FetchFailed {
            status: 500,
            message: "boom".into(),
        };
        assert_eq!(failed.level(), Level::Error);
    }

    #[test]
    fn test_wrong_language_display() {
        let reason = CacheRejection::WrongLanguage {
            stored: None,
            active: "de".into(),
        };
        assert_eq!(
            reason.to_string(),
            "stored locales in wrong language (<none> != de)"
        );
    }

    #[test]
    fn test_memory_sink_drains() {
        let sink = MemorySink::new();
        sink.emit(LoaderEvent::CacheRejected(CacheRejection::Absent));
        assert_eq!(sink.take_events().len(), 1);
        assert!(sink.take_events().is_empty());
    }
}
