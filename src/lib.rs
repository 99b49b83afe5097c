//! locale-cache - A cache-aside loader for localized string dictionaries
//!
//! The server publishes every translation of every key in one nested JSON
//! resource. This crate turns it into a flat `key -> string` dictionary for
//! the active language and keeps that dictionary in a store for an hour:
//! - Cache reads validated by age (1h) and language fingerprint
//! - Corrupt or foreign records degrade to a refetch, never to an error
//! - Missing translations leave gaps instead of failing the load
//! - Concurrent loads share one in-flight fetch
//!
//! # Example
//!
//! ```ignore
//! use locale_cache::{LoaderConfig, LocaleLoader, SharedLanguage};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), locale_cache::LoaderError> {
//!     let language = SharedLanguage::new("de");
//!
//!     let loader = LocaleLoader::builder()
//!         .config(LoaderConfig::new("https://www.example.com"))
//!         .language(Arc::new(language.clone()))
//!         .build()?;
//!
//!     // Fetches /locales.json, stores the German dictionary
//!     let locales = loader.load().await?;
//!
//!     // Served from the store for the next hour
//!     let locales = loader.load().await?;
//!
//!     // Stored record is German, so this refetches
//!     language.set("fr");
//!     let locales = loader.load().await?;
//!     Ok(())
//! }
//! ```

mod builder;
mod config;
mod error;
mod events;
mod fetcher;
mod language;
mod loader;
mod normalize;
mod reader;
mod record;
mod store;
pub mod stores;
mod utils;

use std::collections::HashMap;

/// Flat mapping from translation key to localized string.
pub type Dictionary = HashMap<String, String>;

// Re-export public API
pub use builder::LocaleLoaderBuilder;
pub use config::{DEFAULT_RESOURCE_PATH, LoaderConfig};
pub use error::{LoaderError, SERIALIZATION_ERROR_CODE, SERVER_ERROR_CODE, STORE_ERROR_CODE};
pub use events::{CacheRejection, EventSink, Level, LoaderEvent, MemorySink, TracingSink};
pub use fetcher::{Fetcher, HttpFetcher, fetch_from_server, write_through};
pub use language::{LanguageSource, SharedLanguage, StaticLanguage, SystemLanguage, primary_subtag};
pub use loader::LocaleLoader;
pub use normalize::{NAMESPACE_KEY, normalize};
pub use reader::{STORAGE_KEY, try_read_cache, validate};
pub use record::{CacheRecord, TTL_MS};
pub use store::Store;
pub use stores::memory::HashMapStore;
pub use stores::moka::{MokaStore, MokaStoreConfig};
pub use stores::redis::{RedisStore, RedisStoreConfig};
pub use utils::now_ms;
