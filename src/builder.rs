//! Builder API for wiring a [`LocaleLoader`] from its collaborators.

use std::sync::Arc;

use crate::config::LoaderConfig;
use crate::error::LoaderError;
use crate::events::{EventSink, TracingSink};
use crate::fetcher::{Fetcher, HttpFetcher};
use crate::language::{LanguageSource, SystemLanguage};
use crate::loader::LocaleLoader;
use crate::store::Store;
use crate::stores::memory::HashMapStore;

/// Builder for [`LocaleLoader`].
///
/// Every collaborator is optional:
/// - store: an in-process [`HashMapStore`]
/// - fetcher: an [`HttpFetcher`] built from the config
/// - language: the OS locale via [`SystemLanguage`]
/// - sink: [`TracingSink`]
///
/// # Example
///
/// ```ignore
/// use locale_cache::{LoaderConfig, LocaleLoader, StaticLanguage};
/// use std::sync::Arc;
///
/// let loader = LocaleLoader::builder()
///     .config(LoaderConfig::new("https://www.example.com"))
///     .language(Arc::new(StaticLanguage::new("de")))
///     .build()?;
///
/// let locales = loader.load().await?;
/// ```
#[derive(Default)]
pub struct LocaleLoaderBuilder {
    config: Option<LoaderConfig>,
    store: Option<Arc<dyn Store>>,
    fetcher: Option<Arc<dyn Fetcher>>,
    language: Option<Arc<dyn LanguageSource>>,
    sink: Option<Arc<dyn EventSink>>,
}

impl LocaleLoaderBuilder {
    /// Create a new LocaleLoaderBuilder.
    pub fn new() -> Self {
        LocaleLoaderBuilder::default()
    }

    /// HTTP configuration, used when no fetcher is set.
    pub fn config(mut self, config: LoaderConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Store holding the cache record.
    pub fn store(mut self, store: Arc<dyn Store>) -> Self {
        self.store = Some(store);
        self
    }

    /// Source of the raw payload; overrides the config-based HTTP fetcher.
    pub fn fetcher(mut self, fetcher: Arc<dyn Fetcher>) -> Self {
        self.fetcher = Some(fetcher);
        self
    }

    /// Source of the active language code.
    pub fn language(mut self, language: Arc<dyn LanguageSource>) -> Self {
        self.language = Some(language);
        self
    }

    /// Receiver of diagnostic events.
    pub fn sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Build the loader.
    ///
    /// Fails only if the default HTTP client cannot be constructed.
    pub fn build(self) -> Result<LocaleLoader, LoaderError> {
        let fetcher = match self.fetcher {
            Some(fetcher) => fetcher,
            None => {
                let config = self.config.unwrap_or_default();
                Arc::new(HttpFetcher::new(&config)?) as Arc<dyn Fetcher>
            }
        };

        let store = self
            .store
            .unwrap_or_else(|| Arc::new(HashMapStore::new()) as Arc<dyn Store>);
        let language = self
            .language
            .unwrap_or_else(|| Arc::new(SystemLanguage::default()) as Arc<dyn LanguageSource>);
        let sink = self
            .sink
            .unwrap_or_else(|| Arc::new(TracingSink) as Arc<dyn EventSink>);

        Ok(LocaleLoader::new(store, fetcher, language, sink))
    }
}
