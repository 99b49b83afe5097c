use futures::FutureExt;
use futures::future::{BoxFuture, Shared};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::Dictionary;
use crate::builder::LocaleLoaderBuilder;
use crate::error::LoaderError;
use crate::events::EventSink;
use crate::fetcher::{self, Fetcher};
use crate::language::LanguageSource;
use crate::reader;
use crate::store::Store;
use crate::utils::now_ms;

type PendingFetch = Shared<BoxFuture<'static, Result<Dictionary, LoaderError>>>;

/// The fetch currently in flight, tagged so that only its own completion
/// clears it.
#[derive(Default)]
struct InFlight {
    generation: u64,
    pending: Option<PendingFetch>,
}

/// Cache-aside loader for the locale dictionary.
///
/// `load()` returns the stored dictionary while it is less than an hour old
/// and in the active language, and otherwise fetches, normalizes and stores a
/// fresh one. Concurrent `load()` calls that miss the cache share one fetch.
///
/// Cloning is cheap; clones share the store, collaborators and in-flight fetch.
#[derive(Clone)]
pub struct LocaleLoader {
    store: Arc<dyn Store>,
    fetcher: Arc<dyn Fetcher>,
    language: Arc<dyn LanguageSource>,
    sink: Arc<dyn EventSink>,
    in_flight: Arc<Mutex<InFlight>>,
}

impl LocaleLoader {
    /// Create a loader from its collaborators.
    pub fn new(
        store: Arc<dyn Store>,
        fetcher: Arc<dyn Fetcher>,
        language: Arc<dyn LanguageSource>,
        sink: Arc<dyn EventSink>,
    ) -> Self {
        LocaleLoader {
            store,
            fetcher,
            language,
            sink,
            in_flight: Arc::new(Mutex::new(InFlight::default())),
        }
    }

    /// Start building a loader.
    pub fn builder() -> LocaleLoaderBuilder {
        LocaleLoaderBuilder::new()
    }

    /// Return the dictionary from the store, or from the server on a miss.
    ///
    /// Only a failed fetch is an error; an unusable stored record silently
    /// falls through to the fetch. No retries: a later call starts over from
    /// the cache check.
    pub async fn load(&self) -> Result<Dictionary, LoaderError> {
        if let Some(locales) = self.try_read_cache().await {
            return Ok(locales);
        }

        let pending = self.join_or_start_fetch().await;
        pending.await
    }

    /// Return the stored dictionary if it is usable for the active language.
    pub async fn try_read_cache(&self) -> Option<Dictionary> {
        let language = self.language.active_language();
        reader::try_read_cache(&*self.store, &language, now_ms(), &*self.sink).await
    }

    /// Fetch from the server and replace the stored record.
    ///
    /// Bypasses the cache check and does not join an in-flight `load()`.
    pub async fn fetch_from_server(&self) -> Result<Dictionary, LoaderError> {
        fetcher::fetch_from_server(
            &*self.fetcher,
            &*self.store,
            &*self.language,
            &*self.sink,
        )
        .await
    }

    /// Name of the underlying store.
    pub fn store_name(&self) -> &'static str {
        self.store.name()
    }

    /// Name of the underlying fetcher.
    pub fn fetcher_name(&self) -> &'static str {
        self.fetcher.name()
    }

    async fn join_or_start_fetch(&self) -> PendingFetch {
        let mut slot = self.in_flight.lock().await;

        if let Some(pending) = &slot.pending {
            tracing::debug!("joining in-flight locale fetch");
            return pending.clone();
        }

        slot.generation = slot.generation.wrapping_add(1);
        let generation = slot.generation;

        let loader = self.clone();
        let pending = async move {
            let result = loader.fetch_from_server().await;

            let mut slot = loader.in_flight.lock().await;
            if slot.generation == generation {
                slot.pending = None;
            }

            result
        }
        .boxed()
        .shared();

        slot.pending = Some(pending.clone());
        pending
    }
}
