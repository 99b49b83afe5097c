use async_trait::async_trait;
use serde_json::Value;

use crate::Dictionary;
use crate::config::LoaderConfig;
use crate::error::LoaderError;
use crate::events::{EventSink, LoaderEvent};
use crate::language::LanguageSource;
use crate::normalize::normalize;
use crate::reader::STORAGE_KEY;
use crate::record::CacheRecord;
use crate::store::Store;
use crate::utils::now_ms;

/// Retrieves the raw, un-normalized locale payload.
///
/// Implementations return [`LoaderError::Server`] on failure, built with
/// [`LoaderError::server`] so the message carries status and error body.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// A name for diagnostics.
    fn name(&self) -> &'static str;

    /// Issue one request for the locale resource.
    async fn fetch(&self) -> Result<Value, LoaderError>;
}

/// Fetches `GET {base_url}{resource_path}` over HTTP.
pub struct HttpFetcher {
    client: reqwest::Client,
    url: String,
}

impl HttpFetcher {
    /// Build a fetcher from the loader configuration.
    pub fn new(config: &LoaderConfig) -> Result<Self, LoaderError> {
        let mut builder = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::limited(10))
            .user_agent(config.user_agent.as_str());

        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder
            .build()
            .map_err(|e| LoaderError::server(0, &Value::String(e.to_string())))?;

        Ok(HttpFetcher {
            client,
            url: config.url(),
        })
    }

    /// The resolved resource URL.
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    fn name(&self) -> &'static str {
        "http"
    }

    async fn fetch(&self) -> Result<Value, LoaderError> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| LoaderError::server(0, &Value::String(e.to_string())))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| LoaderError::server(status.as_u16(), &Value::String(e.to_string())))?;

        if !status.is_success() {
            return Err(LoaderError::server(status.as_u16(), &parse_lenient(&body)));
        }

        if body.trim().is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_str(&body).map_err(|e| {
            LoaderError::server(
                status.as_u16(),
                &Value::String(format!("invalid JSON body: {}", e)),
            )
        })
    }
}

/// Error bodies are embedded as JSON when they are JSON, as text otherwise.
fn parse_lenient(body: &str) -> Value {
    serde_json::from_str(body).unwrap_or_else(|_| Value::String(body.to_string()))
}

/// Fetch, normalize and write through.
///
/// The active language is read once the response has arrived, so a language
/// switch during the request is honored by both the dictionary and the stored
/// record. Failures are reported to `sink` at error level and returned.
pub async fn fetch_from_server(
    fetcher: &dyn Fetcher,
    store: &dyn Store,
    languages: &dyn LanguageSource,
    sink: &dyn EventSink,
) -> Result<Dictionary, LoaderError> {
    let payload = match fetcher.fetch().await {
        Ok(payload) => payload,
        Err(err) => {
            let status = match &err {
                LoaderError::Server { status, .. } => *status,
                _ => 0,
            };
            sink.emit(LoaderEvent::FetchFailed {
                status,
                message: err.message(),
            });
            return Err(err);
        }
    };

    let language = languages.active_language();
    Ok(write_through(store, &payload, &language, now_ms(), sink).await)
}

/// Normalize `payload` for `language` and replace the stored record.
///
/// A failing write is reported and otherwise ignored; the dictionary is
/// returned either way.
pub async fn write_through(
    store: &dyn Store,
    payload: &Value,
    language: &str,
    now_ms: i64,
    sink: &dyn EventSink,
) -> Dictionary {
    let locales = normalize(Some(payload), language, sink);
    let record = CacheRecord::new(now_ms, locales, language);

    let written = match record.to_json() {
        Ok(json) => store.set(STORAGE_KEY, json).await,
        Err(e) => Err(e),
    };

    match written {
        Ok(()) => sink.emit(LoaderEvent::CacheWritten {
            language: record.language.clone(),
            fetch_time_stamp: record.fetch_time_stamp,
            entries: record.locales.len(),
        }),
        Err(e) => sink.emit(LoaderEvent::CacheWriteFailed {
            store: store.name().to_string(),
            message: e.to_string(),
        }),
    }

    record.locales
}
