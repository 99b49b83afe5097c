//! Loads the locale dictionary twice: the first call fetches, the second is served from the store.
//!
//! ```text
//! LOCALES_BASE_URL=https://www.example.com cargo run --example load_locales -- de
//! ```

use locale_cache::{
    LanguageSource, LoaderConfig, LocaleLoader, MokaStore, MokaStoreConfig, StaticLanguage,
    SystemLanguage,
};
use std::sync::Arc;
use std::time::Instant;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "locale_cache=info".into()),
        )
        .init();

    let language: Arc<dyn LanguageSource> = match std::env::args().nth(1) {
        Some(language) => Arc::new(StaticLanguage::new(language)),
        None => Arc::new(SystemLanguage::default()),
    };

    let config = LoaderConfig::from_env();
    eprintln!("Loading {} for '{}'", config.url(), language.active_language());

    let loader = LocaleLoader::builder()
        .config(config)
        .store(Arc::new(MokaStore::new(MokaStoreConfig::default())))
        .language(language)
        .build()?;

    for attempt in 1..=2 {
        let start = Instant::now();
        match loader.load().await {
            Ok(locales) => eprintln!(
                "#{attempt}: {} translations in {:?}",
                locales.len(),
                start.elapsed()
            ),
            Err(e) => {
                eprintln!("#{attempt}: {} ({})", e.message(), e.code());
                return Err(e.into());
            }
        }
    }

    Ok(())
}
