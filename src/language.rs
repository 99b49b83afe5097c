//! Sources of the active language code.
//!
//! The loader asks its [`LanguageSource`] again at every step (cache check,
//! fetch, normalization), so a language switch is picked up by the next call.

use std::sync::{Arc, RwLock};
use unic_langid::LanguageIdentifier;

/// Provides the currently active language code, e.g. `"de"`.
pub trait LanguageSource: Send + Sync {
    fn active_language(&self) -> String;
}

/// A language fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticLanguage(String);

impl StaticLanguage {
    pub fn new(language: impl Into<String>) -> Self {
        StaticLanguage(language.into())
    }
}

impl LanguageSource for StaticLanguage {
    fn active_language(&self) -> String {
        self.0.clone()
    }
}

/// A language that can be switched at runtime, shared between clones.
///
/// # Example
/// ```ignore
/// let language = SharedLanguage::new("de");
/// let loader = LocaleLoader::builder().language(Arc::new(language.clone())).build()?;
/// // user picks French in the settings
/// language.set("fr");
/// ```
#[derive(Debug, Clone, Default)]
pub struct SharedLanguage {
    current: Arc<RwLock<String>>,
}

impl SharedLanguage {
    pub fn new(language: impl Into<String>) -> Self {
        SharedLanguage {
            current: Arc::new(RwLock::new(language.into())),
        }
    }

    /// Switch the active language.
    pub fn set(&self, language: impl Into<String>) {
        let language = language.into();
        match self.current.write() {
            Ok(mut current) => *current = language,
            Err(poisoned) => *poisoned.into_inner() = language,
        }
    }
}

impl LanguageSource for SharedLanguage {
    fn active_language(&self) -> String {
        match self.current.read() {
            Ok(current) => current.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

/// The operating system's locale, reduced to its primary language subtag.
///
/// `de-CH` becomes `de`. Falls back to `fallback` when the OS reports no
/// locale or one that doesn't parse.
#[derive(Debug, Clone)]
pub struct SystemLanguage {
    fallback: String,
}

impl SystemLanguage {
    pub fn new(fallback: impl Into<String>) -> Self {
        SystemLanguage {
            fallback: fallback.into(),
        }
    }
}

impl Default for SystemLanguage {
    fn default() -> Self {
        SystemLanguage::new("en")
    }
}

impl LanguageSource for SystemLanguage {
    fn active_language(&self) -> String {
        sys_locale::get_locale()
            .and_then(|locale| primary_subtag(&locale))
            .unwrap_or_else(|| self.fallback.clone())
    }
}

/// Primary language subtag of a locale string, lowercased.
///
/// Accepts POSIX-style names like `de_CH.UTF-8` as well as BCP 47 tags.
pub fn primary_subtag(locale: &str) -> Option<String> {
    let tag = locale.split(['.', '@']).next()?.replace('_', "-");
    let langid: LanguageIdentifier = tag.parse().ok()?;
    let language = langid.language.as_str();
    if language == "und" {
        return None;
    }
    Some(language.to_string())
}
