use std::env;
use std::time::Duration;

/// Default path of the locale resource.
pub const DEFAULT_RESOURCE_PATH: &str = "/locales.json";

/// Configuration for the loader's HTTP side.
///
/// The storage key, namespace key and TTL are fixed and not part of the
/// configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderConfig {
    /// Origin serving the locale resource, e.g. `https://www.example.com`.
    pub base_url: String,

    /// Path of the locale resource on `base_url`.
    pub resource_path: String,

    /// User agent sent with the request.
    pub user_agent: String,

    /// Request timeout. `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        LoaderConfig {
            base_url: "http://localhost:8080".to_string(),
            resource_path: DEFAULT_RESOURCE_PATH.to_string(),
            user_agent: concat!("locale-cache/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout: None,
        }
    }
}

impl LoaderConfig {
    /// Configuration for the given origin, other fields at their defaults.
    pub fn new(base_url: impl Into<String>) -> Self {
        LoaderConfig {
            base_url: base_url.into(),
            ..LoaderConfig::default()
        }
    }

    /// Defaults overridden from environment variables.
    ///
    /// - `LOCALES_BASE_URL`: origin serving the resource
    /// - `LOCALES_RESOURCE_PATH`: resource path
    /// - `LOCALES_TIMEOUT_MS`: request timeout in milliseconds
    ///
    /// Unparseable values are ignored.
    pub fn from_env() -> Self {
        let defaults = LoaderConfig::default();
        LoaderConfig {
            base_url: env::var("LOCALES_BASE_URL").unwrap_or(defaults.base_url),
            resource_path: env::var("LOCALES_RESOURCE_PATH").unwrap_or(defaults.resource_path),
            user_agent: defaults.user_agent,
            timeout: env::var("LOCALES_TIMEOUT_MS")
                .ok()
                .and_then(|s| s.parse().ok())
                .map(Duration::from_millis)
                .or(defaults.timeout),
        }
    }

    /// Full URL of the locale resource.
    pub fn url(&self) -> String {
        let base = self.base_url.trim_end_matches('/');
        if self.resource_path.starts_with('/') {
            format!("{}{}", base, self.resource_path)
        } else {
            format!("{}/{}", base, self.resource_path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joins_without_double_slash() {
        assert_eq!(
            LoaderConfig::new("https://example.com/").url(),
            "https://example.com/locales.json"
        );

        let config = LoaderConfig {
            resource_path: "i18n/locales.json".to_string(),
            ..LoaderConfig::new("https://example.com")
        };
        assert_eq!(config.url(), "https://example.com/i18n/locales.json");
    }

    #[test]
    fn test_default_has_no_timeout() {
        let config = LoaderConfig::default();
        assert_eq!(config.timeout, None);
        assert_eq!(config.resource_path, "/locales.json");
        assert!(config.user_agent.starts_with("locale-cache/"));
    }
}
