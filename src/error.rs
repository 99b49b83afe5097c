/// Error code reported for failed locale fetches.
pub const SERVER_ERROR_CODE: &str = "serverError";

/// Error code reported for failed store operations.
pub const STORE_ERROR_CODE: &str = "storeError";

/// Error code reported for serialization failures.
pub const SERIALIZATION_ERROR_CODE: &str = "serializationError";

/// Error type for loader operations.
///
/// Only [`LoaderError::Server`] is ever returned from
/// [`LocaleLoader::load`](crate::LocaleLoader::load); the other variants come
/// from direct store access and are recovered internally by the loader.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoaderError {
    /// The locale resource could not be fetched or decoded.
    #[error("{message}")]
    Server {
        /// HTTP status, `0` when no response was received.
        status: u16,
        /// Diagnostic message embedding the status and raw error body.
        message: String,
    },
    /// A store operation failed.
    #[error("[{store}] store error for key '{key}': {message}")]
    Store {
        store: String,
        key: String,
        message: String,
    },
    /// Serialization or deserialization failed.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl LoaderError {
    /// Create a server error from the response status and raw error body.
    ///
    /// The body is embedded as JSON so that strings stay quoted and structured
    /// bodies stay readable in logs.
    pub fn server(status: u16, body: &serde_json::Value) -> Self {
        let body = serde_json::to_string(body).unwrap_or_else(|_| "null".to_string());
        LoaderError::Server {
            status,
            message: format!("Couldn't load locales. Status: {status}. Message: {body}"),
        }
    }

    /// Create a new store error.
    pub fn store(
        store: impl Into<String>,
        key: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        LoaderError::Store {
            store: store.into(),
            key: key.into(),
            message: message.into(),
        }
    }

    /// Machine-readable error code.
    pub fn code(&self) -> &'static str {
        match self {
            LoaderError::Server { .. } => SERVER_ERROR_CODE,
            LoaderError::Store { .. } => STORE_ERROR_CODE,
            LoaderError::Serialization(_) => SERIALIZATION_ERROR_CODE,
        }
    }

    /// Human-readable message, without the code.
    pub fn message(&self) -> String {
        match self {
            LoaderError::Server { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}
