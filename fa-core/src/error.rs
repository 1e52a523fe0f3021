//! Global error types for the Fundi Admin client.
//!
//! All error categories are unified into a single `FaError` enum with
//! conversions from underlying library errors.

use thiserror::Error;

/// Convenience type alias for Results using FaError.
pub type FaResult<T> = Result<T, FaError>;

/// Unified error type covering all error categories in Fundi Admin.
#[derive(Error, Debug)]
pub enum FaError {
    // -- Configuration errors --
    /// Failed to load or parse application configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// A required configuration value is missing.
    #[error("missing configuration: {0}")]
    MissingConfig(String),

    // -- Network errors --
    /// Transport-level failure (DNS, connect, TLS, broken body).
    #[error("http error: {0}")]
    Http(String),

    /// HTTP request timed out.
    #[error("request timeout: {0}")]
    Timeout(String),

    /// Backend answered with a non-2xx status.
    ///
    /// `message` is the backend's `message` field when present, otherwise
    /// a fallback string.
    #[error("{message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Normalized error message.
        message: String,
    },

    // -- Data errors --
    /// Expected payload was absent.
    #[error("not found: {0}")]
    NotFound(String),

    /// A request failed local validation before being sent.
    #[error("invalid request: {0}")]
    Validation(String),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(String),

    // -- Session errors --
    /// The cached session could not be read or written.
    #[error("session error: {0}")]
    Session(String),

    /// Navigation was refused by the route guard.
    #[error("access denied, redirecting to {redirect_to}: {reason}")]
    AccessDenied {
        /// Fallback path the caller should navigate to.
        redirect_to: String,
        /// Why access was refused.
        reason: String,
    },

    // -- File/IO errors --
    /// File system operation failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    // -- Generic --
    /// An unexpected internal error.
    #[error("internal error: {0}")]
    Internal(String),

    /// Wrapping anyhow errors for interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FaError {
    /// The message a UI should show inline for this error.
    ///
    /// Backend errors show the backend text verbatim; everything else
    /// uses the display form.
    pub fn user_message(&self) -> String {
        match self {
            FaError::Api { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }

    /// HTTP status carried by the error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            FaError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for FaError {
    fn from(e: serde_json::Error) -> Self {
        FaError::Serialization(e.to_string())
    }
}

impl From<toml::de::Error> for FaError {
    fn from(e: toml::de::Error) -> Self {
        FaError::Config(e.to_string())
    }
}
