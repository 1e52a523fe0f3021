//! Application configuration management.
//!
//! Handles loading, saving, and accessing application configuration including
//! the backend base URL, session policy, and route guard settings. Configuration
//! is persisted as TOML on disk.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;
use serde::{Deserialize, Serialize};

use crate::constants;
use crate::error::{FaError, FaResult};
use crate::platform::Platform;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Backend connection settings.
    #[serde(default)]
    pub api: ApiConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Cached session settings.
    #[serde(default)]
    pub session: SessionConfig,

    /// Route guard settings for protected commands.
    #[serde(default)]
    pub guard: GuardConfig,

    /// SMS composition limits.
    #[serde(default)]
    pub sms: SmsConfig,
}

/// Backend connection configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the REST API (e.g. "https://api.example.co.ke/api").
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Custom HTTP headers as key-value pairs.
    #[serde(default)]
    pub custom_headers: HashMap<String, String>,

    /// Request timeout in milliseconds.
    #[serde(default = "default_api_timeout")]
    pub timeout_ms: u64,

    /// Accept invalid TLS certificates (staging backends only).
    #[serde(default)]
    pub accept_invalid_certs: bool,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Directory for log files. If empty, uses default location.
    #[serde(default)]
    pub directory: String,

    /// Enable JSON structured logging output.
    #[serde(default)]
    pub json_output: bool,
}

/// Session cache configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Path to the session file. If empty, uses default location.
    #[serde(default)]
    pub path: String,

    /// Sessions older than this are treated as absent. Zero disables the check.
    #[serde(default = "default_session_max_age")]
    pub max_age_hours: u64,
}

/// Route guard configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuardConfig {
    /// Roles allowed past the guard. Empty allows any signed-in role.
    #[serde(default = "default_allowed_roles")]
    pub allowed_roles: Vec<String>,

    /// Require the cached `adminApproved` flag to be true.
    #[serde(default = "default_true")]
    pub require_admin_approved: bool,

    /// Redirect target for missing session or disallowed role.
    #[serde(default = "default_fallback_path")]
    pub fallback_path: String,

    /// Redirect target for signed-in but unapproved accounts.
    #[serde(default = "default_approval_fallback_path")]
    pub approval_fallback_path: String,
}

/// SMS composition settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmsConfig {
    /// Maximum message length accepted before sending.
    #[serde(default = "default_max_sms_length")]
    pub max_message_length: usize,

    /// Sender ID passed along with bulk sends, if the backend supports it.
    #[serde(default)]
    pub sender_id: Option<String>,
}

// Default value functions for serde

fn default_base_url() -> String {
    constants::DEFAULT_API_BASE_URL.to_string()
}

fn default_api_timeout() -> u64 {
    constants::DEFAULT_API_TIMEOUT_MS
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_session_max_age() -> u64 {
    24
}

fn default_allowed_roles() -> Vec<String> {
    constants::DEFAULT_ADMIN_ROLES
        .iter()
        .map(|r| r.to_string())
        .collect()
}

fn default_fallback_path() -> String {
    constants::routes::LOGIN.to_string()
}

fn default_approval_fallback_path() -> String {
    constants::routes::PENDING_APPROVAL.to_string()
}

fn default_max_sms_length() -> usize {
    constants::DEFAULT_MAX_SMS_LENGTH
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            custom_headers: HashMap::new(),
            timeout_ms: default_api_timeout(),
            accept_invalid_certs: false,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            directory: String::new(),
            json_output: false,
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            path: String::new(),
            max_age_hours: default_session_max_age(),
        }
    }
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            allowed_roles: default_allowed_roles(),
            require_admin_approved: true,
            fallback_path: default_fallback_path(),
            approval_fallback_path: default_approval_fallback_path(),
        }
    }
}

impl Default for SmsConfig {
    fn default() -> Self {
        Self {
            max_message_length: default_max_sms_length(),
            sender_id: None,
        }
    }
}

impl AppConfig {
    /// Load configuration from the default config file path.
    pub fn load_default() -> FaResult<Self> {
        let path = Self::default_config_path()?;
        if path.exists() {
            Self::load_from_file(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file path.
    pub fn load_from_file(path: &Path) -> FaResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let mut config: AppConfig = toml::from_str(&contents)?;
        config.api.base_url = Self::sanitize_base_url(&config.api.base_url);
        Ok(config)
    }

    /// Save configuration to a specific file path.
    pub fn save_to_file(&self, path: &Path) -> FaResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = toml::to_string_pretty(self)
            .map_err(|e| FaError::Config(format!("failed to serialize config: {e}")))?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> FaResult<PathBuf> {
        Ok(Platform::config_dir()?.join("config.toml"))
    }

    /// Get the effective session file path, using the configured path or the default.
    pub fn effective_session_path(&self) -> FaResult<PathBuf> {
        if self.session.path.is_empty() {
            Ok(Platform::data_dir()?.join("session.json"))
        } else {
            Ok(PathBuf::from(&self.session.path))
        }
    }

    /// Get the effective log directory, using the configured path or the default.
    pub fn effective_log_dir(&self) -> FaResult<PathBuf> {
        if self.logging.directory.is_empty() {
            Ok(Platform::data_dir()?.join("logs"))
        } else {
            Ok(PathBuf::from(&self.logging.directory))
        }
    }

    /// Check whether a backend base URL is configured.
    pub fn is_api_configured(&self) -> bool {
        !self.api.base_url.trim().is_empty()
    }

    /// Sanitize and normalize a base URL.
    ///
    /// Ensures the URL has a scheme and strips surrounding quotes and
    /// trailing slashes. Hosts other than localhost default to https.
    pub fn sanitize_base_url(address: &str) -> String {
        let trimmed = address.trim().trim_matches('"').trim();
        if trimmed.is_empty() {
            return String::new();
        }

        let with_scheme = if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            trimmed.to_string()
        } else if trimmed.starts_with("localhost") || trimmed.starts_with("127.0.0.1") {
            format!("http://{trimmed}")
        } else {
            format!("https://{trimmed}")
        };

        with_scheme.trim_end_matches('/').to_string()
    }
}

/// Thread-safe configuration holder for shared access across services.
#[derive(Clone)]
pub struct ConfigHandle {
    inner: Arc<RwLock<AppConfig>>,
}

impl ConfigHandle {
    /// Create a new configuration handle.
    pub fn new(config: AppConfig) -> Self {
        Self {
            inner: Arc::new(RwLock::new(config)),
        }
    }

    /// Read the configuration.
    pub async fn read(&self) -> tokio::sync::RwLockReadGuard<'_, AppConfig> {
        self.inner.read().await
    }

    /// Write/update the configuration.
    pub async fn write(&self) -> tokio::sync::RwLockWriteGuard<'_, AppConfig> {
        self.inner.write().await
    }
}
