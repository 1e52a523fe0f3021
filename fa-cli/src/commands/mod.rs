//! CLI command implementations.

pub mod session;
pub mod skills;
pub mod sms;
pub mod logs;
pub mod password;
pub mod users;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use fa_api::ApiClient;
use fa_core::config::{ApiConfig, AppConfig, ConfigHandle};
use fa_core::error::{FaError, FaResult};
use fa_models::fixtures::mock_users;
use fa_models::Session;
use fa_services::guard::RouteGuard;
use fa_services::session::{
    FileSessionStore, MemorySessionStore, SessionCredentials, SessionPolicy, SessionStore,
};

/// Helper to open the session store configured for this run.
pub async fn session_store(config: &ConfigHandle) -> FaResult<Arc<dyn SessionStore>> {
    let cfg = config.read().await;
    let path = cfg.effective_session_path()?;
    let policy = SessionPolicy::from_config(&cfg.session);
    Ok(Arc::new(FileSessionStore::new(path, policy)))
}

/// Helper to create an API client authenticated from the session store.
pub async fn create_api_client(config: &ConfigHandle) -> FaResult<ApiClient> {
    let store = session_store(config).await?;
    let api_config = api_config(&*config.read().await)?;
    ApiClient::new(&api_config, Arc::new(SessionCredentials::new(store)))
}

/// API section of the config, refusing to go on without a base URL.
pub fn api_config(config: &AppConfig) -> FaResult<ApiConfig> {
    if !config.is_api_configured() {
        return Err(FaError::MissingConfig(
            "api.base_url is empty, set it in the config file".into(),
        ));
    }
    Ok(config.api.clone())
}

/// Run the route guard against the cached session.
///
/// Returns the session on success and `AccessDenied` naming the redirect
/// target otherwise.
pub async fn require_admin(config: &ConfigHandle) -> FaResult<Session> {
    let store = session_store(config).await?;
    let guard = RouteGuard::from_config(&config.read().await.guard)?;
    guard.enforce(store.as_ref())
}

/// Like [`require_admin`], but `--mock` runs sign in as the fixture admin.
pub async fn require_admin_or_mock(config: &ConfigHandle, mock: bool) -> FaResult<Session> {
    if !mock {
        return require_admin(config).await;
    }
    let store = MemorySessionStore::with_session(
        Session::new("mock-token", Some(mock_users().admin01)),
        SessionPolicy::unlimited(),
    );
    let guard = RouteGuard::from_config(&config.read().await.guard)?;
    guard.enforce(&store)
}

/// Identity recorded as approver for actions taken by `session`.
pub fn actor_id(session: &Session) -> String {
    session
        .user
        .as_ref()
        .map(|u| u.id.clone())
        .unwrap_or_default()
}

/// Print any serializable value as pretty JSON.
pub fn print_json<T: Serialize + ?Sized>(value: &T) {
    println!("{}", serde_json::to_string_pretty(value).unwrap_or_default());
}

/// Format an optional timestamp for tables.
pub fn format_time(ts: Option<DateTime<Utc>>) -> String {
    ts.map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string())
}

/// Truncate a string to a maximum length, appending an ellipsis if truncated.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len > 3 {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{head}...")
    } else {
        s.chars().take(max_len).collect()
    }
}

/// Map a dialoguer failure into the crate error type.
pub fn prompt_error(e: dialoguer::Error) -> FaError {
    FaError::Internal(format!("prompt failed: {e}"))
}
