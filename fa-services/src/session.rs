//! Locally cached session storage.
//!
//! The route guard and the credential provider read the session through
//! [`SessionStore::get_session`], which applies an expiry policy: a session
//! past its maximum age, or whose token is a JWT with an elapsed `exp`,
//! reads as absent.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{DateTime, Duration, TimeZone, Utc};
use tracing::{debug, warn};

use fa_api::CredentialProvider;
use fa_core::config::SessionConfig;
use fa_core::error::{FaError, FaResult};
use fa_models::Session;

/// Upper bound on the configured age so the duration cannot overflow.
const MAX_AGE_HOURS_CAP: u64 = 24 * 365 * 100;

/// When a cached session stops counting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionPolicy {
    /// Maximum time since the session was stored. `None` disables the check.
    pub max_age: Option<Duration>,
}

impl SessionPolicy {
    pub fn from_config(config: &SessionConfig) -> Self {
        let max_age = (config.max_age_hours > 0)
            .then(|| Duration::hours(config.max_age_hours.min(MAX_AGE_HOURS_CAP) as i64));
        Self { max_age }
    }

    /// No expiry checks at all.
    pub fn unlimited() -> Self {
        Self { max_age: None }
    }

    /// Whether the session is still usable at `now`.
    pub fn is_valid(&self, session: &Session, now: DateTime<Utc>) -> bool {
        if let Some(max_age) = self.max_age {
            if session.is_older_than(max_age, now) {
                debug!("session older than {} hour(s)", max_age.num_hours());
                return false;
            }
        }
        if let Some(exp) = jwt_expiry(&session.token) {
            if exp <= now {
                debug!("session token expired at {exp}");
                return false;
            }
        }
        true
    }
}

/// Read the `exp` claim of a JWT without verifying it.
///
/// Returns `None` for tokens that are not JWTs or carry no `exp`.
pub fn jwt_expiry(token: &str) -> Option<DateTime<Utc>> {
    let mut parts = token.split('.');
    let (_header, payload, _sig) = (parts.next()?, parts.next()?, parts.next()?);
    if parts.next().is_some() {
        return None;
    }
    let bytes = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('=')).ok()?;
    let claims: serde_json::Value = serde_json::from_slice(&bytes).ok()?;
    let exp = claims.get("exp")?.as_i64()?;
    Utc.timestamp_opt(exp, 0).single()
}

/// Typed access to the cached session.
pub trait SessionStore: Send + Sync {
    /// The stored session if present, readable and not expired.
    fn get_session(&self) -> Option<Session>;

    /// Replace the stored session.
    fn save(&self, session: &Session) -> FaResult<()>;

    /// Forget the stored session. Clearing an empty store is not an error.
    fn clear(&self) -> FaResult<()>;
}

/// Session persisted as JSON on disk.
pub struct FileSessionStore {
    path: PathBuf,
    policy: SessionPolicy,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>, policy: SessionPolicy) -> Self {
        Self {
            path: path.into(),
            policy,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The stored session without expiry checks.
    pub fn read_raw(&self) -> FaResult<Option<Session>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let contents = std::fs::read_to_string(&self.path)?;
        let session = serde_json::from_str(&contents)
            .map_err(|e| FaError::Session(format!("unreadable session file: {e}")))?;
        Ok(Some(session))
    }
}

impl SessionStore for FileSessionStore {
    fn get_session(&self) -> Option<Session> {
        match self.read_raw() {
            Ok(Some(session)) if self.policy.is_valid(&session, Utc::now()) => Some(session),
            Ok(Some(_)) => {
                warn!("cached session expired, sign in again");
                None
            }
            Ok(None) => None,
            Err(e) => {
                warn!("ignoring cached session: {e}");
                None
            }
        }
    }

    fn save(&self, session: &Session) -> FaResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(session)?;
        write_private(&self.path, contents.as_bytes())?;
        debug!("session saved to {}", self.path.display());
        Ok(())
    }

    fn clear(&self) -> FaResult<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Write `contents` to `path` readable by the owner only (unix).
fn write_private(path: &Path, contents: &[u8]) -> FaResult<()> {
    let mut options = std::fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};
        options.mode(0o600);
        let mut file = options.open(path)?;
        // mode() only applies on creation
        file.set_permissions(std::fs::Permissions::from_mode(0o600))?;
        file.write_all(contents)?;
    }
    #[cfg(not(unix))]
    {
        let mut file = options.open(path)?;
        file.write_all(contents)?;
    }
    Ok(())
}

/// Session held in memory only.
pub struct MemorySessionStore {
    session: RwLock<Option<Session>>,
    policy: SessionPolicy,
}

impl MemorySessionStore {
    pub fn new(policy: SessionPolicy) -> Self {
        Self {
            session: RwLock::new(None),
            policy,
        }
    }

    /// A store already holding `session`.
    pub fn with_session(session: Session, policy: SessionPolicy) -> Self {
        Self {
            session: RwLock::new(Some(session)),
            policy,
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn get_session(&self) -> Option<Session> {
        let guard = self.session.read().ok()?;
        guard
            .as_ref()
            .filter(|s| self.policy.is_valid(s, Utc::now()))
            .cloned()
    }

    fn save(&self, session: &Session) -> FaResult<()> {
        let mut guard = self
            .session
            .write()
            .map_err(|_| FaError::Session("session lock poisoned".into()))?;
        *guard = Some(session.clone());
        Ok(())
    }

    fn clear(&self) -> FaResult<()> {
        let mut guard = self
            .session
            .write()
            .map_err(|_| FaError::Session("session lock poisoned".into()))?;
        *guard = None;
        Ok(())
    }
}

/// Bearer credentials read from a session store on every request.
pub struct SessionCredentials {
    store: Arc<dyn SessionStore>,
}

impl SessionCredentials {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }
}

impl CredentialProvider for SessionCredentials {
    fn bearer_token(&self) -> Option<String> {
        self.store
            .get_session()
            .filter(Session::has_token)
            .map(|s| s.token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jwt_with_exp(exp: i64) -> String {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
        let payload = URL_SAFE_NO_PAD.encode(format!(r#"{{"sub":"admin01","exp":{exp}}}"#));
        format!("{header}.{payload}.signature")
    }

    #[test]
    fn test_jwt_expiry_parsed() {
        let exp = jwt_expiry(&jwt_with_exp(1_700_000_000)).unwrap();
        assert_eq!(exp.timestamp(), 1_700_000_000);
    }

    #[test]
    fn test_jwt_expiry_non_jwt() {
        assert!(jwt_expiry("opaque-token").is_none());
        assert!(jwt_expiry("a.b.c.d").is_none());
        assert!(jwt_expiry("a.!!!.c").is_none());
    }

    #[test]
    fn test_policy_rejects_expired_jwt() {
        let policy = SessionPolicy::unlimited();
        let past = Session::new(jwt_with_exp(Utc::now().timestamp() - 60), None);
        let future = Session::new(jwt_with_exp(Utc::now().timestamp() + 3600), None);
        assert!(!policy.is_valid(&past, Utc::now()));
        assert!(policy.is_valid(&future, Utc::now()));
    }

    #[test]
    fn test_policy_rejects_old_session() {
        let policy = SessionPolicy::from_config(&SessionConfig {
            path: String::new(),
            max_age_hours: 1,
        });
        let mut session = Session::new("opaque", None);
        session.stored_at = Utc::now() - Duration::hours(2);
        assert!(!policy.is_valid(&session, Utc::now()));
    }

    #[test]
    fn test_zero_max_age_disables_check() {
        let policy = SessionPolicy::from_config(&SessionConfig {
            path: String::new(),
            max_age_hours: 0,
        });
        assert_eq!(policy, SessionPolicy::unlimited());
    }

    #[test]
    fn test_memory_store_roundtrip() {
        let store = MemorySessionStore::new(SessionPolicy::unlimited());
        assert!(store.get_session().is_none());
        store.save(&Session::new("tok", None)).unwrap();
        assert_eq!(store.get_session().unwrap().token, "tok");
        store.clear().unwrap();
        assert!(store.get_session().is_none());
    }

    #[test]
    fn test_session_credentials_skip_blank_token() {
        let store = Arc::new(MemorySessionStore::with_session(
            Session::new("", None),
            SessionPolicy::unlimited(),
        ));
        assert!(SessionCredentials::new(store.clone()).bearer_token().is_none());
        store.save(&Session::new("tok", None)).unwrap();
        assert_eq!(
            SessionCredentials::new(store).bearer_token().as_deref(),
            Some("tok")
        );
    }
}
