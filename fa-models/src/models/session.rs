//! Cached sign-in session.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::user::UserProfile;

/// The locally cached result of signing in.
///
/// Written once at login and read by the route guard; nothing else
/// mutates it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Bearer token sent on every request.
    #[serde(default)]
    pub token: String,
    /// Cached user record.
    #[serde(default)]
    pub user: Option<UserProfile>,
    /// When the session was stored locally.
    pub stored_at: DateTime<Utc>,
}

impl Session {
    pub fn new(token: impl Into<String>, user: Option<UserProfile>) -> Self {
        Self {
            token: token.into(),
            user,
            stored_at: Utc::now(),
        }
    }

    pub fn has_token(&self) -> bool {
        !self.token.trim().is_empty()
    }

    /// Whether the session was stored more than `max_age` before `now`.
    pub fn is_older_than(&self, max_age: Duration, now: DateTime<Utc>) -> bool {
        now.signed_duration_since(self.stored_at) > max_age
    }
}

/// Body returned by the login endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    #[serde(default)]
    pub user: Option<UserProfile>,
}

impl From<LoginResponse> for Session {
    fn from(resp: LoginResponse) -> Self {
        Session::new(resp.token, resp.user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_token() {
        assert!(!Session::new("   ", None).has_token());
        assert!(Session::new("abc", None).has_token());
    }

    #[test]
    fn test_age_check() {
        let mut session = Session::new("abc", None);
        session.stored_at = Utc::now() - Duration::hours(30);
        assert!(session.is_older_than(Duration::hours(24), Utc::now()));
        assert!(!session.is_older_than(Duration::hours(48), Utc::now()));
    }

    #[test]
    fn test_login_response_into_session() {
        let resp: LoginResponse = serde_json::from_value(serde_json::json!({
            "token": "jwt",
            "user": { "id": "a1", "userType": "ADMIN", "adminApproved": true }
        }))
        .unwrap();
        let session: Session = resp.into();
        assert_eq!(session.token, "jwt");
        assert!(session.user.unwrap().admin_approved);
    }
}
