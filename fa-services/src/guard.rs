//! Route guard for the protected admin area.
//!
//! Decisions are made from the cached session only; the guard never calls
//! the backend. Order of checks: token, cached user, role, approval.

use std::fmt;

use tracing::debug;

use fa_core::config::GuardConfig;
use fa_core::error::{FaError, FaResult};
use fa_models::{Role, Session};

use crate::session::SessionStore;

/// Why the guard turned a session away.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DenyReason {
    NoToken,
    NoUser,
    RoleNotAllowed(Role),
    NotApproved,
}

impl fmt::Display for DenyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoToken => write!(f, "not signed in"),
            Self::NoUser => write!(f, "no cached user for this session"),
            Self::RoleNotAllowed(role) => write!(f, "role {role} is not allowed here"),
            Self::NotApproved => write!(f, "account is pending admin approval"),
        }
    }
}

/// Outcome of evaluating a session.
#[derive(Debug, Clone, PartialEq)]
pub enum GuardDecision {
    Allow(Session),
    Redirect { to: String, reason: DenyReason },
}

impl GuardDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allow(_))
    }

    /// Redirect target, if any.
    pub fn redirect_target(&self) -> Option<&str> {
        match self {
            Self::Allow(_) => None,
            Self::Redirect { to, .. } => Some(to),
        }
    }
}

/// Gate in front of the protected area.
#[derive(Debug, Clone)]
pub struct RouteGuard {
    /// Empty means any signed-in role passes the role check.
    pub allowed_roles: Vec<Role>,
    pub require_admin_approved: bool,
    pub fallback_path: String,
    pub approval_fallback_path: String,
}

impl RouteGuard {
    /// Build a guard from configuration.
    ///
    /// Any unrecognised role name is a configuration error; only an
    /// explicitly empty list admits every role.
    pub fn from_config(config: &GuardConfig) -> FaResult<Self> {
        let allowed_roles = config
            .allowed_roles
            .iter()
            .map(|name| {
                name.parse::<Role>()
                    .map_err(|e| FaError::Config(format!("guard.allowed_roles: {e}")))
            })
            .collect::<FaResult<Vec<Role>>>()?;

        Ok(Self {
            allowed_roles,
            require_admin_approved: config.require_admin_approved,
            fallback_path: config.fallback_path.clone(),
            approval_fallback_path: config.approval_fallback_path.clone(),
        })
    }

    fn redirect(&self, to: &str, reason: DenyReason) -> GuardDecision {
        debug!("guard: redirecting to {to} ({reason})");
        GuardDecision::Redirect {
            to: to.to_string(),
            reason,
        }
    }

    /// Decide whether `session` may enter.
    pub fn evaluate(&self, session: Option<&Session>) -> GuardDecision {
        let Some(session) = session.filter(|s| s.has_token()) else {
            return self.redirect(&self.fallback_path, DenyReason::NoToken);
        };
        let Some(user) = session.user.as_ref() else {
            return self.redirect(&self.fallback_path, DenyReason::NoUser);
        };
        if !self.allowed_roles.is_empty() && !self.allowed_roles.contains(&user.user_type) {
            return self.redirect(
                &self.fallback_path,
                DenyReason::RoleNotAllowed(user.user_type),
            );
        }
        if self.require_admin_approved && !user.admin_approved {
            return self.redirect(&self.approval_fallback_path, DenyReason::NotApproved);
        }
        GuardDecision::Allow(session.clone())
    }

    /// Evaluate whatever the store currently holds.
    pub fn check(&self, store: &dyn SessionStore) -> GuardDecision {
        self.evaluate(store.get_session().as_ref())
    }

    /// Like [`check`](Self::check), but a redirect becomes `AccessDenied`.
    pub fn enforce(&self, store: &dyn SessionStore) -> FaResult<Session> {
        match self.check(store) {
            GuardDecision::Allow(session) => Ok(session),
            GuardDecision::Redirect { to, reason } => Err(FaError::AccessDenied {
                redirect_to: to,
                reason: reason.to_string(),
            }),
        }
    }
}

impl Default for RouteGuard {
    fn default() -> Self {
        let config = GuardConfig::default();
        Self {
            allowed_roles: vec![Role::Admin, Role::SuperAdmin],
            require_admin_approved: config.require_admin_approved,
            fallback_path: config.fallback_path,
            approval_fallback_path: config.approval_fallback_path,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fa_models::fixtures::mock_users;

    #[test]
    fn test_missing_session_goes_to_login() {
        let decision = RouteGuard::default().evaluate(None);
        assert_eq!(decision.redirect_target(), Some("/login"));
    }

    #[test]
    fn test_default_matches_default_config() {
        let built = RouteGuard::from_config(&GuardConfig::default()).unwrap();
        let default = RouteGuard::default();
        assert_eq!(built.allowed_roles, default.allowed_roles);
        assert_eq!(built.fallback_path, default.fallback_path);
        assert_eq!(built.approval_fallback_path, default.approval_fallback_path);
        assert_eq!(built.require_admin_approved, default.require_admin_approved);
    }

    #[test]
    fn test_admin_allowed() {
        let session = Session::new("tok", Some(mock_users().admin01));
        assert!(RouteGuard::default().evaluate(Some(&session)).is_allowed());
    }

    #[test]
    fn test_deny_reason_messages() {
        assert_eq!(DenyReason::NoToken.to_string(), "not signed in");
        assert_eq!(
            DenyReason::RoleNotAllowed(Role::Fundi).to_string(),
            "role FUNDI is not allowed here"
        );
    }
}
