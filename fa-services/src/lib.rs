//! Fundi Admin Services - client-side state and access control.
//!
//! This crate sits between the API client and the CLI:
//! - Skill list state (fetch, add, approve/edit, delete)
//! - Session storage with expiry checks and bearer credentials
//! - Route guard for the protected admin area
//! - Event bus (typed notifications of local state changes)

pub mod event_bus;
pub mod skills;
pub mod session;
pub mod guard;

// Re-export key types
pub use event_bus::{AppEvent, EventBus};
pub use skills::{InMemorySkillsApi, LoadState, SkillListState, SkillStore, SkillsApi};
pub use session::{
    jwt_expiry, FileSessionStore, MemorySessionStore, SessionCredentials, SessionPolicy,
    SessionStore,
};
pub use guard::{DenyReason, GuardDecision, RouteGuard};
