//! Fundi Admin Models - typed records exchanged with the marketplace backend.
//!
//! This crate owns the domain types (builder skills, users, sessions, SMS
//! sends, log records), their display derivations, request validation,
//! and the static fixtures used for local development.

pub mod models;
pub mod validation;
pub mod fixtures;

// Re-export key types
pub use models::skill::{BuilderSkill, BuilderType, NewSkill, SkillUpdate};
pub use models::user::{AccountType, Role, UserProfile};
pub use models::session::{LoginResponse, Session};
pub use models::sms::{
    Audience, BulkSmsRequest, BulkSmsResponse, RecipientFailure, RecipientFilters,
    RecipientSelection, SingleSmsRequest, SmsHistoryEntry, SmsRecipientRecord, SmsStatus,
};
pub use models::logs::{
    AuditLogEntry, AuthLogEntry, LogCategory, LogFilterOptions, LogPage, OtpLogEntry,
    PaginatedLogResponse, SortOrder,
};
