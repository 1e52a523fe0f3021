//! API endpoint modules organized by category.
//!
//! Each module adds typed methods on [`crate::ApiClient`] for a group of
//! related backend endpoints.

pub mod skills;
pub mod sms;
pub mod logs;
pub mod auth;
pub mod users;
