//! Domain record definitions.

pub mod skill;
pub mod user;
pub mod sms;
pub mod logs;
pub mod session;
