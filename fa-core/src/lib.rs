//! Fundi Admin Core - Foundation types, error handling, configuration, and logging.
//!
//! This crate provides the shared foundation used by all other Fundi Admin crates:
//! - Application configuration (API base URL, session policy, guard settings)
//! - Global error type covering transport, backend, session and validation failures
//! - Structured logging with tracing
//! - Platform directory resolution
//! - Common constants

pub mod config;
pub mod error;
pub mod logging;
pub mod platform;
pub mod constants;

// Re-export commonly used items at the crate root
pub use config::AppConfig;
pub use error::{FaError, FaResult};
pub use logging::init_logging;
pub use platform::Platform;
