//! Application-wide constants.

/// Application name.
pub const APP_NAME: &str = "Fundi Admin";

/// Directory name used under the platform data/config directories.
pub const APP_DIR_NAME: &str = "FundiAdmin";

/// Application version.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default backend base URL used when nothing is configured.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000/api";

/// Default API request timeout in milliseconds.
pub const DEFAULT_API_TIMEOUT_MS: u64 = 30_000;

/// Fallback error text when the backend gives no `message`.
pub const FALLBACK_ERROR_MESSAGE: &str = "Something went wrong. Please try again.";

/// Default page size for paginated log queries.
pub const DEFAULT_LOG_PAGE_SIZE: u32 = 20;

/// Default page size for SMS history.
pub const DEFAULT_SMS_HISTORY_PAGE_SIZE: u32 = 10;

/// Maximum characters in a single outbound SMS body (six concatenated segments).
pub const DEFAULT_MAX_SMS_LENGTH: usize = 918;

/// Minimum accepted password length for change/reset.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Placeholder shown when a location has no parts.
pub const NOT_AVAILABLE: &str = "N/A";

/// Route paths used by the guard when redirecting.
pub mod routes {
    /// Where unauthenticated or unauthorized navigation lands.
    pub const LOGIN: &str = "/login";
    /// Where signed-in but unapproved accounts land.
    pub const PENDING_APPROVAL: &str = "/pending-approval";
}

/// Role names with dashboard access by default.
pub const DEFAULT_ADMIN_ROLES: &[&str] = &["ADMIN", "SUPER_ADMIN"];
