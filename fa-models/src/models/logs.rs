//! Paginated log envelopes and typed log records.
//!
//! Log endpoints answer with
//! `{ success, data: { logs, page, limit, totalPages, totalResults } }`.
//! Each log family has its own record type.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use fa_core::constants::DEFAULT_LOG_PAGE_SIZE;

/// Which log family to query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogCategory {
    Auth,
    Otp,
    Audit,
}

impl LogCategory {
    /// Endpoint path for this family.
    pub fn path(&self) -> &'static str {
        match self {
            Self::Auth => "/logs/auth",
            Self::Otp => "/logs/otp",
            Self::Audit => "/logs/audit",
        }
    }
}

impl fmt::Display for LogCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Auth => "auth",
            Self::Otp => "otp",
            Self::Audit => "audit",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            other => Err(format!("unknown sort order '{other}'")),
        }
    }
}

/// Pagination and filter options for log queries.
#[derive(Debug, Clone, PartialEq)]
pub struct LogFilterOptions {
    pub page: u32,
    pub limit: u32,
    pub sort_by: Option<String>,
    pub order: SortOrder,
    pub status: Option<String>,
    /// Sub-type within the family (e.g. `LOGIN`, `PASSWORD_RESET`).
    pub log_type: Option<String>,
    pub search: Option<String>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl Default for LogFilterOptions {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_LOG_PAGE_SIZE,
            sort_by: None,
            order: SortOrder::Desc,
            status: None,
            log_type: None,
            search: None,
            from: None,
            to: None,
        }
    }
}

impl LogFilterOptions {
    /// Query parameters in a stable order. Blank filters are omitted and
    /// `page` is clamped to at least 1.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("page", self.page.max(1).to_string()),
            ("limit", self.limit.max(1).to_string()),
        ];
        if let Some(sort_by) = non_blank(&self.sort_by) {
            pairs.push(("sortBy", sort_by.to_string()));
            pairs.push(("order", self.order.as_str().to_string()));
        }
        if let Some(status) = non_blank(&self.status) {
            pairs.push(("status", status.to_string()));
        }
        if let Some(log_type) = non_blank(&self.log_type) {
            pairs.push(("type", log_type.to_string()));
        }
        if let Some(search) = non_blank(&self.search) {
            pairs.push(("search", search.to_string()));
        }
        if let Some(from) = self.from {
            pairs.push(("startDate", from.to_string()));
        }
        if let Some(to) = self.to {
            pairs.push(("endDate", to.to_string()));
        }
        pairs
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// One page of log records.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogPage<T> {
    #[serde(default = "Vec::new")]
    pub logs: Vec<T>,
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub limit: u32,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_results: u64,
}

impl<T> LogPage<T> {
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

/// Log envelope: `{ success, data: LogPage }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: DeserializeOwned"))]
pub struct PaginatedLogResponse<T> {
    #[serde(default)]
    pub success: bool,
    pub data: LogPage<T>,
}

/// Sign-in / sign-out event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthLogEntry {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    pub action: String,
    pub status: String,
    #[serde(default)]
    pub ip_address: Option<String>,
    #[serde(default)]
    pub user_agent: Option<String>,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// One-time-password issuance/verification event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OtpLogEntry {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    pub purpose: String,
    pub status: String,
    #[serde(default)]
    pub attempts: u32,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Administrative action on a record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditLogEntry {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub actor_id: Option<String>,
    #[serde(default)]
    pub actor_email: Option<String>,
    pub action: String,
    #[serde(default)]
    pub entity: Option<String>,
    #[serde(default)]
    pub entity_id: Option<String>,
    #[serde(default)]
    pub details: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_query_pairs() {
        let pairs = LogFilterOptions::default().query_pairs();
        assert_eq!(
            pairs,
            vec![("page", "1".to_string()), ("limit", "20".to_string())]
        );
    }

    #[test]
    fn test_query_pairs_skip_blank_and_clamp_page() {
        let opts = LogFilterOptions {
            page: 0,
            limit: 50,
            sort_by: Some("createdAt".into()),
            order: SortOrder::Asc,
            status: Some("  ".into()),
            log_type: Some("LOGIN".into()),
            search: Some("jane@".into()),
            from: NaiveDate::from_ymd_opt(2024, 1, 1),
            to: None,
        };
        let pairs = opts.query_pairs();
        assert_eq!(pairs[0], ("page", "1".to_string()));
        assert!(pairs.contains(&("order", "asc".to_string())));
        assert!(pairs.contains(&("type", "LOGIN".to_string())));
        assert!(pairs.contains(&("startDate", "2024-01-01".to_string())));
        assert!(!pairs.iter().any(|(k, _)| *k == "status"));
    }

    #[test]
    fn test_envelope_deserialize() {
        let json = serde_json::json!({
            "success": true,
            "data": {
                "logs": [{
                    "_id": "l-1", "email": "jane@fundi.co.ke",
                    "action": "LOGIN", "status": "FAILED", "reason": "Bad password"
                }],
                "page": 1, "limit": 20, "totalPages": 3, "totalResults": 41
            }
        });
        let resp: PaginatedLogResponse<AuthLogEntry> = serde_json::from_value(json).unwrap();
        assert!(resp.success);
        assert_eq!(resp.data.logs.len(), 1);
        assert_eq!(resp.data.total_results, 41);
        assert!(resp.data.has_next());
    }

    #[test]
    fn test_category_paths() {
        assert_eq!(LogCategory::Otp.path(), "/logs/otp");
        assert_eq!(LogCategory::Audit.to_string(), "audit");
    }
}
