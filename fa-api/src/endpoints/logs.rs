//! Paginated log endpoints (auth, OTP, audit).

use serde::de::DeserializeOwned;

use fa_core::error::FaResult;
use fa_models::{
    AuditLogEntry, AuthLogEntry, LogCategory, LogFilterOptions, OtpLogEntry, PaginatedLogResponse,
};

use crate::client::ApiClient;

impl ApiClient {
    /// Fetch one page of a log family.
    pub async fn fetch_logs<T: DeserializeOwned>(
        &self,
        category: LogCategory,
        options: &LogFilterOptions,
    ) -> FaResult<PaginatedLogResponse<T>> {
        let segments: Vec<&str> = category.path().trim_start_matches('/').split('/').collect();
        self.get_json(&segments, &options.query_pairs()).await
    }

    /// Sign-in / sign-out events.
    pub async fn auth_logs(&self, options: &LogFilterOptions) -> FaResult<PaginatedLogResponse<AuthLogEntry>> {
        self.fetch_logs(LogCategory::Auth, options).await
    }

    /// OTP issuance and verification events.
    pub async fn otp_logs(&self, options: &LogFilterOptions) -> FaResult<PaginatedLogResponse<OtpLogEntry>> {
        self.fetch_logs(LogCategory::Otp, options).await
    }

    /// Administrative audit trail.
    pub async fn audit_logs(&self, options: &LogFilterOptions) -> FaResult<PaginatedLogResponse<AuditLogEntry>> {
        self.fetch_logs(LogCategory::Audit, options).await
    }
}
