//! SMS endpoints: bulk send, single send and history.

use tracing::info;

use fa_core::error::FaResult;
use fa_models::{BulkSmsRequest, BulkSmsResponse, SingleSmsRequest, SmsHistoryEntry};

use crate::client::ApiClient;
use crate::response::MaybeWrapped;

impl ApiClient {
    /// Fan one message out to the selected recipients.
    ///
    /// The request should already be prepared (validated and normalized).
    pub async fn send_bulk_sms(&self, request: &BulkSmsRequest) -> FaResult<BulkSmsResponse> {
        let resp: BulkSmsResponse = self.post_json(&["sms", "bulk"], request).await?;
        info!(
            "bulk sms {}: {}/{} sent",
            resp.status.as_str(),
            resp.sent_count,
            resp.total_recipients
        );
        Ok(resp)
    }

    /// Send one message to one phone number.
    pub async fn send_single_sms(&self, request: &SingleSmsRequest) -> FaResult<BulkSmsResponse> {
        let resp: BulkSmsResponse = self.post_json(&["sms", "send"], request).await?;
        info!("sms to {}: {}", request.phone_number, resp.status.as_str());
        Ok(resp)
    }

    /// Page through prior bulk sends, newest first.
    pub async fn sms_history(&self, page: u32, limit: u32) -> FaResult<Vec<SmsHistoryEntry>> {
        self.get_json(
            &["sms", "history"],
            &[("page", page.max(1).to_string()), ("limit", limit.max(1).to_string())],
        )
        .await
    }

    /// One history entry including its recipient list.
    pub async fn sms_history_entry(&self, id: &str) -> FaResult<SmsHistoryEntry> {
        let resp: MaybeWrapped<SmsHistoryEntry> = self.get_json(&["sms", "history", id], &[]).await?;
        Ok(resp.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fa_models::SmsStatus;

    #[test]
    fn test_history_is_bare_array() {
        let json = serde_json::json!([{
            "_id": "h-1",
            "message": "Hello builders",
            "status": "sent",
            "totalRecipients": 10,
            "sentCount": 10
        }]);
        let history: Vec<SmsHistoryEntry> = serde_json::from_value(json).unwrap();
        assert_eq!(history[0].id, "h-1");
        assert_eq!(history[0].status, SmsStatus::Sent);
        assert!(history[0].recipients.is_none());
    }
}
