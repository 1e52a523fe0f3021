//! Bulk and single SMS request/response models.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use fa_core::error::{FaError, FaResult};

use super::skill::BuilderType;
use super::user::{AccountType, Role};
use crate::validation::normalize_phone;

/// Which population a filter-based send targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Audience {
    Builders,
    Customers,
    All,
}

/// Attribute predicates selecting recipients on the backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipientFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audience: Option<Audience>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub builder_types: Vec<BuilderType>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub user_types: Vec<Role>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_type: Option<AccountType>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub counties: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_approved: Option<bool>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skills: Vec<String>,
}

impl RecipientFilters {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Recipient selection: explicit user IDs, ad-hoc phone numbers, and/or
/// attribute filters. The backend takes the union.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipientSelection {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub recipient_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub phone_numbers: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filters: Option<RecipientFilters>,
}

impl RecipientSelection {
    pub fn is_empty(&self) -> bool {
        self.recipient_ids.is_empty()
            && self.phone_numbers.is_empty()
            && self.filters.as_ref().map_or(true, RecipientFilters::is_empty)
    }
}

/// Body for `POST /sms/bulk`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkSmsRequest {
    pub message: String,
    #[serde(flatten)]
    pub recipients: RecipientSelection,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender_id: Option<String>,
}

impl BulkSmsRequest {
    /// Validate and normalize in place: trims the message, enforces the
    /// length limit, requires a recipient selector and normalizes phones.
    pub fn prepare(mut self, max_len: usize) -> FaResult<Self> {
        self.message = validate_message(&self.message, max_len)?;
        if self.recipients.is_empty() {
            return Err(FaError::Validation(
                "select at least one recipient, phone number or filter".into(),
            ));
        }
        self.recipients.phone_numbers = self
            .recipients
            .phone_numbers
            .iter()
            .map(|p| normalize_phone(p))
            .collect::<FaResult<Vec<_>>>()?;
        let mut seen = HashSet::new();
        self.recipients.phone_numbers.retain(|p| seen.insert(p.clone()));
        Ok(self)
    }
}

/// Body for `POST /sms/send`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SingleSmsRequest {
    pub phone_number: String,
    pub message: String,
}

impl SingleSmsRequest {
    pub fn prepare(phone_number: &str, message: &str, max_len: usize) -> FaResult<Self> {
        Ok(Self {
            phone_number: normalize_phone(phone_number)?,
            message: validate_message(message, max_len)?,
        })
    }
}

fn validate_message(message: &str, max_len: usize) -> FaResult<String> {
    let trimmed = message.trim();
    if trimmed.is_empty() {
        return Err(FaError::Validation("message must not be empty".into()));
    }
    let len = trimmed.chars().count();
    if len > max_len {
        return Err(FaError::Validation(format!(
            "message is {len} characters, limit is {max_len}"
        )));
    }
    Ok(trimmed.to_string())
}

/// Aggregate delivery status of a send.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SmsStatus {
    Sent,
    Pending,
    Failed,
    Partial,
}

impl SmsStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sent => "sent",
            Self::Pending => "pending",
            Self::Failed => "failed",
            Self::Partial => "partial",
        }
    }
}

/// Why one recipient did not receive the message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipientFailure {
    #[serde(default)]
    pub recipient_id: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    pub reason: String,
}

/// Result of a bulk or single send, displayed as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkSmsResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    pub status: SmsStatus,
    #[serde(default)]
    pub total_recipients: u32,
    #[serde(default)]
    pub sent_count: u32,
    #[serde(default)]
    pub failed_count: u32,
    #[serde(default)]
    pub failed_recipients: Option<Vec<RecipientFailure>>,
}

impl BulkSmsResponse {
    pub fn failures(&self) -> &[RecipientFailure] {
        self.failed_recipients.as_deref().unwrap_or_default()
    }
}

/// One recipient row in a history detail view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SmsRecipientRecord {
    #[serde(default)]
    pub name: Option<String>,
    pub phone_number: String,
    pub status: SmsStatus,
    #[serde(default)]
    pub reason: Option<String>,
}

/// A prior bulk send as recorded by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SmsHistoryEntry {
    #[serde(alias = "_id")]
    pub id: String,
    pub message: String,
    pub status: SmsStatus,
    #[serde(default)]
    pub sent_by: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub total_recipients: u32,
    #[serde(default)]
    pub sent_count: u32,
    #[serde(default)]
    pub failed_count: u32,
    #[serde(default)]
    pub recipients: Option<Vec<SmsRecipientRecord>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bulk(message: &str, recipients: RecipientSelection) -> BulkSmsRequest {
        BulkSmsRequest {
            message: message.into(),
            recipients,
            sender_id: None,
        }
    }

    #[test]
    fn test_prepare_requires_recipients() {
        let err = bulk("Hello", RecipientSelection::default()).prepare(160).unwrap_err();
        assert!(matches!(err, FaError::Validation(_)));

        let empty_filters = RecipientSelection {
            filters: Some(RecipientFilters::default()),
            ..Default::default()
        };
        assert!(bulk("Hello", empty_filters).prepare(160).is_err());
    }

    #[test]
    fn test_prepare_normalizes_phones_and_trims() {
        let req = bulk(
            "  Site visit tomorrow  ",
            RecipientSelection {
                phone_numbers: vec!["0712345678".into(), "+254712345678".into()],
                ..Default::default()
            },
        )
        .prepare(160)
        .unwrap();
        assert_eq!(req.message, "Site visit tomorrow");
        assert_eq!(req.recipients.phone_numbers, vec!["+254712345678"]);
    }

    #[test]
    fn test_prepare_rejects_long_message() {
        let long = "x".repeat(161);
        let recipients = RecipientSelection {
            recipient_ids: vec!["u-1".into()],
            ..Default::default()
        };
        assert!(bulk(&long, recipients).prepare(160).is_err());
    }

    #[test]
    fn test_bulk_request_wire_shape() {
        let req = bulk(
            "Hi",
            RecipientSelection {
                filters: Some(RecipientFilters {
                    audience: Some(Audience::Builders),
                    builder_types: vec![BuilderType::Fundi],
                    counties: vec!["Nairobi".into()],
                    ..Default::default()
                }),
                ..Default::default()
            },
        );
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["message"], "Hi");
        assert_eq!(json["filters"]["audience"], "BUILDERS");
        assert_eq!(json["filters"]["builderTypes"][0], "FUNDI");
        assert!(json.get("recipientIds").is_none());
        assert!(json.get("senderId").is_none());
    }

    #[test]
    fn test_partial_response_keeps_failures() {
        let resp: BulkSmsResponse = serde_json::from_value(serde_json::json!({
            "success": true,
            "status": "partial",
            "totalRecipients": 3,
            "sentCount": 2,
            "failedCount": 1,
            "failedRecipients": [{ "phoneNumber": "+254700000000", "reason": "Absent subscriber" }]
        }))
        .unwrap();
        assert_eq!(resp.status, SmsStatus::Partial);
        assert_eq!(resp.failures().len(), 1);
        assert_eq!(resp.failures()[0].reason, "Absent subscriber");
    }

    #[test]
    fn test_single_sms_prepare() {
        let req = SingleSmsRequest::prepare("0722000111", "Your job was approved", 160).unwrap();
        assert_eq!(req.phone_number, "+254722000111");
        assert!(SingleSmsRequest::prepare("0722000111", "   ", 160).is_err());
    }
}
