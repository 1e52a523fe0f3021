//! Response envelope types.
//!
//! The backend answers in more than one shape:
//! - bare JSON arrays/objects (skills, SMS history),
//! - `{ success, data: { logs, … } }` for logs (see `fa_models::PaginatedLogResponse`),
//! - `{ success, message, data? }` for message-only replies and lookups.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use fa_core::constants::FALLBACK_ERROR_MESSAGE;

/// `{ success, message, data? }` envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiEnvelope<T = serde_json::Value> {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default = "Option::default")]
    pub data: Option<T>,
}

impl<T> ApiEnvelope<T> {
    /// The backend message, or a generic confirmation.
    pub fn message_or(&self, fallback: &str) -> String {
        self.message
            .clone()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| fallback.to_string())
    }
}

/// Envelope whose `data` is mandatory. Used to tell wrapped from bare
/// objects when both shapes are possible.
#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "T: DeserializeOwned"))]
pub struct DataEnvelope<T> {
    #[serde(default)]
    pub success: bool,
    pub data: T,
}

/// A payload that may or may not be wrapped in `{ success, data }`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged, bound(deserialize = "T: DeserializeOwned"))]
pub enum MaybeWrapped<T> {
    Wrapped(DataEnvelope<T>),
    Bare(T),
}

impl<T> MaybeWrapped<T> {
    pub fn into_inner(self) -> T {
        match self {
            MaybeWrapped::Wrapped(env) => env.data,
            MaybeWrapped::Bare(inner) => inner,
        }
    }
}

/// Pull a human-readable error out of a failed response body.
///
/// Prefers `message`, then a string `error`; anything else falls back to a
/// generic message.
pub fn error_message_from_body(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.get("message")
                .and_then(|m| m.as_str())
                .or_else(|| v.get("error").and_then(|e| e.as_str()))
                .map(str::to_string)
        })
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| FALLBACK_ERROR_MESSAGE.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use fa_models::UserProfile;

    #[test]
    fn test_error_message_prefers_message() {
        assert_eq!(
            error_message_from_body(r#"{"success":false,"message":"Skill not found"}"#),
            "Skill not found"
        );
        assert_eq!(
            error_message_from_body(r#"{"error":"Token expired"}"#),
            "Token expired"
        );
    }

    #[test]
    fn test_error_message_fallback() {
        assert_eq!(error_message_from_body("<html>502</html>"), FALLBACK_ERROR_MESSAGE);
        assert_eq!(error_message_from_body(r#"{"message":""}"#), FALLBACK_ERROR_MESSAGE);
        assert_eq!(error_message_from_body(""), FALLBACK_ERROR_MESSAGE);
    }

    #[test]
    fn test_maybe_wrapped_both_shapes() {
        let wrapped: MaybeWrapped<UserProfile> = serde_json::from_value(serde_json::json!({
            "success": true,
            "data": { "id": "c-1", "userType": "CUSTOMER" }
        }))
        .unwrap();
        assert_eq!(wrapped.into_inner().id, "c-1");

        let bare: MaybeWrapped<UserProfile> = serde_json::from_value(serde_json::json!({
            "id": "c-2", "userType": "CUSTOMER"
        }))
        .unwrap();
        assert_eq!(bare.into_inner().id, "c-2");
    }

    #[test]
    fn test_envelope_message_or() {
        let env: ApiEnvelope = serde_json::from_str(r#"{"success":true}"#).unwrap();
        assert_eq!(env.message_or("done"), "done");
        assert!(env.data.is_none());
    }
}
