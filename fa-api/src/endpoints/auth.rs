//! Sign-in and password endpoints.

use serde::Serialize;
use tracing::info;

use fa_core::error::{FaError, FaResult};
use fa_models::validation::{validate_email, validate_password};
use fa_models::LoginResponse;

use crate::client::ApiClient;
use crate::response::ApiEnvelope;

/// Body for `POST /auth/login`.
#[derive(Debug, Clone, Serialize)]
pub struct LoginParams {
    pub email: String,
    pub password: String,
}

/// Body for `POST /auth/change-password`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordParams {
    pub current_password: String,
    pub new_password: String,
}

impl ChangePasswordParams {
    /// Check the new password and its confirmation before sending.
    pub fn new(current: &str, new: &str, confirm: &str) -> FaResult<Self> {
        validate_password(new)?;
        if new != confirm {
            return Err(FaError::Validation("new password and confirmation differ".into()));
        }
        if current == new {
            return Err(FaError::Validation(
                "new password must differ from the current one".into(),
            ));
        }
        Ok(Self {
            current_password: current.to_string(),
            new_password: new.to_string(),
        })
    }
}

/// Body for `POST /admin/users/{id}/reset-password`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordParams {
    pub new_password: String,
}

impl ApiClient {
    /// Exchange credentials for a bearer token and the user record.
    pub async fn login(&self, params: &LoginParams) -> FaResult<LoginResponse> {
        validate_email(&params.email)?;
        let resp: LoginResponse = self.post_json(&["auth", "login"], params).await?;
        info!("signed in as {}", params.email);
        Ok(resp)
    }

    /// Change the signed-in user's password. Returns the backend message.
    pub async fn change_password(&self, params: &ChangePasswordParams) -> FaResult<String> {
        let resp: ApiEnvelope = self.post_json(&["auth", "change-password"], params).await?;
        Ok(resp.message_or("Password changed"))
    }

    /// Set a new password for another account. Returns the backend message.
    pub async fn reset_user_password(&self, user_id: &str, new_password: &str) -> FaResult<String> {
        validate_password(new_password)?;
        let params = ResetPasswordParams {
            new_password: new_password.to_string(),
        };
        let resp: ApiEnvelope = self
            .post_json(&["admin", "users", user_id, "reset-password"], &params)
            .await?;
        info!("reset password for user {user_id}");
        Ok(resp.message_or("Password reset"))
    }
}
