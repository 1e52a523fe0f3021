//! Password commands.

use clap::Subcommand;
use console::style;
use dialoguer::Password;

use fa_api::endpoints::auth::ChangePasswordParams;
use fa_core::config::ConfigHandle;
use fa_core::error::FaResult;
use crate::OutputFormat;

#[derive(Subcommand)]
pub enum PasswordAction {
    /// Change your own password (prompts for current and new).
    Change,
    /// Set a new password for another account.
    Reset {
        /// Id of the account to reset.
        user_id: String,
    },
}

pub async fn run(config: ConfigHandle, action: PasswordAction, format: OutputFormat) -> FaResult<()> {
    let message = match action {
        PasswordAction::Change => {
            // Any signed-in account may change its own password.
            let store = super::session_store(&config).await?;
            if store.get_session().is_none() {
                return Err(fa_core::FaError::Session(
                    "not signed in, run `fundi-admin login` first".into(),
                ));
            }

            let current = Password::new()
                .with_prompt("Current password")
                .interact()
                .map_err(super::prompt_error)?;
            let new = Password::new()
                .with_prompt("New password")
                .interact()
                .map_err(super::prompt_error)?;
            let confirm = Password::new()
                .with_prompt("Confirm new password")
                .interact()
                .map_err(super::prompt_error)?;

            let params = ChangePasswordParams::new(&current, &new, &confirm)?;
            let api = super::create_api_client(&config).await?;
            api.change_password(&params).await?
        }
        PasswordAction::Reset { user_id } => {
            super::require_admin(&config).await?;
            let new = Password::new()
                .with_prompt(format!("New password for {user_id}"))
                .with_confirmation("Confirm password", "Passwords do not match")
                .interact()
                .map_err(super::prompt_error)?;

            let api = super::create_api_client(&config).await?;
            api.reset_user_password(&user_id, &new).await?
        }
    };

    match format {
        OutputFormat::Json => super::print_json(&serde_json::json!({ "success": true, "message": message })),
        OutputFormat::Text => println!("  {} {message}", style("OK").green().bold()),
    }
    Ok(())
}
