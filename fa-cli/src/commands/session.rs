//! Sign-in commands.

use console::style;
use dialoguer::{Input, Password};
use tracing::info;

use fa_api::endpoints::auth::LoginParams;
use fa_api::{ApiClient, NoCredentials};
use fa_core::config::ConfigHandle;
use fa_core::error::FaResult;
use fa_models::Session;
use fa_services::guard::{GuardDecision, RouteGuard};
use crate::OutputFormat;

/// Sign in, cache the session and report where the guard sends it.
pub async fn login(config: ConfigHandle, email: Option<String>, format: OutputFormat) -> FaResult<()> {
    let email = match email {
        Some(e) => e,
        None => Input::new()
            .with_prompt("Email")
            .interact_text()
            .map_err(super::prompt_error)?,
    };
    let password: String = Password::new()
        .with_prompt("Password")
        .interact()
        .map_err(super::prompt_error)?;

    let api_config = super::api_config(&*config.read().await)?;
    let api = ApiClient::new(&api_config, std::sync::Arc::new(NoCredentials))?;
    let resp = api.login(&LoginParams { email, password }).await?;

    let session = Session::from(resp);
    let store = super::session_store(&config).await?;
    store.save(&session)?;
    info!("session cached");

    let guard = RouteGuard::from_config(&config.read().await.guard)?;
    print_session(&session, &guard.evaluate(Some(&session)), format);
    Ok(())
}

/// Remove the cached session.
pub async fn logout(config: ConfigHandle) -> FaResult<()> {
    let store = super::session_store(&config).await?;
    store.clear()?;
    info!("session cleared");
    println!("  {} Signed out.", style("OK").green().bold());
    Ok(())
}

/// Show the cached session and the guard's verdict on it.
pub async fn whoami(config: ConfigHandle, format: OutputFormat) -> FaResult<()> {
    let store = super::session_store(&config).await?;
    let guard = RouteGuard::from_config(&config.read().await.guard)?;

    match store.get_session() {
        Some(session) => {
            let decision = guard.evaluate(Some(&session));
            print_session(&session, &decision, format);
        }
        None => match format {
            OutputFormat::Json => super::print_json(&serde_json::json!({ "signedIn": false })),
            OutputFormat::Text => println!("  Not signed in. Run `fundi-admin login`."),
        },
    }
    Ok(())
}

fn print_session(session: &Session, decision: &GuardDecision, format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            super::print_json(&serde_json::json!({
                "signedIn": true,
                "user": session.user,
                "storedAt": session.stored_at,
                "access": match decision {
                    GuardDecision::Allow(_) => serde_json::json!({ "allowed": true }),
                    GuardDecision::Redirect { to, reason } => serde_json::json!({
                        "allowed": false,
                        "redirectTo": to,
                        "reason": reason.to_string(),
                    }),
                },
            }));
        }
        OutputFormat::Text => {
            match &session.user {
                Some(user) => {
                    println!("  Signed in as {} ({})", style(user.display_name()).bold(), user.user_type);
                    if let Some(email) = &user.email {
                        println!("  Email:   {email}");
                    }
                    println!("  Status:  {}", crate::views::approval_badge(user.admin_approved));
                }
                None => println!("  Signed in (no cached user record)"),
            }
            match decision {
                GuardDecision::Allow(_) => {
                    println!("  Access:  {}", style("admin area").green());
                }
                GuardDecision::Redirect { to, reason } => {
                    println!("  Access:  {} {reason} (redirect to {to})", style("denied").red());
                }
            }
        }
    }
}
