//! Customer and builder lookups.

use clap::Subcommand;
use comfy_table::{Table, presets::UTF8_FULL, modifiers::UTF8_ROUND_CORNERS, ContentArrangement};

use fa_core::config::ConfigHandle;
use fa_core::error::{FaError, FaResult};
use fa_models::fixtures::mock_users;
use fa_models::UserProfile;
use crate::views;
use crate::OutputFormat;

#[derive(Subcommand)]
pub enum UserAction {
    /// Show one account.
    Show {
        /// Account id.
        id: String,
    },
}

/// Which directory a lookup goes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserKind {
    Customer,
    Builder,
}

impl UserKind {
    fn label(&self) -> &'static str {
        match self {
            Self::Customer => "customer",
            Self::Builder => "builder",
        }
    }

    /// Fixture account with `id` in this directory.
    fn mock_lookup(&self, id: &str) -> Option<UserProfile> {
        let users = mock_users();
        let directory = match self {
            Self::Customer => users.customers(),
            Self::Builder => users.builders(),
        };
        directory.into_iter().find(|u| u.id == id).cloned()
    }
}

pub async fn run(
    config: ConfigHandle,
    kind: UserKind,
    action: UserAction,
    format: OutputFormat,
    mock: bool,
) -> FaResult<()> {
    super::require_admin_or_mock(&config, mock).await?;

    match action {
        UserAction::Show { id } => {
            let user = if mock {
                kind.mock_lookup(&id)
            } else {
                let api = super::create_api_client(&config).await?;
                let result = match kind {
                    UserKind::Customer => api.get_customer(&id).await,
                    UserKind::Builder => api.get_builder(&id).await,
                };
                match result {
                    Ok(user) => Some(user),
                    Err(FaError::NotFound(_)) => None,
                    Err(e) => return Err(e),
                }
            };

            match format {
                OutputFormat::Json => super::print_json(&user),
                OutputFormat::Text => println!("{}", views::render_user_detail(kind.label(), user.as_ref())),
            }
        }
    }

    Ok(())
}

/// Print the built-in mock accounts.
pub fn list_fixtures(format: OutputFormat) -> FaResult<()> {
    let users = mock_users();
    let all = users.all();

    match format {
        OutputFormat::Json => super::print_json(&all),
        OutputFormat::Text => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .apply_modifier(UTF8_ROUND_CORNERS)
                .set_content_arrangement(ContentArrangement::Dynamic);

            table.set_header(vec!["ID", "Name", "Type", "Location", "Status"]);
            for u in &all {
                table.add_row(vec![
                    u.id.clone(),
                    u.display_name(),
                    u.user_type.to_string(),
                    u.location(),
                    views::approval_badge(u.admin_approved),
                ]);
            }
            println!("{table}");
            println!("\n{} mock account(s); use --mock to read them as customers/builders", all.len());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_lookup_stays_in_directory() {
        assert!(UserKind::Builder.mock_lookup("fundi01").is_some());
        assert!(UserKind::Customer.mock_lookup("fundi01").is_none());
        assert!(UserKind::Customer.mock_lookup("organization01").is_some());
        assert!(UserKind::Customer.mock_lookup("admin01").is_none());
        assert!(UserKind::Builder.mock_lookup("admin01").is_none());
    }
}
