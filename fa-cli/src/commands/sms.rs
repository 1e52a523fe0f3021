//! SMS commands.

use clap::Subcommand;
use comfy_table::{Table, presets::UTF8_FULL, modifiers::UTF8_ROUND_CORNERS, ContentArrangement};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use fa_core::config::ConfigHandle;
use fa_core::constants::DEFAULT_SMS_HISTORY_PAGE_SIZE;
use fa_core::error::{FaError, FaResult};
use fa_models::fixtures::mock_sms_history;
use fa_models::{
    AccountType, Audience, BuilderType, BulkSmsRequest, BulkSmsResponse, RecipientFilters,
    RecipientSelection, SingleSmsRequest, SmsHistoryEntry, SmsStatus,
};
use crate::OutputFormat;

#[derive(Subcommand)]
pub enum SmsAction {
    /// Send one message to many recipients.
    Bulk {
        /// Message text.
        #[arg(short, long)]
        message: String,
        /// Recipient user ids.
        #[arg(long = "id", value_delimiter = ',')]
        recipient_ids: Vec<String>,
        /// Raw phone numbers.
        #[arg(long = "phone", value_delimiter = ',')]
        phone_numbers: Vec<String>,
        /// Audience filter (builders, customers, all).
        #[arg(long)]
        audience: Option<AudienceArg>,
        /// Builder type filter.
        #[arg(long = "builder-type", value_delimiter = ',')]
        builder_types: Vec<BuilderType>,
        /// County filter.
        #[arg(long = "county", value_delimiter = ',')]
        counties: Vec<String>,
        /// Only organizations (or only individuals with --individuals).
        #[arg(long, conflicts_with = "individuals")]
        organizations: bool,
        #[arg(long)]
        individuals: bool,
        /// Only approved accounts.
        #[arg(long, conflicts_with = "pending")]
        approved: bool,
        /// Only accounts pending approval.
        #[arg(long)]
        pending: bool,
        /// Sender id override.
        #[arg(long)]
        sender_id: Option<String>,
    },
    /// Send one message to one phone number.
    Send {
        /// Phone number (+2547..., 07... or 01...).
        phone: String,
        #[arg(short, long)]
        message: String,
    },
    /// List earlier sends.
    History {
        #[arg(short, long, default_value = "1")]
        page: u32,
        #[arg(short = 'n', long, default_value_t = DEFAULT_SMS_HISTORY_PAGE_SIZE)]
        limit: u32,
    },
    /// Show one send with its recipients.
    Show {
        /// History entry id.
        id: String,
    },
}

/// Audience values accepted on the command line.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum AudienceArg {
    Builders,
    Customers,
    All,
}

impl From<AudienceArg> for Audience {
    fn from(a: AudienceArg) -> Self {
        match a {
            AudienceArg::Builders => Audience::Builders,
            AudienceArg::Customers => Audience::Customers,
            AudienceArg::All => Audience::All,
        }
    }
}

pub async fn run(config: ConfigHandle, action: SmsAction, format: OutputFormat, mock: bool) -> FaResult<()> {
    super::require_admin_or_mock(&config, mock).await?;
    let sms_config = config.read().await.sms.clone();

    match action {
        SmsAction::Bulk {
            message,
            recipient_ids,
            phone_numbers,
            audience,
            builder_types,
            counties,
            organizations,
            individuals,
            approved,
            pending,
            sender_id,
        } => {
            let filters = RecipientFilters {
                audience: audience.map(Audience::from),
                builder_types,
                counties,
                account_type: if organizations {
                    Some(AccountType::Organization)
                } else if individuals {
                    Some(AccountType::Individual)
                } else {
                    None
                },
                admin_approved: if approved {
                    Some(true)
                } else if pending {
                    Some(false)
                } else {
                    None
                },
                ..RecipientFilters::default()
            };
            let request = BulkSmsRequest {
                message,
                recipients: RecipientSelection {
                    recipient_ids,
                    phone_numbers,
                    filters: (!filters.is_empty()).then_some(filters),
                },
                sender_id: sender_id.or(sms_config.sender_id),
            }
            .prepare(sms_config.max_message_length)?;

            if mock {
                return Err(mock_unsupported("sms bulk"));
            }
            let api = super::create_api_client(&config).await?;
            let pb = spinner("Sending messages...");
            let result = api.send_bulk_sms(&request).await;
            pb.finish_and_clear();
            print_send_result(&result?, format);
        }
        SmsAction::Send { phone, message } => {
            let request = SingleSmsRequest::prepare(&phone, &message, sms_config.max_message_length)?;
            if mock {
                return Err(mock_unsupported("sms send"));
            }
            let api = super::create_api_client(&config).await?;
            let pb = spinner(&format!("Sending to {}...", request.phone_number));
            let result = api.send_single_sms(&request).await;
            pb.finish_and_clear();
            print_send_result(&result?, format);
        }
        SmsAction::History { page, limit } => {
            let entries = if mock {
                mock_sms_history()
                    .into_iter()
                    .skip((page.max(1) as usize - 1) * limit.max(1) as usize)
                    .take(limit.max(1) as usize)
                    .collect()
            } else {
                super::create_api_client(&config).await?.sms_history(page, limit).await?
            };
            match format {
                OutputFormat::Json => super::print_json(&entries),
                OutputFormat::Text => print_history_table(&entries, page),
            }
        }
        SmsAction::Show { id } => {
            let entry = if mock {
                mock_sms_history()
                    .into_iter()
                    .find(|e| e.id == id)
                    .ok_or_else(|| FaError::NotFound(format!("sms history entry {id}")))?
            } else {
                super::create_api_client(&config).await?.sms_history_entry(&id).await?
            };
            match format {
                OutputFormat::Json => super::print_json(&entry),
                OutputFormat::Text => print_history_entry(&entry),
            }
        }
    }

    Ok(())
}

fn mock_unsupported(command: &str) -> FaError {
    FaError::Validation(format!("`{command}` needs a backend and cannot run with --mock"))
}

fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("  {spinner} [{elapsed_precise}] {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

fn status_badge(status: SmsStatus) -> String {
    let label = status.as_str();
    match status {
        SmsStatus::Sent => style(label).green().to_string(),
        SmsStatus::Pending => style(label).cyan().to_string(),
        SmsStatus::Partial => style(label).yellow().to_string(),
        SmsStatus::Failed => style(label).red().to_string(),
    }
}

fn print_send_result(resp: &BulkSmsResponse, format: OutputFormat) {
    match format {
        OutputFormat::Json => super::print_json(resp),
        OutputFormat::Text => {
            println!(
                "  {} {}/{} sent, {} failed",
                status_badge(resp.status),
                resp.sent_count,
                resp.total_recipients,
                resp.failed_count
            );
            if let Some(msg) = &resp.message {
                println!("  {msg}");
            }
            for failure in resp.failures() {
                let who = failure
                    .phone_number
                    .as_deref()
                    .or(failure.recipient_id.as_deref())
                    .unwrap_or("unknown");
                println!("    {} {who}: {}", style("FAIL").red(), failure.reason);
            }
        }
    }
}

fn print_history_table(entries: &[SmsHistoryEntry], page: u32) {
    if entries.is_empty() {
        println!("No messages on page {page}.");
        return;
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec!["ID", "Sent", "Status", "Recipients", "Delivered", "Failed", "Message"]);

    for e in entries {
        table.add_row(vec![
            e.id.clone(),
            super::format_time(e.created_at),
            status_badge(e.status),
            e.total_recipients.to_string(),
            e.sent_count.to_string(),
            e.failed_count.to_string(),
            super::truncate(&e.message, 40),
        ]);
    }

    println!("{table}");
    println!("\nPage {page}, {} message(s)", entries.len());
}

fn print_history_entry(entry: &SmsHistoryEntry) {
    println!("  ID:        {}", entry.id);
    println!("  Sent:      {}", super::format_time(entry.created_at));
    println!("  Sent by:   {}", entry.sent_by.as_deref().unwrap_or("-"));
    println!("  Status:    {}", status_badge(entry.status));
    println!(
        "  Delivered: {}/{} ({} failed)",
        entry.sent_count, entry.total_recipients, entry.failed_count
    );
    println!("\n  {}\n", entry.message);

    let Some(recipients) = entry.recipients.as_ref().filter(|r| !r.is_empty()) else {
        println!("  No recipient details.");
        return;
    };

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Name", "Phone", "Status", "Reason"]);
    for r in recipients {
        table.add_row(vec![
            r.name.clone().unwrap_or_else(|| "-".to_string()),
            r.phone_number.clone(),
            status_badge(r.status),
            r.reason.clone().unwrap_or_default(),
        ]);
    }
    println!("{table}");
}
