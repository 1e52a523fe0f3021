//! Log viewing commands.
//!
//! `auth`, `otp` and `audit` page through the backend's log families;
//! `local` tails this client's own log file.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use clap::{Args, Subcommand};
use comfy_table::{Table, presets::UTF8_FULL, modifiers::UTF8_ROUND_CORNERS, ContentArrangement};
use console::style;

use fa_core::config::ConfigHandle;
use fa_core::constants::DEFAULT_LOG_PAGE_SIZE;
use fa_core::error::FaResult;
use fa_core::logging::LOG_FILE_PREFIX;
use fa_models::{LogFilterOptions, LogPage, SortOrder};
use crate::OutputFormat;

#[derive(Subcommand)]
pub enum LogsAction {
    /// Sign-in and sign-out events.
    Auth(LogQueryArgs),
    /// OTP issuance and verification events.
    Otp(LogQueryArgs),
    /// Administrative audit trail.
    Audit(LogQueryArgs),
    /// Show this client's local log file.
    Local {
        /// Number of log lines to show.
        #[arg(short = 'n', long, default_value = "50")]
        count: u32,
        /// Follow log output in real-time (tail -f style).
        #[arg(short = 'F', long)]
        follow: bool,
        /// Filter log level (trace, debug, info, warn, error).
        #[arg(short, long)]
        level: Option<String>,
    },
}

/// Pagination and filters shared by the backend log commands.
#[derive(Args, Debug, Clone)]
pub struct LogQueryArgs {
    #[arg(short, long, default_value = "1")]
    pub page: u32,
    #[arg(short = 'n', long, default_value_t = DEFAULT_LOG_PAGE_SIZE)]
    pub limit: u32,
    /// Field to sort by.
    #[arg(long)]
    pub sort_by: Option<String>,
    /// Sort order (asc, desc).
    #[arg(long, default_value = "desc")]
    pub order: SortOrder,
    #[arg(short, long)]
    pub status: Option<String>,
    /// Event type within the family (e.g. LOGIN).
    #[arg(short = 't', long = "type")]
    pub log_type: Option<String>,
    /// Free-text search.
    #[arg(short = 'q', long)]
    pub search: Option<String>,
    /// First day to include (YYYY-MM-DD).
    #[arg(long)]
    pub from: Option<NaiveDate>,
    /// Last day to include (YYYY-MM-DD).
    #[arg(long)]
    pub to: Option<NaiveDate>,
}

impl From<LogQueryArgs> for LogFilterOptions {
    fn from(a: LogQueryArgs) -> Self {
        Self {
            page: a.page,
            limit: a.limit,
            sort_by: a.sort_by,
            order: a.order,
            status: a.status,
            log_type: a.log_type,
            search: a.search,
            from: a.from,
            to: a.to,
        }
    }
}

/// Run the logs command.
pub async fn run(config: ConfigHandle, action: LogsAction, format: OutputFormat) -> FaResult<()> {
    match action {
        LogsAction::Local { count, follow, level } => {
            return show_local(&config, count, follow, level, format).await;
        }
        LogsAction::Auth(args) => {
            let api = backend(&config).await?;
            let resp = api.auth_logs(&args.into()).await?;
            render_page(&resp.data, format, &["When", "Email", "Action", "Status", "IP", "Reason"], |e| {
                vec![
                    super::format_time(e.created_at),
                    e.email.clone().unwrap_or_else(|| "-".into()),
                    e.action.clone(),
                    e.status.clone(),
                    e.ip_address.clone().unwrap_or_else(|| "-".into()),
                    e.reason.clone().unwrap_or_default(),
                ]
            });
        }
        LogsAction::Otp(args) => {
            let api = backend(&config).await?;
            let resp = api.otp_logs(&args.into()).await?;
            render_page(&resp.data, format, &["When", "Phone", "Email", "Purpose", "Status", "Attempts"], |e| {
                vec![
                    super::format_time(e.created_at),
                    e.phone_number.clone().unwrap_or_else(|| "-".into()),
                    e.email.clone().unwrap_or_else(|| "-".into()),
                    e.purpose.clone(),
                    e.status.clone(),
                    e.attempts.to_string(),
                ]
            });
        }
        LogsAction::Audit(args) => {
            let api = backend(&config).await?;
            let resp = api.audit_logs(&args.into()).await?;
            render_page(&resp.data, format, &["When", "Actor", "Action", "Entity", "Details"], |e| {
                let entity = match (&e.entity, &e.entity_id) {
                    (Some(kind), Some(id)) => format!("{kind} {id}"),
                    (Some(kind), None) => kind.clone(),
                    (None, Some(id)) => id.clone(),
                    (None, None) => "-".into(),
                };
                vec![
                    super::format_time(e.created_at),
                    e.actor_email
                        .clone()
                        .or_else(|| e.actor_id.clone())
                        .unwrap_or_else(|| "-".into()),
                    e.action.clone(),
                    entity,
                    super::truncate(e.details.as_deref().unwrap_or_default(), 48),
                ]
            });
        }
    }

    Ok(())
}

/// Guarded client for the backend log endpoints.
async fn backend(config: &ConfigHandle) -> FaResult<fa_api::ApiClient> {
    super::require_admin(config).await?;
    super::create_api_client(config).await
}

fn render_page<T: serde::Serialize>(
    page: &LogPage<T>,
    format: OutputFormat,
    header: &[&str],
    row: impl Fn(&T) -> Vec<String>,
) {
    match format {
        OutputFormat::Json => super::print_json(page),
        OutputFormat::Text => {
            if page.logs.is_empty() {
                println!("No log entries on page {}.", page.page);
                return;
            }
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .apply_modifier(UTF8_ROUND_CORNERS)
                .set_content_arrangement(ContentArrangement::Dynamic);
            table.set_header(header.to_vec());
            for entry in &page.logs {
                table.add_row(row(entry));
            }
            println!("{table}");
            println!(
                "\nPage {} of {} ({} result(s)){}",
                page.page,
                page.total_pages.max(1),
                page.total_results,
                if page.has_next() { ", use --page for more" } else { "" }
            );
        }
    }
}

async fn show_local(
    config: &ConfigHandle,
    count: u32,
    follow: bool,
    level_filter: Option<String>,
    format: OutputFormat,
) -> FaResult<()> {
    let log_dir = config.read().await.effective_log_dir()?;

    if !log_dir.exists() {
        println!("No log directory found at: {}", log_dir.display());
        return Ok(());
    }

    let Some(mut log_path) = latest_log_file(&log_dir)? else {
        println!("No log files found in {}", log_dir.display());
        return Ok(());
    };

    let content = std::fs::read(&log_path)?;
    let text = String::from_utf8_lossy(&content);
    let lines: Vec<&str> = text.lines().collect();
    let start = lines.len().saturating_sub(count as usize);

    if follow {
        println!(
            "  {} Following {} (Ctrl+C to stop)\n",
            style("TAIL").cyan().bold(),
            log_path.display()
        );
        for line in &lines[start..] {
            if should_show_line(line, &level_filter) {
                println!("{}", colorize_log_line(line));
            }
        }

        let mut offset = content.len();
        loop {
            tokio::select! {
                _ = tokio::time::sleep(std::time::Duration::from_millis(500)) => {
                    // Daily rollover starts a new file.
                    if let Ok(Some(newest)) = latest_log_file(&log_dir) {
                        if newest != log_path {
                            println!("  {} {}", style("NOW").cyan().bold(), newest.display());
                            log_path = newest;
                            offset = 0;
                        }
                    }
                    let Ok(bytes) = std::fs::read(&log_path) else { continue };
                    let (appended, next) = appended_since(&bytes, offset);
                    for line in appended.lines() {
                        if !line.is_empty() && should_show_line(line, &level_filter) {
                            println!("{}", colorize_log_line(line));
                        }
                    }
                    offset = next;
                }
                _ = tokio::signal::ctrl_c() => {
                    println!("\n  Stopped tailing.");
                    break;
                }
            }
        }
        return Ok(());
    }

    let mut shown = 0;
    for line in &lines[start..] {
        if should_show_line(line, &level_filter) {
            match format {
                OutputFormat::Text => println!("{}", colorize_log_line(line)),
                OutputFormat::Json => println!("{line}"),
            }
            shown += 1;
        }
    }

    if format == OutputFormat::Text {
        println!(
            "\n  --- {} ({} shown / {} total lines) ---",
            log_path.display(),
            shown,
            lines.len()
        );
    }
    Ok(())
}

/// Most recently modified client log file in `dir`.
fn latest_log_file(dir: &Path) -> FaResult<Option<PathBuf>> {
    let newest = std::fs::read_dir(dir)?
        .filter_map(|e| e.ok())
        .filter(|e| e.file_name().to_string_lossy().starts_with(LOG_FILE_PREFIX))
        .max_by_key(|e| e.metadata().ok().and_then(|m| m.modified().ok()))
        .map(|e| e.path());
    Ok(newest)
}

/// Text written after byte `offset`, and the offset to resume from.
///
/// A file shorter than `offset` was truncated or replaced, so it is read
/// from the start.
fn appended_since(bytes: &[u8], offset: usize) -> (String, usize) {
    let from = if bytes.len() < offset { 0 } else { offset };
    let tail = bytes.get(from..).unwrap_or_default();
    (String::from_utf8_lossy(tail).into_owned(), bytes.len())
}

/// Check if a log line should be shown based on the level filter.
fn should_show_line(line: &str, level_filter: &Option<String>) -> bool {
    let Some(filter) = level_filter else {
        return true;
    };
    let filter_upper = filter.to_uppercase();
    let line_upper = line.to_uppercase();

    // Show this level and above (more severe)
    let levels = ["ERROR", "WARN", "INFO", "DEBUG", "TRACE"];
    match levels.iter().position(|l| *l == filter_upper) {
        Some(idx) => levels[..=idx].iter().any(|level| line_upper.contains(level)),
        None => line_upper.contains(&filter_upper),
    }
}

/// Apply color to a log line based on its log level.
fn colorize_log_line(line: &str) -> String {
    let upper = line.to_uppercase();
    if upper.contains("ERROR") {
        style(line).red().to_string()
    } else if upper.contains("WARN") {
        style(line).yellow().to_string()
    } else if upper.contains("DEBUG") || upper.contains("TRACE") {
        style(line).dim().to_string()
    } else {
        line.to_string()
    }
}
