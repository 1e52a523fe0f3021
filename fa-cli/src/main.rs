//! Fundi Admin CLI - command-line console for the marketplace admin API.
//!
//! Manages builder skills, sends SMS, browses auth/OTP/audit logs and
//! handles passwords against the marketplace backend. Commands that touch
//! the admin area pass through the same route guard as the dashboard.

mod commands;
mod views;

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use console::style;
use tracing::info;

use fa_core::config::{AppConfig, ConfigHandle};
use fa_core::error::{FaError, FaResult};
use fa_core::logging;
use fa_core::platform::Platform;

/// Fundi Admin - marketplace administration from the terminal.
#[derive(Parser)]
#[command(
    name = "fundi-admin",
    version,
    about = "Fundi marketplace admin console",
    long_about = "A command-line console for the Fundi marketplace admin API.\n\
                   Approve builder skills, message builders and customers, and audit sign-ins."
)]
struct Cli {
    /// Path to the configuration file.
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Enable verbose logging (debug level).
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format (text, json).
    #[arg(short = 'f', long, global = true, default_value = "text")]
    format: OutputFormat,

    /// Serve skill, customer and builder reads from built-in fixtures.
    #[arg(long, global = true)]
    mock: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Output format for CLI responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// JSON output for scripting.
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in and cache the session locally.
    Login {
        /// Account email (prompted if omitted).
        #[arg(short, long)]
        email: Option<String>,
    },
    /// Forget the cached session.
    Logout,
    /// Show the cached session and whether it passes the route guard.
    Whoami,
    /// Manage builder skills.
    Skills {
        #[command(subcommand)]
        action: commands::skills::SkillsAction,
    },
    /// Send SMS and browse send history.
    Sms {
        #[command(subcommand)]
        action: commands::sms::SmsAction,
    },
    /// Browse auth, OTP and audit logs, or the local client log.
    Logs {
        #[command(subcommand)]
        action: commands::logs::LogsAction,
    },
    /// Change your password or reset another account's.
    Password {
        #[command(subcommand)]
        action: commands::password::PasswordAction,
    },
    /// Look up customers.
    Customers {
        #[command(subcommand)]
        action: commands::users::UserAction,
    },
    /// Look up builders.
    Builders {
        #[command(subcommand)]
        action: commands::users::UserAction,
    },
    /// List the built-in mock accounts.
    Fixtures,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", style("error:").red().bold(), error_line(&e));
            ExitCode::FAILURE
        }
    }
}

/// One-line description of a failed command.
fn error_line(e: &FaError) -> String {
    match e {
        FaError::AccessDenied { redirect_to, reason } => {
            format!("access denied: {reason} (redirected to {redirect_to})")
        }
        FaError::Api { status, .. } => format!("{} (HTTP {status})", e.user_message()),
        other => other.user_message(),
    }
}

async fn run(cli: Cli) -> FaResult<()> {
    // Load configuration
    let config = match cli.config.as_deref() {
        Some(path) => AppConfig::load_from_file(std::path::Path::new(path))?,
        None => AppConfig::load_default()?,
    };

    // Initialize logging
    let log_level = if cli.verbose {
        "debug".to_string()
    } else {
        config.logging.level.clone()
    };
    let log_dir = config
        .effective_log_dir()
        .unwrap_or_else(|_| std::path::PathBuf::from(".").join("logs"));
    let _guard = logging::init_logging(&log_level, &log_dir, config.logging.json_output)?;

    let config_handle = ConfigHandle::new(config);

    info!(
        "{} CLI v{} on {}",
        fa_core::constants::APP_NAME,
        fa_core::constants::APP_VERSION,
        Platform::current().name()
    );

    // Dispatch to command handlers
    match cli.command {
        Commands::Login { email } => {
            commands::session::login(config_handle, email, cli.format).await
        }
        Commands::Logout => {
            commands::session::logout(config_handle).await
        }
        Commands::Whoami => {
            commands::session::whoami(config_handle, cli.format).await
        }
        Commands::Skills { action } => {
            commands::skills::run(config_handle, action, cli.format, cli.mock).await
        }
        Commands::Sms { action } => {
            commands::sms::run(config_handle, action, cli.format, cli.mock).await
        }
        Commands::Logs { action } => {
            commands::logs::run(config_handle, action, cli.format).await
        }
        Commands::Password { action } => {
            commands::password::run(config_handle, action, cli.format).await
        }
        Commands::Customers { action } => {
            commands::users::run(config_handle, commands::users::UserKind::Customer, action, cli.format, cli.mock).await
        }
        Commands::Builders { action } => {
            commands::users::run(config_handle, commands::users::UserKind::Builder, action, cli.format, cli.mock).await
        }
        Commands::Fixtures => {
            commands::users::list_fixtures(cli.format)
        }
    }
}
