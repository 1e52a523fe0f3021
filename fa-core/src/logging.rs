//! Tracing setup for the admin client.
//!
//! Events from the workspace crates are shown at the requested level; HTTP
//! transport crates stay at `warn` unless a full filter directive is given.
//! Logs go to stderr and to a daily-rolled file in the configured directory.

use std::path::Path;
use tracing_appender::rolling;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::error::FaResult;

/// File name prefix for rotated client logs.
pub const LOG_FILE_PREFIX: &str = "fundi-admin.log";

/// Targets that follow the requested level.
const CLIENT_TARGETS: &[&str] = &["fa_core", "fa_models", "fa_api", "fa_services", "fundi_admin"];

/// Chatty dependencies held at `warn`.
const QUIET_TARGETS: &[&str] = &["reqwest", "hyper", "hyper_util", "rustls", "h2"];

const LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error", "off"];

/// Expand a bare level into per-target directives.
///
/// Anything that is not a plain level name (e.g. `"fa_api=trace,info"`) is
/// passed through untouched. An unknown word falls back to `info`.
pub fn filter_directives(level: &str) -> String {
    let level = level.trim();
    if level.contains('=') || level.contains(',') {
        return level.to_string();
    }
    let level = level.to_ascii_lowercase();
    let level = if LEVELS.contains(&level.as_str()) { level.as_str() } else { "info" };

    let mut directives = vec!["warn".to_string()];
    directives.extend(CLIENT_TARGETS.iter().map(|t| format!("{t}={level}")));
    directives.extend(QUIET_TARGETS.iter().map(|t| format!("{t}=warn")));
    directives.join(",")
}

fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_new(filter_directives(level)).unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber.
///
/// The returned guard must be held for the life of the process; dropping it
/// flushes the file writer.
pub fn init_logging(level: &str, log_dir: &Path, json_output: bool) -> FaResult<LogGuard> {
    std::fs::create_dir_all(log_dir)?;

    let (writer, guard) = tracing_appender::non_blocking(rolling::daily(log_dir, LOG_FILE_PREFIX));

    // Exactly one of these is Some.
    let (json_file, text_file) = if json_output {
        let layer = fmt::layer()
            .json()
            .with_writer(writer)
            .with_current_span(false)
            .with_file(true)
            .with_line_number(true);
        (Some(layer), None)
    } else {
        let layer = fmt::layer()
            .with_writer(writer)
            .with_ansi(false)
            .with_file(true)
            .with_line_number(true);
        (None, Some(layer))
    };

    tracing_subscriber::registry()
        .with(env_filter(level))
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false).compact())
        .with(json_file)
        .with(text_file)
        .try_init()
        .map_err(|e| crate::error::FaError::Internal(format!("logging already initialized: {e}")))?;

    tracing::debug!(dir = %log_dir.display(), "logging initialized at {level}");

    Ok(LogGuard { _guard: guard })
}

/// Keeps the non-blocking file writer alive.
pub struct LogGuard {
    _guard: tracing_appender::non_blocking::WorkerGuard,
}
