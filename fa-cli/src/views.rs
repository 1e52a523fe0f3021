//! Terminal views for customer and builder records.

use comfy_table::{presets::UTF8_FULL, modifiers::UTF8_ROUND_CORNERS, ContentArrangement, Table};
use console::style;

use fa_core::constants::NOT_AVAILABLE;
use fa_models::UserProfile;

/// Styled badge for an approval flag.
pub fn approval_badge(approved: bool) -> String {
    let label = fa_models::models::user::approval_label(approved);
    if approved {
        style(label).green().bold().to_string()
    } else {
        style(label).yellow().bold().to_string()
    }
}

/// Placeholder shown when a lookup returned nothing.
pub fn not_found(kind: &str) -> String {
    format!("{} not found.", capitalize(kind))
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn or_na(value: Option<&str>) -> String {
    value
        .filter(|v| !v.trim().is_empty())
        .unwrap_or(NOT_AVAILABLE)
        .to_string()
}

/// Label/value rows of the detail panel.
pub fn detail_rows(user: &UserProfile) -> Vec<(&'static str, String)> {
    let mut rows = vec![
        ("Name", user.display_name()),
        ("Type", user.user_type.to_string()),
        ("Email", or_na(user.email.as_deref())),
        ("Phone", or_na(user.phone_number.as_deref())),
        ("Location", user.location()),
        ("Status", user.approval_label().to_string()),
    ];
    if user.user_type.is_builder() {
        let skills = if user.skills.is_empty() {
            NOT_AVAILABLE.to_string()
        } else {
            user.skills.join(", ")
        };
        rows.push(("Skills", skills));
    }
    rows.push(("Joined", crate::commands::format_time(user.created_at)));
    rows
}

/// Render the detail panel, or the placeholder for a missing record.
pub fn render_user_detail(kind: &str, user: Option<&UserProfile>) -> String {
    let Some(user) = user else {
        return not_found(kind);
    };

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);

    for (label, value) in detail_rows(user) {
        let value = if label == "Status" {
            approval_badge(user.admin_approved)
        } else {
            value
        };
        table.add_row(vec![label.to_string(), value]);
    }

    format!("{}\n{table}", style(user.display_name()).bold())
}
