//! Input checks applied before requests leave the client.

use lazy_static::lazy_static;
use regex::Regex;

use fa_core::constants::MIN_PASSWORD_LENGTH;
use fa_core::error::{FaError, FaResult};

lazy_static! {
    static ref INTERNATIONAL_PHONE: Regex = Regex::new(r"^\+[1-9][0-9]{7,14}$").unwrap();
    static ref KE_LOCAL_PHONE: Regex = Regex::new(r"^0[17][0-9]{8}$").unwrap();
    static ref EMAIL: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
}

/// Normalize a phone number to international form.
///
/// Spaces and dashes are dropped, Kenyan local numbers (`07…`, `01…`) gain
/// the `+254` prefix and bare `254…` gains a leading `+`.
pub fn normalize_phone(raw: &str) -> FaResult<String> {
    let compact: String = raw
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .collect();

    let candidate = if KE_LOCAL_PHONE.is_match(&compact) {
        format!("+254{}", &compact[1..])
    } else if compact.starts_with("254") {
        format!("+{compact}")
    } else {
        compact
    };

    if INTERNATIONAL_PHONE.is_match(&candidate) {
        Ok(candidate)
    } else {
        Err(FaError::Validation(format!("invalid phone number: {raw}")))
    }
}

/// Basic shape check for email addresses.
pub fn validate_email(email: &str) -> FaResult<()> {
    if EMAIL.is_match(email.trim()) {
        Ok(())
    } else {
        Err(FaError::Validation(format!("invalid email address: {email}")))
    }
}

/// Enforce the minimum password length.
pub fn validate_password(password: &str) -> FaResult<()> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(FaError::Validation(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }
    Ok(())
}
