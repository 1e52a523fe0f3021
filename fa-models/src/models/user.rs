//! Customer, builder and session user models.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use fa_core::constants::NOT_AVAILABLE;

use super::skill::BuilderType;

/// Account role as stored on the user record (`userType` on the wire).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    SuperAdmin,
    Admin,
    Customer,
    Fundi,
    Professional,
    Contractor,
    Hardware,
    #[serde(other)]
    Unknown,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SuperAdmin => "SUPER_ADMIN",
            Self::Admin => "ADMIN",
            Self::Customer => "CUSTOMER",
            Self::Fundi => "FUNDI",
            Self::Professional => "PROFESSIONAL",
            Self::Contractor => "CONTRACTOR",
            Self::Hardware => "HARDWARE",
            Self::Unknown => "UNKNOWN",
        }
    }

    /// Builder category for builder roles.
    pub fn builder_type(&self) -> Option<BuilderType> {
        match self {
            Self::Fundi => Some(BuilderType::Fundi),
            Self::Professional => Some(BuilderType::Professional),
            Self::Contractor => Some(BuilderType::Contractor),
            Self::Hardware => Some(BuilderType::Hardware),
            _ => None,
        }
    }

    pub fn is_builder(&self) -> bool {
        self.builder_type().is_some()
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin | Self::SuperAdmin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().replace('-', "_").as_str() {
            "SUPER_ADMIN" => Ok(Self::SuperAdmin),
            "ADMIN" => Ok(Self::Admin),
            "CUSTOMER" => Ok(Self::Customer),
            "FUNDI" => Ok(Self::Fundi),
            "PROFESSIONAL" => Ok(Self::Professional),
            "CONTRACTOR" => Ok(Self::Contractor),
            "HARDWARE" => Ok(Self::Hardware),
            other => Err(format!("unknown role '{other}'")),
        }
    }
}

/// Whether an account belongs to a person or an organization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountType {
    #[default]
    Individual,
    Organization,
}

/// A customer or builder account as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(alias = "_id")]
    pub id: String,
    pub user_type: Role,
    #[serde(default)]
    pub account_type: AccountType,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub organization_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub county: Option<String>,
    #[serde(default)]
    pub sub_county: Option<String>,
    #[serde(default)]
    pub estate: Option<String>,
    #[serde(default)]
    pub admin_approved: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub skills: Vec<String>,
}

impl UserProfile {
    /// Name shown in headers and tables.
    ///
    /// Organizations show the organization name; everyone else shows
    /// `"{firstName} {lastName}"`.
    pub fn display_name(&self) -> String {
        match self.account_type {
            AccountType::Organization => self.organization_name.clone().unwrap_or_default(),
            AccountType::Individual => format!(
                "{} {}",
                self.first_name.as_deref().unwrap_or_default(),
                self.last_name.as_deref().unwrap_or_default()
            ),
        }
    }

    /// Comma-joined location, or `N/A` when nothing is set.
    pub fn location(&self) -> String {
        join_location(&[
            self.country.as_deref(),
            self.county.as_deref(),
            self.sub_county.as_deref(),
            self.estate.as_deref(),
        ])
    }

    /// Badge text for the approval flag.
    pub fn approval_label(&self) -> &'static str {
        approval_label(self.admin_approved)
    }
}

/// Join the present, non-empty parts with `", "`; `N/A` if none remain.
pub fn join_location(parts: &[Option<&str>]) -> String {
    let present: Vec<&str> = parts
        .iter()
        .flatten()
        .copied()
        .filter(|p| !p.trim().is_empty())
        .collect();
    if present.is_empty() {
        NOT_AVAILABLE.to_string()
    } else {
        present.join(", ")
    }
}

/// Badge text for an approval flag.
pub fn approval_label(approved: bool) -> &'static str {
    if approved {
        "Approved"
    } else {
        "Pending Approval"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn individual() -> UserProfile {
        serde_json::from_value(serde_json::json!({
            "_id": "u-1",
            "userType": "FUNDI",
            "accountType": "INDIVIDUAL",
            "firstName": "Jane",
            "lastName": "Wanjiku",
            "organizationName": "Ignored Ltd",
            "adminApproved": false
        }))
        .unwrap()
    }

    #[test]
    fn test_display_name_individual() {
        assert_eq!(individual().display_name(), "Jane Wanjiku");
    }

    #[test]
    fn test_display_name_organization() {
        let mut user = individual();
        user.account_type = AccountType::Organization;
        assert_eq!(user.display_name(), "Ignored Ltd");
    }

    #[test]
    fn test_location_skips_missing_parts() {
        assert_eq!(
            join_location(&[Some("Kenya"), None, Some(""), Some("Kilimani")]),
            "Kenya, Kilimani"
        );
        assert_eq!(
            join_location(&[Some("Kenya"), Some("Nairobi"), Some("Westlands"), Some("Parklands")]),
            "Kenya, Nairobi, Westlands, Parklands"
        );
    }

    #[test]
    fn test_location_all_absent() {
        assert_eq!(join_location(&[None, Some(""), None, None]), "N/A");
        assert_eq!(individual().location(), "N/A");
    }

    #[test]
    fn test_unknown_role_deserializes() {
        let role: Role = serde_json::from_value(serde_json::json!("AUDITOR")).unwrap();
        assert_eq!(role, Role::Unknown);
    }

    #[test]
    fn test_role_helpers() {
        assert!(Role::SuperAdmin.is_admin());
        assert!(!Role::Customer.is_admin());
        assert_eq!(Role::Hardware.builder_type(), Some(BuilderType::Hardware));
        assert!(!Role::Admin.is_builder());
        assert_eq!("super-admin".parse::<Role>().unwrap(), Role::SuperAdmin);
    }

    #[test]
    fn test_approval_label() {
        assert_eq!(approval_label(true), "Approved");
        assert_eq!(individual().approval_label(), "Pending Approval");
    }
}
