//! Builder skill entity model.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use fa_core::error::{FaError, FaResult};

/// Builder category a skill belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BuilderType {
    Fundi,
    Professional,
    Contractor,
    Hardware,
}

impl BuilderType {
    /// All builder categories in display order.
    pub const ALL: [BuilderType; 4] = [
        BuilderType::Fundi,
        BuilderType::Professional,
        BuilderType::Contractor,
        BuilderType::Hardware,
    ];

    /// Wire value used in paths and bodies.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fundi => "FUNDI",
            Self::Professional => "PROFESSIONAL",
            Self::Contractor => "CONTRACTOR",
            Self::Hardware => "HARDWARE",
        }
    }

    /// Human label for tables.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Fundi => "Fundi",
            Self::Professional => "Professional",
            Self::Contractor => "Contractor",
            Self::Hardware => "Hardware",
        }
    }
}

impl fmt::Display for BuilderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BuilderType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "FUNDI" => Ok(Self::Fundi),
            "PROFESSIONAL" => Ok(Self::Professional),
            "CONTRACTOR" => Ok(Self::Contractor),
            "HARDWARE" => Ok(Self::Hardware),
            other => Err(format!(
                "unknown builder type '{other}' (expected FUNDI, PROFESSIONAL, CONTRACTOR or HARDWARE)"
            )),
        }
    }
}

/// A named capability tag associated with a builder type.
///
/// Skills are created unapproved and move one way to approved when an
/// administrator records an approver. The backend owns the identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuilderSkill {
    #[serde(alias = "_id")]
    pub id: String,
    pub skill_name: String,
    pub builder_type: BuilderType,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub created_by: Option<String>,
    #[serde(default)]
    pub approved_by: Option<String>,
    #[serde(default)]
    pub approved_at: Option<DateTime<Utc>>,
    /// Set when the record carries edits the backend never received.
    #[serde(skip)]
    pub unsynced: bool,
}

impl BuilderSkill {
    /// Whether an approver has been recorded.
    pub fn is_approved(&self) -> bool {
        self.approved_by.is_some()
    }

    /// Record the approver. Approval is one-way; a later approver replaces
    /// the earlier identity but never clears it.
    pub fn mark_approved(&mut self, approved_by: &str, at: DateTime<Utc>) {
        self.approved_by = Some(approved_by.to_string());
        self.approved_at = Some(at);
    }

    /// Short status label for tables.
    pub fn status_label(&self) -> &'static str {
        if self.is_approved() {
            "Approved"
        } else {
            "Pending"
        }
    }
}

/// Body for creating a skill.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSkill {
    pub skill_name: String,
    pub builder_type: BuilderType,
}

impl NewSkill {
    pub fn new(skill_name: impl Into<String>, builder_type: BuilderType) -> Self {
        Self {
            skill_name: skill_name.into(),
            builder_type,
        }
    }

    /// Reject blank names before anything goes over the wire.
    pub fn validate(&self) -> FaResult<()> {
        if self.skill_name.trim().is_empty() {
            return Err(FaError::Validation("skill name must not be empty".into()));
        }
        Ok(())
    }
}

/// Requested changes to an existing skill.
///
/// Only `approved_by` maps to a backend operation; the other fields are
/// display edits.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SkillUpdate {
    pub skill_name: Option<String>,
    pub builder_type: Option<BuilderType>,
    pub approved_by: Option<String>,
}

impl SkillUpdate {
    /// An update that only records an approver.
    pub fn approve(approved_by: impl Into<String>) -> Self {
        Self {
            approved_by: Some(approved_by.into()),
            ..Self::default()
        }
    }

    /// Whether the update touches fields other than approval.
    pub fn has_field_edits(&self) -> bool {
        self.skill_name.is_some() || self.builder_type.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_type_parse_is_case_insensitive() {
        assert_eq!("fundi".parse::<BuilderType>().unwrap(), BuilderType::Fundi);
        assert_eq!(" Hardware ".parse::<BuilderType>().unwrap(), BuilderType::Hardware);
        assert!("plumber".parse::<BuilderType>().is_err());
    }

    #[test]
    fn test_skill_deserialize_from_backend() {
        let json = serde_json::json!({
            "_id": "sk-1",
            "skillName": "Masonry",
            "builderType": "FUNDI",
            "createdAt": "2024-03-01T08:00:00Z",
            "createdBy": "admin@fundi.co.ke"
        });
        let skill: BuilderSkill = serde_json::from_value(json).unwrap();
        assert_eq!(skill.id, "sk-1");
        assert_eq!(skill.builder_type, BuilderType::Fundi);
        assert!(!skill.is_approved());
        assert_eq!(skill.status_label(), "Pending");
        assert!(!skill.unsynced);
    }

    #[test]
    fn test_mark_approved() {
        let mut skill: BuilderSkill = serde_json::from_value(serde_json::json!({
            "id": "sk-2", "skillName": "Roofing", "builderType": "CONTRACTOR"
        }))
        .unwrap();
        skill.mark_approved("admin01", Utc::now());
        assert!(skill.is_approved());
        assert_eq!(skill.approved_by.as_deref(), Some("admin01"));
        assert!(skill.approved_at.is_some());
    }

    #[test]
    fn test_new_skill_validation() {
        assert!(NewSkill::new("Plumbing", BuilderType::Fundi).validate().is_ok());
        assert!(NewSkill::new("   ", BuilderType::Fundi).validate().is_err());
        let body = serde_json::to_value(NewSkill::new("Tiling", BuilderType::Professional)).unwrap();
        assert_eq!(body["skillName"], "Tiling");
        assert_eq!(body["builderType"], "PROFESSIONAL");
    }

    #[test]
    fn test_skill_update_field_edits() {
        assert!(!SkillUpdate::approve("a").has_field_edits());
        let edit = SkillUpdate {
            skill_name: Some("Welding".into()),
            ..SkillUpdate::default()
        };
        assert!(edit.has_field_edits());
    }
}
