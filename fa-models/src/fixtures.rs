//! Static mock data for local development and tests.
//!
//! Mirrors the shapes the backend returns so the CLI can run with `--mock`
//! when no backend is reachable.

use chrono::{DateTime, Utc};

use crate::models::skill::{BuilderSkill, BuilderType};
use crate::models::sms::{SmsHistoryEntry, SmsRecipientRecord, SmsStatus};
use crate::models::user::{AccountType, Role, UserProfile};

/// Named mock accounts.
#[derive(Debug, Clone)]
pub struct MockUsers {
    pub fundi01: UserProfile,
    pub professional01: UserProfile,
    pub contractor01: UserProfile,
    pub hardware01: UserProfile,
    pub customer01: UserProfile,
    pub organization01: UserProfile,
    pub admin01: UserProfile,
}

impl MockUsers {
    /// Every mock account, builders first.
    pub fn all(&self) -> Vec<&UserProfile> {
        vec![
            &self.fundi01,
            &self.professional01,
            &self.contractor01,
            &self.hardware01,
            &self.customer01,
            &self.organization01,
            &self.admin01,
        ]
    }

    pub fn builders(&self) -> Vec<&UserProfile> {
        self.all().into_iter().filter(|u| u.user_type.is_builder()).collect()
    }

    pub fn customers(&self) -> Vec<&UserProfile> {
        self.all()
            .into_iter()
            .filter(|u| u.user_type == Role::Customer)
            .collect()
    }
}

fn ts(s: &str) -> Option<DateTime<Utc>> {
    s.parse().ok()
}

#[allow(clippy::too_many_arguments)]
fn user(
    id: &str,
    user_type: Role,
    account_type: AccountType,
    name: (&str, &str),
    organization_name: Option<&str>,
    email: &str,
    phone: &str,
    location: [Option<&str>; 4],
    admin_approved: bool,
    skills: &[&str],
) -> UserProfile {
    let [country, county, sub_county, estate] = location;
    UserProfile {
        id: id.to_string(),
        user_type,
        account_type,
        first_name: Some(name.0.to_string()).filter(|s| !s.is_empty()),
        last_name: Some(name.1.to_string()).filter(|s| !s.is_empty()),
        organization_name: organization_name.map(String::from),
        email: Some(email.to_string()),
        phone_number: Some(phone.to_string()),
        country: country.map(String::from),
        county: county.map(String::from),
        sub_county: sub_county.map(String::from),
        estate: estate.map(String::from),
        admin_approved,
        created_at: ts("2024-02-12T09:30:00Z"),
        skills: skills.iter().map(|s| s.to_string()).collect(),
    }
}

/// The mock account set.
pub fn mock_users() -> MockUsers {
    MockUsers {
        fundi01: user(
            "fundi01",
            Role::Fundi,
            AccountType::Individual,
            ("John", "Mwangi"),
            None,
            "john.mwangi@example.com",
            "+254712000001",
            [Some("Kenya"), Some("Nairobi"), Some("Embakasi"), None],
            false,
            &["Masonry", "Plumbing"],
        ),
        professional01: user(
            "professional01",
            Role::Professional,
            AccountType::Individual,
            ("Grace", "Achieng"),
            None,
            "grace.achieng@example.com",
            "+254712000002",
            [Some("Kenya"), Some("Kisumu"), Some("Kisumu Central"), Some("Milimani")],
            true,
            &["Architecture"],
        ),
        contractor01: user(
            "contractor01",
            Role::Contractor,
            AccountType::Organization,
            ("", ""),
            Some("Jenga Builders Ltd"),
            "info@jengabuilders.example.com",
            "+254712000003",
            [Some("Kenya"), Some("Mombasa"), None, None],
            true,
            &["Roofing", "Road Works"],
        ),
        hardware01: user(
            "hardware01",
            Role::Hardware,
            AccountType::Organization,
            ("", ""),
            Some("Mabati Hardware"),
            "sales@mabati.example.com",
            "+254712000004",
            [Some("Kenya"), Some("Nakuru"), Some("Nakuru East"), Some("Section 58")],
            false,
            &[],
        ),
        customer01: user(
            "customer01",
            Role::Customer,
            AccountType::Individual,
            ("Peter", "Otieno"),
            None,
            "peter.otieno@example.com",
            "+254712000005",
            [None, None, None, None],
            true,
            &[],
        ),
        organization01: user(
            "organization01",
            Role::Customer,
            AccountType::Organization,
            ("", ""),
            Some("Savannah Estates"),
            "projects@savannah.example.com",
            "+254712000006",
            [Some("Kenya"), Some("Kiambu"), Some("Ruiru"), None],
            true,
            &[],
        ),
        admin01: user(
            "admin01",
            Role::Admin,
            AccountType::Individual,
            ("Amina", "Hassan"),
            None,
            "amina.hassan@example.com",
            "+254712000007",
            [Some("Kenya"), Some("Nairobi"), None, None],
            true,
            &[],
        ),
    }
}

fn skill(id: &str, name: &str, builder_type: BuilderType, approved_by: Option<&str>) -> BuilderSkill {
    BuilderSkill {
        id: id.to_string(),
        skill_name: name.to_string(),
        builder_type,
        created_at: ts("2024-03-01T08:00:00Z"),
        created_by: Some("admin01".to_string()),
        approved_by: approved_by.map(String::from),
        approved_at: approved_by.and_then(|_| ts("2024-03-02T10:15:00Z")),
        unsynced: false,
    }
}

/// Mock skills covering every builder type, approved and pending.
pub fn mock_skills() -> Vec<BuilderSkill> {
    vec![
        skill("skill-001", "Masonry", BuilderType::Fundi, Some("admin01")),
        skill("skill-002", "Plumbing", BuilderType::Fundi, None),
        skill("skill-003", "Architecture", BuilderType::Professional, Some("admin01")),
        skill("skill-004", "Quantity Surveying", BuilderType::Professional, None),
        skill("skill-005", "Roofing", BuilderType::Contractor, Some("admin01")),
        skill("skill-006", "Cement Supply", BuilderType::Hardware, None),
    ]
}

/// Mock SMS history, newest first.
pub fn mock_sms_history() -> Vec<SmsHistoryEntry> {
    vec![
        SmsHistoryEntry {
            id: "sms-002".into(),
            message: "Reminder: update your profile to keep receiving jobs.".into(),
            status: SmsStatus::Partial,
            sent_by: Some("admin01".into()),
            created_at: ts("2024-04-10T07:45:00Z"),
            total_recipients: 3,
            sent_count: 2,
            failed_count: 1,
            recipients: Some(vec![
                SmsRecipientRecord {
                    name: Some("John Mwangi".into()),
                    phone_number: "+254712000001".into(),
                    status: SmsStatus::Sent,
                    reason: None,
                },
                SmsRecipientRecord {
                    name: Some("Grace Achieng".into()),
                    phone_number: "+254712000002".into(),
                    status: SmsStatus::Sent,
                    reason: None,
                },
                SmsRecipientRecord {
                    name: Some("Mabati Hardware".into()),
                    phone_number: "+254712000004".into(),
                    status: SmsStatus::Failed,
                    reason: Some("Absent subscriber".into()),
                },
            ]),
        },
        SmsHistoryEntry {
            id: "sms-001".into(),
            message: "Welcome to the platform!".into(),
            status: SmsStatus::Sent,
            sent_by: Some("admin01".into()),
            created_at: ts("2024-03-05T12:00:00Z"),
            total_recipients: 2,
            sent_count: 2,
            failed_count: 0,
            recipients: None,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fundi01_is_unapproved() {
        assert!(!mock_users().fundi01.admin_approved);
    }

    #[test]
    fn test_partition() {
        let users = mock_users();
        let contractor = users.builders().into_iter().find(|u| u.id == "contractor01").unwrap();
        assert_eq!(contractor.display_name(), "Jenga Builders Ltd");
        assert_eq!(users.builders().len(), 4);
        assert_eq!(users.customers().len(), 2);
    }

    #[test]
    fn test_fixture_derivations() {
        let users = mock_users();
        assert_eq!(users.fundi01.display_name(), "John Mwangi");
        assert_eq!(users.fundi01.location(), "Kenya, Nairobi, Embakasi");
        assert_eq!(users.customer01.location(), "N/A");
    }

    #[test]
    fn test_mock_skills_unique_ids() {
        let skills = mock_skills();
        let mut ids: Vec<_> = skills.iter().map(|s| s.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), skills.len());
        assert!(skills.iter().any(|s| !s.is_approved()));
    }

    #[test]
    fn test_mock_history_counts_consistent() {
        for entry in mock_sms_history() {
            assert_eq!(entry.sent_count + entry.failed_count, entry.total_recipients);
        }
    }
}
