//! Shared test utilities for integration tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;

use fa_core::config::{AppConfig, ConfigHandle};
use fa_core::error::{FaError, FaResult};
use fa_models::fixtures::{mock_skills, mock_users};
use fa_models::{BuilderSkill, BuilderType, NewSkill, Session, UserProfile};
use fa_services::event_bus::EventBus;
use fa_services::skills::{SkillStore, SkillsApi};

/// A backend call seen by [`FakeSkillsApi`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Fetch(Option<BuilderType>),
    Create(String),
    Approve { id: String, by: String },
    Remove(String),
}

/// Scripted skills backend recording every call.
///
/// Set `fail_with` to make the next calls fail with that API error.
/// `echo_approver` controls whether approve responses carry the approver.
pub struct FakeSkillsApi {
    pub remote: Mutex<Vec<BuilderSkill>>,
    pub calls: Mutex<Vec<Call>>,
    pub fail_with: Mutex<Option<(u16, String)>>,
    pub echo_approver: bool,
}

impl FakeSkillsApi {
    pub fn new(remote: Vec<BuilderSkill>) -> Self {
        Self {
            remote: Mutex::new(remote),
            calls: Mutex::new(Vec::new()),
            fail_with: Mutex::new(None),
            echo_approver: true,
        }
    }

    pub fn seeded() -> Self {
        Self::new(mock_skills())
    }

    pub fn fail(&self, status: u16, message: &str) {
        *self.fail_with.lock().unwrap() = Some((status, message.to_string()));
    }

    pub fn succeed(&self) {
        *self.fail_with.lock().unwrap() = None;
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) -> FaResult<()> {
        self.calls.lock().unwrap().push(call);
        match self.fail_with.lock().unwrap().clone() {
            Some((status, message)) => Err(FaError::Api { status, message }),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl SkillsApi for FakeSkillsApi {
    async fn fetch_skills(&self, builder_type: Option<BuilderType>) -> FaResult<Vec<BuilderSkill>> {
        self.record(Call::Fetch(builder_type))?;
        Ok(self
            .remote
            .lock()
            .unwrap()
            .iter()
            .filter(|s| builder_type.map_or(true, |t| s.builder_type == t))
            .cloned()
            .collect())
    }

    async fn create(&self, skill: &NewSkill) -> FaResult<BuilderSkill> {
        self.record(Call::Create(skill.skill_name.clone()))?;
        let mut remote = self.remote.lock().unwrap();
        let record = BuilderSkill {
            id: format!("srv-{}", remote.len() + 1),
            skill_name: skill.skill_name.clone(),
            builder_type: skill.builder_type,
            created_at: Some(Utc::now()),
            created_by: None,
            approved_by: None,
            approved_at: None,
            unsynced: false,
        };
        remote.push(record.clone());
        Ok(record)
    }

    async fn approve(&self, id: &str, approved_by: &str) -> FaResult<BuilderSkill> {
        self.record(Call::Approve {
            id: id.to_string(),
            by: approved_by.to_string(),
        })?;
        let mut remote = self.remote.lock().unwrap();
        let skill = remote
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| FaError::Api {
                status: 404,
                message: "Skill not found".into(),
            })?;
        if self.echo_approver {
            skill.mark_approved(approved_by, Utc::now());
        } else {
            skill.approved_at = Some(Utc::now());
        }
        Ok(skill.clone())
    }

    async fn remove(&self, id: &str) -> FaResult<()> {
        self.record(Call::Remove(id.to_string()))?;
        self.remote.lock().unwrap().retain(|s| s.id != id);
        Ok(())
    }
}

/// A store over a fake backend, plus the fake for assertions.
pub fn create_test_store(api: FakeSkillsApi) -> (SkillStore, Arc<FakeSkillsApi>) {
    let api = Arc::new(api);
    let store = SkillStore::new(api.clone(), create_test_event_bus());
    (store, api)
}

/// Create a default test configuration.
pub fn create_test_config() -> AppConfig {
    AppConfig::default()
}

/// Create a ConfigHandle wrapping a default config.
pub fn create_test_config_handle() -> ConfigHandle {
    ConfigHandle::new(create_test_config())
}

/// Create an EventBus with a small buffer suitable for tests.
pub fn create_test_event_bus() -> EventBus {
    EventBus::new(64)
}

/// A signed-in session for the given fixture user.
pub fn session_for(user: UserProfile) -> Session {
    Session::new("test-token", Some(user))
}

pub fn admin_session() -> Session {
    session_for(mock_users().admin01)
}
