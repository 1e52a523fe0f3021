//! Builder skill list state.
//!
//! `SkillStore` keeps an ordered, in-memory copy of the skill list and
//! applies each mutation locally only after the backend accepted it. The
//! lock is never held across a request, so overlapping calls land in
//! completion order.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use fa_api::ApiClient;
use fa_core::error::{FaError, FaResult};
use fa_models::{BuilderSkill, BuilderType, NewSkill, SkillUpdate};

use crate::event_bus::{AppEvent, EventBus};

/// Remote operations the skill store depends on.
#[async_trait]
pub trait SkillsApi: Send + Sync {
    /// All skills, or only those of one builder type.
    async fn fetch_skills(&self, builder_type: Option<BuilderType>) -> FaResult<Vec<BuilderSkill>>;
    async fn create(&self, skill: &NewSkill) -> FaResult<BuilderSkill>;
    async fn approve(&self, id: &str, approved_by: &str) -> FaResult<BuilderSkill>;
    async fn remove(&self, id: &str) -> FaResult<()>;
}

#[async_trait]
impl SkillsApi for ApiClient {
    async fn fetch_skills(&self, builder_type: Option<BuilderType>) -> FaResult<Vec<BuilderSkill>> {
        match builder_type {
            Some(t) => self.list_skills_by_type(t).await,
            None => self.list_skills().await,
        }
    }

    async fn create(&self, skill: &NewSkill) -> FaResult<BuilderSkill> {
        self.create_skill(skill).await
    }

    async fn approve(&self, id: &str, approved_by: &str) -> FaResult<BuilderSkill> {
        self.approve_skill(id, approved_by).await
    }

    async fn remove(&self, id: &str) -> FaResult<()> {
        self.delete_skill(id).await
    }
}

/// Load phase of the list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Ready,
    Error(String),
}

/// Snapshot of the store.
#[derive(Debug, Clone, Default)]
pub struct SkillListState {
    pub skills: Vec<BuilderSkill>,
    pub load_state: LoadState,
    /// Message of the most recent failed operation of any kind.
    pub error: Option<String>,
}

impl SkillListState {
    pub fn is_loading(&self) -> bool {
        self.load_state == LoadState::Loading
    }
}

/// In-memory skill list mediating between the UI and the backend.
#[derive(Clone)]
pub struct SkillStore {
    api: Arc<dyn SkillsApi>,
    state: Arc<RwLock<SkillListState>>,
    events: EventBus,
}

impl SkillStore {
    pub fn new(api: Arc<dyn SkillsApi>, events: EventBus) -> Self {
        Self {
            api,
            state: Arc::new(RwLock::new(SkillListState::default())),
            events,
        }
    }

    /// A copy of the current state.
    pub async fn snapshot(&self) -> SkillListState {
        self.state.read().await.clone()
    }

    /// A copy of the current list.
    pub async fn skills(&self) -> Vec<BuilderSkill> {
        self.state.read().await.skills.clone()
    }

    pub async fn get(&self, id: &str) -> Option<BuilderSkill> {
        self.state.read().await.skills.iter().find(|s| s.id == id).cloned()
    }

    pub async fn load_state(&self) -> LoadState {
        self.state.read().await.load_state.clone()
    }

    pub async fn error(&self) -> Option<String> {
        self.state.read().await.error.clone()
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    pub async fn clear_error(&self) {
        self.state.write().await.error = None;
    }

    /// Replace the list with the backend's.
    ///
    /// Local-only edits are discarded. On failure the previous list is
    /// kept and the error message recorded.
    pub async fn fetch(&self, builder_type: Option<BuilderType>) -> FaResult<()> {
        {
            let mut state = self.state.write().await;
            state.load_state = LoadState::Loading;
        }

        let result = self.api.fetch_skills(builder_type).await;

        let mut state = self.state.write().await;
        match result {
            Ok(skills) => {
                debug!("fetched {} skill(s)", skills.len());
                let count = skills.len();
                state.skills = skills;
                state.load_state = LoadState::Ready;
                state.error = None;
                drop(state);
                self.events.emit(AppEvent::SkillsLoaded { count });
                Ok(())
            }
            Err(e) => {
                let message = e.user_message();
                state.load_state = LoadState::Error(message.clone());
                state.error = Some(message.clone());
                drop(state);
                self.events.emit(AppEvent::SkillsError { message });
                Err(e)
            }
        }
    }

    /// Create a skill and append the backend's record.
    pub async fn add(&self, skill: NewSkill) -> FaResult<BuilderSkill> {
        let created = match self.api.create(&skill).await {
            Ok(created) => created,
            Err(e) => return Err(self.record_error(e).await),
        };

        self.state.write().await.skills.push(created.clone());
        self.events.emit(AppEvent::SkillAdded {
            skill: created.clone(),
        });
        Ok(created)
    }

    /// Approve and/or edit a skill.
    ///
    /// When `approved_by` is set the approve endpoint is called first and a
    /// failure aborts the update. Name and type edits have no backend
    /// endpoint: they are applied to the local record only and flag it
    /// `unsynced` until the next fetch replaces it.
    ///
    /// Returns the local record after the update. If the skill is not in the
    /// local list, an approval still succeeds and returns the backend's
    /// record; a pure edit fails with `NotFound`.
    pub async fn update(&self, id: &str, update: SkillUpdate) -> FaResult<BuilderSkill> {
        let approved = match update.approved_by.as_deref() {
            Some(approver) => match self.api.approve(id, approver).await {
                Ok(mut record) => {
                    if record.approved_by.as_deref() != Some(approver) {
                        let at = record.approved_at.unwrap_or_else(Utc::now);
                        record.mark_approved(approver, at);
                    }
                    Some(record)
                }
                Err(e) => return Err(self.record_error(e).await),
            },
            None => None,
        };

        let mut state = self.state.write().await;
        let Some(pos) = state.skills.iter().position(|s| s.id == id) else {
            drop(state);
            return match approved {
                Some(record) => Ok(record),
                None => Err(self.record_error(FaError::NotFound(format!("skill {id}"))).await),
            };
        };
        let local = &mut state.skills[pos];

        if let Some(record) = approved {
            local.approved_by = record.approved_by;
            local.approved_at = record.approved_at;
        }

        if update.has_field_edits() {
            warn!("skill {id}: name/type edits are not persisted by the backend");
            if let Some(name) = update.skill_name {
                local.skill_name = name;
            }
            if let Some(builder_type) = update.builder_type {
                local.builder_type = builder_type;
            }
            local.unsynced = true;
        }

        let updated = local.clone();
        drop(state);
        info!("updated skill {id}");
        self.events.emit(AppEvent::SkillUpdated {
            skill: updated.clone(),
        });
        Ok(updated)
    }

    /// Delete a skill on the backend, then drop it locally.
    ///
    /// Returns whether a local record was removed; an id missing locally
    /// is not an error.
    pub async fn delete(&self, id: &str) -> FaResult<bool> {
        if let Err(e) = self.api.remove(id).await {
            return Err(self.record_error(e).await);
        }

        let removed = {
            let mut state = self.state.write().await;
            let before = state.skills.len();
            state.skills.retain(|s| s.id != id);
            state.skills.len() != before
        };
        self.events.emit(AppEvent::SkillDeleted { id: id.to_string() });
        Ok(removed)
    }

    /// Store the message for display and hand the error back.
    async fn record_error(&self, e: FaError) -> FaError {
        let message = e.user_message();
        warn!("skill operation failed: {message}");
        self.state.write().await.error = Some(message.clone());
        self.events.emit(AppEvent::SkillsError { message });
        e
    }
}

/// Backend stand-in holding skills in memory.
///
/// Used for `--mock` runs; ids are assigned sequentially.
pub struct InMemorySkillsApi {
    skills: Mutex<Vec<BuilderSkill>>,
    next_id: Mutex<u32>,
}

impl InMemorySkillsApi {
    pub fn new(seed: Vec<BuilderSkill>) -> Self {
        let next_id = seed.len() as u32 + 1;
        Self {
            skills: Mutex::new(seed),
            next_id: Mutex::new(next_id),
        }
    }

    fn lock_skills(&self) -> FaResult<std::sync::MutexGuard<'_, Vec<BuilderSkill>>> {
        self.skills
            .lock()
            .map_err(|_| FaError::Internal("skill fixture lock poisoned".into()))
    }

    fn not_found(id: &str) -> FaError {
        FaError::Api {
            status: 404,
            message: format!("Skill {id} not found"),
        }
    }
}

#[async_trait]
impl SkillsApi for InMemorySkillsApi {
    async fn fetch_skills(&self, builder_type: Option<BuilderType>) -> FaResult<Vec<BuilderSkill>> {
        let skills = self.lock_skills()?;
        Ok(skills
            .iter()
            .filter(|s| builder_type.map_or(true, |t| s.builder_type == t))
            .cloned()
            .collect())
    }

    async fn create(&self, skill: &NewSkill) -> FaResult<BuilderSkill> {
        skill.validate()?;
        let id = {
            let mut next = self
                .next_id
                .lock()
                .map_err(|_| FaError::Internal("skill id lock poisoned".into()))?;
            let id = format!("skill-{:03}", *next);
            *next += 1;
            id
        };
        let record = BuilderSkill {
            id,
            skill_name: skill.skill_name.trim().to_string(),
            builder_type: skill.builder_type,
            created_at: Some(Utc::now()),
            created_by: None,
            approved_by: None,
            approved_at: None,
            unsynced: false,
        };
        self.lock_skills()?.push(record.clone());
        Ok(record)
    }

    async fn approve(&self, id: &str, approved_by: &str) -> FaResult<BuilderSkill> {
        let mut skills = self.lock_skills()?;
        let skill = skills
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| Self::not_found(id))?;
        skill.mark_approved(approved_by, Utc::now());
        Ok(skill.clone())
    }

    async fn remove(&self, id: &str) -> FaResult<()> {
        let mut skills = self.lock_skills()?;
        let before = skills.len();
        skills.retain(|s| s.id != id);
        if skills.len() == before {
            return Err(Self::not_found(id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fa_models::fixtures::mock_skills;

    fn store() -> SkillStore {
        SkillStore::new(Arc::new(InMemorySkillsApi::new(mock_skills())), EventBus::new(16))
    }

    #[tokio::test]
    async fn test_initial_state_idle() {
        let s = store();
        let snap = s.snapshot().await;
        assert_eq!(snap.load_state, LoadState::Idle);
        assert!(snap.skills.is_empty());
        assert!(!snap.is_loading());
    }

    #[tokio::test]
    async fn test_fetch_filtered_by_type() {
        let s = store();
        s.fetch(Some(BuilderType::Fundi)).await.unwrap();
        let skills = s.skills().await;
        assert_eq!(skills.len(), 2);
        assert!(skills.iter().all(|sk| sk.builder_type == BuilderType::Fundi));
        assert_eq!(s.load_state().await, LoadState::Ready);
    }

    #[tokio::test]
    async fn test_in_memory_ids_continue_after_seed() {
        let api = InMemorySkillsApi::new(mock_skills());
        let created = api
            .create(&NewSkill::new("Welding", BuilderType::Fundi))
            .await
            .unwrap();
        assert_eq!(created.id, "skill-007");
    }

    #[tokio::test]
    async fn test_in_memory_remove_missing_is_404() {
        let api = InMemorySkillsApi::new(Vec::new());
        let err = api.remove("nope").await.unwrap_err();
        assert_eq!(err.status(), Some(404));
    }
}
