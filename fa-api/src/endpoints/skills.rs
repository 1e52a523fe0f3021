//! Builder skill endpoints.
//!
//! List endpoints answer with bare arrays; create and approve answer with
//! the stored record.

use serde::Serialize;
use tracing::info;

use fa_core::error::FaResult;
use fa_models::{BuilderSkill, BuilderType, NewSkill};

use crate::client::ApiClient;

const SKILLS: &str = "builder-skills";

/// Body for approving a skill.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApproveSkillParams<'a> {
    pub approved_by: &'a str,
}

impl ApiClient {
    /// List every skill.
    pub async fn list_skills(&self) -> FaResult<Vec<BuilderSkill>> {
        self.get_json(&[SKILLS], &[]).await
    }

    /// List skills for one builder category.
    pub async fn list_skills_by_type(&self, builder_type: BuilderType) -> FaResult<Vec<BuilderSkill>> {
        self.get_json(&[SKILLS, "type", builder_type.as_str()], &[]).await
    }

    /// Create a skill. The backend assigns the identifier.
    pub async fn create_skill(&self, skill: &NewSkill) -> FaResult<BuilderSkill> {
        skill.validate()?;
        let created: BuilderSkill = self.post_json(&[SKILLS], skill).await?;
        info!("created skill {} ({})", created.id, created.skill_name);
        Ok(created)
    }

    /// Record an approver on a skill.
    pub async fn approve_skill(&self, id: &str, approved_by: &str) -> FaResult<BuilderSkill> {
        let approved: BuilderSkill = self
            .patch_json(&[SKILLS, id, "approve"], &ApproveSkillParams { approved_by })
            .await?;
        info!("approved skill {id} by {approved_by}");
        Ok(approved)
    }

    /// Delete a skill by identifier.
    pub async fn delete_skill(&self, id: &str) -> FaResult<()> {
        self.delete(&[SKILLS, id]).await?;
        info!("deleted skill {id}");
        Ok(())
    }
}
