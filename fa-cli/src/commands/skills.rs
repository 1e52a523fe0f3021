//! Builder skill commands.

use std::sync::Arc;

use clap::Subcommand;
use comfy_table::{Table, presets::UTF8_FULL, modifiers::UTF8_ROUND_CORNERS, ContentArrangement};
use console::style;
use dialoguer::Confirm;

use fa_core::config::ConfigHandle;
use fa_core::error::FaResult;
use fa_models::fixtures::mock_skills;
use fa_models::{BuilderSkill, BuilderType, NewSkill, SkillUpdate};
use fa_services::event_bus::EventBus;
use fa_services::skills::{InMemorySkillsApi, SkillStore, SkillsApi};
use crate::OutputFormat;

#[derive(Subcommand)]
pub enum SkillsAction {
    /// List skills, optionally for one builder type.
    List {
        /// Builder type (fundi, professional, contractor, hardware).
        #[arg(short = 't', long = "type")]
        builder_type: Option<BuilderType>,
    },
    /// Create a skill.
    Add {
        /// Skill name.
        name: String,
        /// Builder type the skill belongs to.
        #[arg(short = 't', long = "type")]
        builder_type: BuilderType,
    },
    /// Approve a skill as the signed-in admin.
    Approve {
        /// Skill id.
        id: String,
    },
    /// Edit a skill's name or type (local view only) and optionally approve it.
    Edit {
        /// Skill id.
        id: String,
        #[arg(short, long)]
        name: Option<String>,
        #[arg(short = 't', long = "type")]
        builder_type: Option<BuilderType>,
        /// Also approve the skill.
        #[arg(long)]
        approve: bool,
    },
    /// Delete a skill.
    Delete {
        /// Skill id.
        id: String,
        /// Skip the confirmation prompt.
        #[arg(short, long)]
        yes: bool,
    },
}

pub async fn run(config: ConfigHandle, action: SkillsAction, format: OutputFormat, mock: bool) -> FaResult<()> {
    let session = super::require_admin_or_mock(&config, mock).await?;

    let api: Arc<dyn SkillsApi> = if mock {
        Arc::new(InMemorySkillsApi::new(mock_skills()))
    } else {
        Arc::new(super::create_api_client(&config).await?)
    };
    let store = SkillStore::new(api, EventBus::default());

    match action {
        SkillsAction::List { builder_type } => {
            store.fetch(builder_type).await?;
            let skills = store.skills().await;
            match format {
                OutputFormat::Json => super::print_json(&skills),
                OutputFormat::Text => print_skills_table(&skills),
            }
        }
        SkillsAction::Add { name, builder_type } => {
            let created = store.add(NewSkill::new(name, builder_type)).await?;
            print_result("Created", &created, format);
        }
        SkillsAction::Approve { id } => {
            let approver = super::actor_id(&session);
            store.fetch(None).await?;
            let updated = store.update(&id, SkillUpdate::approve(approver)).await?;
            print_result("Approved", &updated, format);
        }
        SkillsAction::Edit { id, name, builder_type, approve } => {
            let update = SkillUpdate {
                skill_name: name,
                builder_type,
                approved_by: approve.then(|| super::actor_id(&session)),
            };
            store.fetch(None).await?;
            let updated = store.update(&id, update).await?;
            print_result("Updated", &updated, format);
            if updated.unsynced && format == OutputFormat::Text {
                println!(
                    "  {} Name and type edits are not saved by the server and will be lost on the next list.",
                    style("NOTE").yellow().bold()
                );
            }
        }
        SkillsAction::Delete { id, yes } => {
            if !yes {
                let confirmed = Confirm::new()
                    .with_prompt(format!("Delete skill {id}?"))
                    .default(false)
                    .interact()
                    .map_err(super::prompt_error)?;
                if !confirmed {
                    println!("  Cancelled.");
                    return Ok(());
                }
            }
            store.delete(&id).await?;
            match format {
                OutputFormat::Json => super::print_json(&serde_json::json!({ "deleted": id })),
                OutputFormat::Text => println!("  {} Deleted skill {id}.", style("OK").green().bold()),
            }
        }
    }

    Ok(())
}

fn print_result(verb: &str, skill: &BuilderSkill, format: OutputFormat) {
    match format {
        OutputFormat::Json => super::print_json(skill),
        OutputFormat::Text => println!(
            "  {} {verb} {} ({}, {}) [{}]",
            style("OK").green().bold(),
            style(&skill.skill_name).bold(),
            skill.builder_type.label(),
            skill.status_label(),
            skill.id
        ),
    }
}

fn print_skills_table(skills: &[BuilderSkill]) {
    if skills.is_empty() {
        println!("No skills found.");
        return;
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec!["ID", "Skill", "Builder type", "Status", "Approved by", "Created"]);

    for s in skills {
        let status = if s.is_approved() {
            style(s.status_label()).green().to_string()
        } else {
            style(s.status_label()).yellow().to_string()
        };
        table.add_row(vec![
            s.id.clone(),
            s.skill_name.clone(),
            s.builder_type.label().to_string(),
            status,
            s.approved_by.clone().unwrap_or_else(|| "-".to_string()),
            super::format_time(s.created_at),
        ]);
    }

    println!("{table}");
    println!("\n{} skill(s)", skills.len());
}
