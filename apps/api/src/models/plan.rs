//! Career plan aggregate and the per-task progress records attached to it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::profile::UserProfile;

/// One Matcher output row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CareerRecommendation {
    pub title: String,
    pub description: String,
    pub match_percentage: u8, // always within the matcher clamp
    pub average_salary: String,
    pub growth_rate: String,
    pub required_skills: Vec<String>,
}

/// One Skill Aggregator output row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SkillRecommendation {
    pub skill: String,
    pub importance: String,
    pub time_to_learn: String,
    pub resources: Vec<String>,
}

/// One week of the four-week roadmap.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LearningWeek {
    pub week: u8,
    pub focus: String,
    pub tasks: Vec<String>,
    pub resources: Vec<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PlanStatus {
    Active,
    Completed,
    Archived,
}

impl PlanStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlanStatus::Active => "active",
            PlanStatus::Completed => "completed",
            PlanStatus::Archived => "archived",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "active" => Some(PlanStatus::Active),
            "completed" => Some(PlanStatus::Completed),
            "archived" => Some(PlanStatus::Archived),
            _ => None,
        }
    }
}

/// The persisted result of one profile submission.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CareerPlan {
    pub id: Uuid,
    /// `None` for anonymous callers; such plans are never persisted.
    pub user_id: Option<Uuid>,
    pub title: String,
    pub profile: UserProfile,
    pub career_recommendations: Vec<CareerRecommendation>,
    pub skill_recommendations: Vec<SkillRecommendation>,
    pub learning_plan: Vec<LearningWeek>,
    pub status: PlanStatus,
    pub progress_percentage: u8,
    pub is_favorite: bool,
    pub tags: Vec<String>,
    #[serde(rename = "generatedAt")]
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CareerPlan {
    /// Total number of checklist tasks across every week of the plan.
    pub fn total_tasks(&self) -> usize {
        self.learning_plan.iter().map(|w| w.tasks.len()).sum()
    }
}

/// Dashboard edits to a plan. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanSettingsUpdate {
    pub is_favorite: Option<bool>,
    pub status: Option<PlanStatus>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TaskType {
    Setup,
    Learning,
    Practice,
    Project,
    Networking,
    Planning,
}

impl TaskType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskType::Setup => "setup",
            TaskType::Learning => "learning",
            TaskType::Practice => "practice",
            TaskType::Project => "project",
            TaskType::Networking => "networking",
            TaskType::Planning => "planning",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "setup" => Some(TaskType::Setup),
            "learning" => Some(TaskType::Learning),
            "practice" => Some(TaskType::Practice),
            "project" => Some(TaskType::Project),
            "networking" => Some(TaskType::Networking),
            "planning" => Some(TaskType::Planning),
            _ => None,
        }
    }
}

/// Completion flag for one task of one plan. Unique per `(plan_id, task_id)`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProgressRecord {
    pub user_id: Uuid,
    pub plan_id: Uuid,
    pub task_id: String,
    pub task_type: TaskType,
    pub completed: bool,
    /// Set iff `completed`.
    pub completed_at: Option<DateTime<Utc>>,
    pub notes: Option<String>,
    pub updated_at: DateTime<Utc>,
}

// ────────────────────────────────────────────────────────────────────────────
// Database rows
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, FromRow)]
pub struct CareerPlanRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub profile: Value,
    pub career_recommendations: Value,
    pub skill_recommendations: Value,
    pub learning_plan: Value,
    pub status: String,
    pub progress_percentage: i16,
    pub is_favorite: bool,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<CareerPlanRow> for CareerPlan {
    type Error = AppError;

    fn try_from(row: CareerPlanRow) -> Result<Self, Self::Error> {
        let status = PlanStatus::parse(&row.status).ok_or_else(|| {
            AppError::Internal(anyhow::anyhow!(
                "Unknown plan status '{}' on plan {}",
                row.status,
                row.id
            ))
        })?;
        Ok(CareerPlan {
            id: row.id,
            user_id: Some(row.user_id),
            title: row.title,
            profile: from_json(row.profile, "profile", row.id)?,
            career_recommendations: from_json(
                row.career_recommendations,
                "career_recommendations",
                row.id,
            )?,
            skill_recommendations: from_json(
                row.skill_recommendations,
                "skill_recommendations",
                row.id,
            )?,
            learning_plan: from_json(row.learning_plan, "learning_plan", row.id)?,
            status,
            progress_percentage: row.progress_percentage.clamp(0, 100) as u8,
            is_favorite: row.is_favorite,
            tags: row.tags,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn from_json<T: serde::de::DeserializeOwned>(
    value: Value,
    column: &str,
    plan_id: Uuid,
) -> Result<T, AppError> {
    serde_json::from_value(value).map_err(|e| {
        AppError::Internal(anyhow::anyhow!(
            "Failed to decode {column} of plan {plan_id}: {e}"
        ))
    })
}

#[derive(Debug, Clone, FromRow)]
pub struct ProgressRecordRow {
    pub user_id: Uuid,
    pub plan_id: Uuid,
    pub task_id: String,
    pub task_type: String,
    pub completed: bool,
    pub completed_at: Option<DateTime<Utc>>,
    pub notes: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<ProgressRecordRow> for ProgressRecord {
    type Error = AppError;

    fn try_from(row: ProgressRecordRow) -> Result<Self, Self::Error> {
        let task_type = TaskType::parse(&row.task_type).ok_or_else(|| {
            AppError::Internal(anyhow::anyhow!(
                "Unknown task type '{}' on plan {}",
                row.task_type,
                row.plan_id
            ))
        })?;
        Ok(ProgressRecord {
            user_id: row.user_id,
            plan_id: row.plan_id,
            task_id: row.task_id,
            task_type,
            completed: row.completed,
            completed_at: row.completed_at,
            notes: row.notes,
            updated_at: row.updated_at,
        })
    }
}
