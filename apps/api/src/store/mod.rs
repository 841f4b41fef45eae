//! Store seam: the only path from request handling to persisted data.
//!
//! `PgCareerStore` backs production; `MemoryCareerStore` backs development
//! mode (no `DATABASE_URL`) and tests. Both honour the same contract:
//! plans are only stored for an owner, progress records are unique per
//! `(plan_id, task_id)` with last-write-wins, and deleting a plan deletes its
//! progress records. Writes to a plan row are serialized per plan, and each
//! write touches only the columns it owns.
//!
//! `AppState` holds an `Arc<dyn CareerStore>` built once at startup.

pub mod memory;
pub mod postgres;
pub mod seed;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::analytics::AnalyticsEvent;
use crate::models::catalog::{CareerInsight, LearningResource};
use crate::models::plan::{CareerPlan, PlanSettingsUpdate, ProgressRecord};
use crate::progress::tracker::PlanProgress;

pub use memory::MemoryCareerStore;
pub use postgres::PgCareerStore;

#[async_trait]
pub trait CareerStore: Send + Sync {
    async fn career_insights(&self) -> Result<Vec<CareerInsight>, AppError>;

    async fn learning_resources(&self) -> Result<Vec<LearningResource>, AppError>;

    /// Persists a new plan. The plan must carry an owner.
    async fn insert_plan(&self, plan: &CareerPlan) -> Result<(), AppError>;

    async fn get_plan(&self, plan_id: Uuid) -> Result<Option<CareerPlan>, AppError>;

    /// All plans owned by `user_id`, newest first.
    async fn list_plans(&self, user_id: Uuid) -> Result<Vec<CareerPlan>, AppError>;

    /// Applies favorite/status edits against the plan's current row.
    /// Writes `is_favorite`, `status` and `updated_at` only. `None` if the plan is gone.
    async fn save_settings(
        &self,
        plan_id: Uuid,
        update: &PlanSettingsUpdate,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<CareerPlan>, AppError>;

    /// Returns `false` if no such plan existed.
    async fn delete_plan(&self, plan_id: Uuid) -> Result<bool, AppError>;

    /// Upserts one progress record, then recomputes the plan's progress and
    /// status from its full record set in the same atomic step.
    /// Writes `progress_percentage`, `status` and `updated_at` only. `None` if the plan is gone.
    async fn record_progress(
        &self,
        record: &ProgressRecord,
    ) -> Result<Option<PlanProgress>, AppError>;

    async fn progress_for_plan(&self, plan_id: Uuid) -> Result<Vec<ProgressRecord>, AppError>;

    async fn record_event(&self, event: &AnalyticsEvent) -> Result<(), AppError>;
}

fn ownerless_plan(plan: &CareerPlan) -> AppError {
    AppError::Internal(anyhow::anyhow!(
        "Refusing to persist plan {} without an owner",
        plan.id
    ))
}
