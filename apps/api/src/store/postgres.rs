use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::analytics::AnalyticsEvent;
use crate::models::catalog::{
    CareerInsight, CareerInsightRow, LearningResource, LearningResourceRow,
};
use crate::models::plan::{
    CareerPlan, CareerPlanRow, PlanSettingsUpdate, ProgressRecord, ProgressRecordRow,
};
use crate::progress::tracker::{apply_settings, PlanProgress};
use crate::store::{ownerless_plan, CareerStore};

/// Postgres-backed store. Schema lives in `migrations/`.
#[derive(Clone)]
pub struct PgCareerStore {
    pool: PgPool,
}

impl PgCareerStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn convert_all<R, T>(rows: Vec<R>) -> Result<Vec<T>, AppError>
where
    T: TryFrom<R, Error = AppError>,
{
    rows.into_iter().map(T::try_from).collect()
}

/// Loads a plan and holds its row lock until the surrounding transaction ends.
async fn lock_plan(
    conn: &mut PgConnection,
    plan_id: Uuid,
) -> Result<Option<CareerPlan>, AppError> {
    sqlx::query_as::<_, CareerPlanRow>("SELECT * FROM career_plans WHERE id = $1 FOR UPDATE")
        .bind(plan_id)
        .fetch_optional(conn)
        .await?
        .map(CareerPlan::try_from)
        .transpose()
}

async fn fetch_progress(
    conn: &mut PgConnection,
    plan_id: Uuid,
) -> Result<Vec<ProgressRecord>, AppError> {
    let rows = sqlx::query_as::<_, ProgressRecordRow>(
        r#"
        SELECT user_id, plan_id, task_id, task_type, completed, completed_at, notes, updated_at
        FROM progress_records
        WHERE plan_id = $1
        ORDER BY task_id
        "#,
    )
    .bind(plan_id)
    .fetch_all(conn)
    .await?;
    convert_all(rows)
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<serde_json::Value, AppError> {
    serde_json::to_value(value)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to serialize plan column: {e}")))
}

#[async_trait]
impl CareerStore for PgCareerStore {
    async fn career_insights(&self) -> Result<Vec<CareerInsight>, AppError> {
        let rows = sqlx::query_as::<_, CareerInsightRow>(
            r#"
            SELECT id, title, industry, salary_min, salary_max, growth_rate,
                   demand_level, required_skills
            FROM career_insights
            ORDER BY created_at, id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        convert_all(rows)
    }

    async fn learning_resources(&self) -> Result<Vec<LearningResource>, AppError> {
        let rows = sqlx::query_as::<_, LearningResourceRow>(
            r#"
            SELECT id, title, description, url, resource_type, provider, skill_tags,
                   difficulty, duration_hours, price_type, rating, is_featured
            FROM learning_resources
            ORDER BY created_at, id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        convert_all(rows)
    }

    async fn insert_plan(&self, plan: &CareerPlan) -> Result<(), AppError> {
        let user_id = plan.user_id.ok_or_else(|| ownerless_plan(plan))?;

        sqlx::query(
            r#"
            INSERT INTO career_plans
                (id, user_id, title, profile, career_recommendations, skill_recommendations,
                 learning_plan, status, progress_percentage, is_favorite, tags,
                 created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            "#,
        )
        .bind(plan.id)
        .bind(user_id)
        .bind(&plan.title)
        .bind(to_json(&plan.profile)?)
        .bind(to_json(&plan.career_recommendations)?)
        .bind(to_json(&plan.skill_recommendations)?)
        .bind(to_json(&plan.learning_plan)?)
        .bind(plan.status.as_str())
        .bind(plan.progress_percentage as i16)
        .bind(plan.is_favorite)
        .bind(&plan.tags)
        .bind(plan.created_at)
        .bind(plan.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn get_plan(&self, plan_id: Uuid) -> Result<Option<CareerPlan>, AppError> {
        sqlx::query_as::<_, CareerPlanRow>("SELECT * FROM career_plans WHERE id = $1")
            .bind(plan_id)
            .fetch_optional(&self.pool)
            .await?
            .map(CareerPlan::try_from)
            .transpose()
    }

    async fn list_plans(&self, user_id: Uuid) -> Result<Vec<CareerPlan>, AppError> {
        let rows = sqlx::query_as::<_, CareerPlanRow>(
            "SELECT * FROM career_plans WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        convert_all(rows)
    }

    async fn save_settings(
        &self,
        plan_id: Uuid,
        update: &PlanSettingsUpdate,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<CareerPlan>, AppError> {
        let mut tx = self.pool.begin().await?;
        let Some(mut plan) = lock_plan(&mut tx, plan_id).await? else {
            return Ok(None);
        };

        apply_settings(&mut plan, update)?;
        plan.updated_at = updated_at;

        sqlx::query(
            "UPDATE career_plans SET is_favorite = $2, status = $3, updated_at = $4 WHERE id = $1",
        )
        .bind(plan_id)
        .bind(plan.is_favorite)
        .bind(plan.status.as_str())
        .bind(plan.updated_at)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(Some(plan))
    }

    async fn delete_plan(&self, plan_id: Uuid) -> Result<bool, AppError> {
        // progress_records rows go with it (ON DELETE CASCADE)
        let result = sqlx::query("DELETE FROM career_plans WHERE id = $1")
            .bind(plan_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn record_progress(
        &self,
        record: &ProgressRecord,
    ) -> Result<Option<PlanProgress>, AppError> {
        let mut tx = self.pool.begin().await?;
        let Some(plan) = lock_plan(&mut tx, record.plan_id).await? else {
            return Ok(None);
        };

        sqlx::query(
            r#"
            INSERT INTO progress_records
                (user_id, plan_id, task_id, task_type, completed, completed_at, notes, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (plan_id, task_id) DO UPDATE
            SET user_id = EXCLUDED.user_id,
                task_type = EXCLUDED.task_type,
                completed = EXCLUDED.completed,
                completed_at = EXCLUDED.completed_at,
                notes = EXCLUDED.notes,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(record.user_id)
        .bind(record.plan_id)
        .bind(&record.task_id)
        .bind(record.task_type.as_str())
        .bind(record.completed)
        .bind(record.completed_at)
        .bind(&record.notes)
        .bind(record.updated_at)
        .execute(&mut *tx)
        .await?;

        let records = fetch_progress(&mut tx, record.plan_id).await?;
        let outcome = PlanProgress::recompute(&plan, &records);
        if outcome.differs_from(&plan) {
            sqlx::query(
                r#"
                UPDATE career_plans
                SET progress_percentage = $2, status = $3, updated_at = $4
                WHERE id = $1
                "#,
            )
            .bind(record.plan_id)
            .bind(outcome.progress_percentage as i16)
            .bind(outcome.status.as_str())
            .bind(record.updated_at)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(Some(outcome))
    }

    async fn progress_for_plan(&self, plan_id: Uuid) -> Result<Vec<ProgressRecord>, AppError> {
        let mut conn = self.pool.acquire().await?;
        fetch_progress(&mut conn, plan_id).await
    }

    async fn record_event(&self, event: &AnalyticsEvent) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO analytics_events (event_type, event_data, user_id, created_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(&event.event_type)
        .bind(&event.event_data)
        .bind(event.user_id)
        .bind(event.timestamp)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
