//! Owner-scoped plan operations used by the dashboard handlers.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::plan::{
    CareerPlan, PlanSettingsUpdate, PlanStatus, ProgressRecord, TaskType,
};
use crate::planning::roadmap::default_task_type;
use crate::progress::tracker::TaskId;
use crate::store::CareerStore;

const MAX_NOTES_CHARS: usize = 1000;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskProgressUpdate {
    pub completed: bool,
    /// Defaults to the type implied by the task's template slot.
    pub task_type: Option<TaskType>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProgressSummary {
    pub plan_id: Uuid,
    pub task_id: String,
    pub completed: bool,
    pub progress_percentage: u8,
    pub status: PlanStatus,
}

/// Loads a plan owned by `user_id`. Plans of other users are reported as missing.
pub async fn load_owned_plan(
    store: &dyn CareerStore,
    user_id: Uuid,
    plan_id: Uuid,
) -> Result<CareerPlan, AppError> {
    store
        .get_plan(plan_id)
        .await?
        .filter(|plan| plan.user_id == Some(user_id))
        .ok_or_else(|| plan_not_found(plan_id))
}

fn plan_not_found(plan_id: Uuid) -> AppError {
    AppError::NotFound(format!("Career plan {plan_id} not found"))
}

/// Upserts one task's completion flag, then recomputes the plan's progress and status.
pub async fn update_task_progress(
    store: &dyn CareerStore,
    user_id: Uuid,
    plan_id: Uuid,
    raw_task_id: &str,
    update: TaskProgressUpdate,
) -> Result<ProgressSummary, AppError> {
    let plan = load_owned_plan(store, user_id, plan_id).await?;
    let task = TaskId::for_plan(raw_task_id, &plan)?;

    if let Some(notes) = &update.notes {
        if notes.chars().count() > MAX_NOTES_CHARS {
            return Err(AppError::Validation(format!(
                "notes must be at most {MAX_NOTES_CHARS} characters"
            )));
        }
    }

    let now = Utc::now();
    let record = ProgressRecord {
        user_id,
        plan_id,
        task_id: task.to_string(),
        task_type: update
            .task_type
            .unwrap_or_else(|| default_task_type(task.week, task.index)),
        completed: update.completed,
        completed_at: update.completed.then_some(now),
        notes: update.notes,
        updated_at: now,
    };
    let outcome = store
        .record_progress(&record)
        .await?
        .ok_or_else(|| plan_not_found(plan_id))?;

    if outcome.differs_from(&plan) {
        info!(
            "Plan {} progress now {}% ({})",
            plan_id,
            outcome.progress_percentage,
            outcome.status.as_str()
        );
    }

    Ok(ProgressSummary {
        plan_id,
        task_id: record.task_id,
        completed: record.completed,
        progress_percentage: outcome.progress_percentage,
        status: outcome.status,
    })
}

/// Applies favorite/status changes requested from the dashboard.
pub async fn update_plan_settings(
    store: &dyn CareerStore,
    user_id: Uuid,
    plan_id: Uuid,
    update: PlanSettingsUpdate,
) -> Result<CareerPlan, AppError> {
    load_owned_plan(store, user_id, plan_id).await?;
    store
        .save_settings(plan_id, &update, Utc::now())
        .await?
        .ok_or_else(|| plan_not_found(plan_id))
}

pub async fn delete_owned_plan(
    store: &dyn CareerStore,
    user_id: Uuid,
    plan_id: Uuid,
) -> Result<(), AppError> {
    load_owned_plan(store, user_id, plan_id).await?;
    if !store.delete_plan(plan_id).await? {
        return Err(plan_not_found(plan_id));
    }
    info!("Deleted career plan {plan_id} for user {user_id}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    use async_trait::async_trait;
    use chrono::DateTime;
    use tokio::sync::Notify;

    use crate::analytics::spawn_analytics_worker;
    use crate::models::analytics::AnalyticsEvent;
    use crate::models::catalog::{CareerInsight, LearningResource};
    use crate::models::profile::{EducationLevel, UserProfile};
    use crate::planning::matcher::KeywordCareerMatcher;
    use crate::planning::orchestrator::generate_career_plan;
    use crate::progress::tracker::PlanProgress;
    use crate::store::MemoryCareerStore;

    /// Holds the first `get_plan` answer until released, so a second request
    /// can run to completion between a snapshot load and its write.
    struct PausedStore {
        inner: Arc<MemoryCareerStore>,
        armed: AtomicBool,
        paused: Notify,
        resume: Notify,
    }

    impl PausedStore {
        fn new(inner: Arc<MemoryCareerStore>) -> Arc<Self> {
            Arc::new(Self {
                inner,
                armed: AtomicBool::new(true),
                paused: Notify::new(),
                resume: Notify::new(),
            })
        }
    }

    #[async_trait]
    impl CareerStore for PausedStore {
        async fn career_insights(&self) -> Result<Vec<CareerInsight>, AppError> {
            self.inner.career_insights().await
        }
        async fn learning_resources(&self) -> Result<Vec<LearningResource>, AppError> {
            self.inner.learning_resources().await
        }
        async fn insert_plan(&self, plan: &CareerPlan) -> Result<(), AppError> {
            self.inner.insert_plan(plan).await
        }
        async fn get_plan(&self, plan_id: Uuid) -> Result<Option<CareerPlan>, AppError> {
            let plan = self.inner.get_plan(plan_id).await?;
            if self.armed.swap(false, Ordering::SeqCst) {
                self.paused.notify_one();
                self.resume.notified().await;
            }
            Ok(plan)
        }
        async fn list_plans(&self, user_id: Uuid) -> Result<Vec<CareerPlan>, AppError> {
            self.inner.list_plans(user_id).await
        }
        async fn save_settings(
            &self,
            plan_id: Uuid,
            update: &PlanSettingsUpdate,
            updated_at: DateTime<Utc>,
        ) -> Result<Option<CareerPlan>, AppError> {
            self.inner.save_settings(plan_id, update, updated_at).await
        }
        async fn delete_plan(&self, plan_id: Uuid) -> Result<bool, AppError> {
            self.inner.delete_plan(plan_id).await
        }
        async fn record_progress(
            &self,
            record: &ProgressRecord,
        ) -> Result<Option<PlanProgress>, AppError> {
            self.inner.record_progress(record).await
        }
        async fn progress_for_plan(
            &self,
            plan_id: Uuid,
        ) -> Result<Vec<ProgressRecord>, AppError> {
            self.inner.progress_for_plan(plan_id).await
        }
        async fn record_event(&self, event: &AnalyticsEvent) -> Result<(), AppError> {
            self.inner.record_event(event).await
        }
    }

    fn favorite() -> PlanSettingsUpdate {
        PlanSettingsUpdate {
            is_favorite: Some(true),
            status: None,
        }
    }

    async fn setup() -> (Arc<MemoryCareerStore>, Uuid, CareerPlan) {
        let store = Arc::new(MemoryCareerStore::seeded());
        let (analytics, _worker) = spawn_analytics_worker(store.clone(), 16);
        let user = Uuid::new_v4();
        let plan = generate_career_plan(
            store.as_ref(),
            &KeywordCareerMatcher::new("$"),
            &analytics,
            Some(user),
            UserProfile {
                name: "Noor".to_string(),
                education_level: EducationLevel::HighSchool,
                interests: vec!["data".to_string()],
                experience: String::new(),
                goals: String::new(),
            },
        )
        .await
        .unwrap();
        (store, user, plan)
    }

    fn toggle(completed: bool) -> TaskProgressUpdate {
        TaskProgressUpdate {
            completed,
            task_type: None,
            notes: None,
        }
    }

    fn all_task_ids(plan: &CareerPlan) -> Vec<String> {
        plan.learning_plan
            .iter()
            .flat_map(|w| {
                (0..w.tasks.len()).map(move |index| TaskId { week: w.week, index }.to_string())
            })
            .collect()
    }

    #[tokio::test]
    async fn test_completing_last_of_sixteen_tasks_completes_plan() {
        let (store, user, plan) = setup().await;
        let ids = all_task_ids(&plan);
        assert_eq!(ids.len(), 16);

        let (last, rest) = ids.split_last().unwrap();
        for id in rest {
            let summary = update_task_progress(store.as_ref(), user, plan.id, id, toggle(true))
                .await
                .unwrap();
            assert_eq!(summary.status, PlanStatus::Active);
        }
        let before = store.get_plan(plan.id).await.unwrap().unwrap();
        assert_eq!(before.progress_percentage, 94);

        let summary = update_task_progress(store.as_ref(), user, plan.id, last, toggle(true))
            .await
            .unwrap();
        assert_eq!(summary.progress_percentage, 100);
        assert_eq!(summary.status, PlanStatus::Completed);

        let stored = store.get_plan(plan.id).await.unwrap().unwrap();
        assert_eq!(stored.progress_percentage, 100);
        assert_eq!(stored.status, PlanStatus::Completed);

        let reopened = update_task_progress(store.as_ref(), user, plan.id, last, toggle(false))
            .await
            .unwrap();
        assert_eq!(reopened.status, PlanStatus::Active);
    }

    #[tokio::test]
    async fn test_repeated_toggle_overwrites_record() {
        let (store, user, plan) = setup().await;
        for completed in [true, true, false, true] {
            update_task_progress(store.as_ref(), user, plan.id, "w2-t1", toggle(completed))
                .await
                .unwrap();
        }
        let records = store.progress_for_plan(plan.id).await.unwrap();
        assert_eq!(records.len(), 1);
        assert!(records[0].completed);
        assert!(records[0].completed_at.is_some());
        assert_eq!(records[0].task_type, TaskType::Practice);
    }

    #[tokio::test]
    async fn test_uncompleted_record_clears_timestamp() {
        let (store, user, plan) = setup().await;
        update_task_progress(store.as_ref(), user, plan.id, "w1-t0", toggle(true))
            .await
            .unwrap();
        update_task_progress(store.as_ref(), user, plan.id, "w1-t0", toggle(false))
            .await
            .unwrap();
        let records = store.progress_for_plan(plan.id).await.unwrap();
        assert!(records[0].completed_at.is_none());
    }

    #[tokio::test]
    async fn test_other_users_cannot_touch_plan() {
        let (store, _user, plan) = setup().await;
        let stranger = Uuid::new_v4();
        let err = update_task_progress(store.as_ref(), stranger, plan.id, "w1-t0", toggle(true))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        assert!(delete_owned_plan(store.as_ref(), stranger, plan.id)
            .await
            .is_err());
    }

    #[tokio::test]
    async fn test_unknown_task_is_rejected() {
        let (store, user, plan) = setup().await;
        let err = update_task_progress(store.as_ref(), user, plan.id, "w7-t0", toggle(true))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_favorite_and_archive() {
        let (store, user, plan) = setup().await;
        let updated = update_plan_settings(
            store.as_ref(),
            user,
            plan.id,
            PlanSettingsUpdate {
                is_favorite: Some(true),
                status: Some(PlanStatus::Archived),
            },
        )
        .await
        .unwrap();
        assert!(updated.is_favorite);
        assert_eq!(updated.status, PlanStatus::Archived);

        // progress never un-archives
        let summary = update_task_progress(store.as_ref(), user, plan.id, "w1-t0", toggle(true))
            .await
            .unwrap();
        assert_eq!(summary.status, PlanStatus::Archived);

        let restored = update_plan_settings(
            store.as_ref(),
            user,
            plan.id,
            PlanSettingsUpdate {
                is_favorite: None,
                status: Some(PlanStatus::Active),
            },
        )
        .await
        .unwrap();
        assert_eq!(restored.status, PlanStatus::Active);
        assert!(restored.is_favorite);
    }

    #[tokio::test]
    async fn test_completed_cannot_be_requested_directly() {
        let (store, user, plan) = setup().await;
        let result = update_plan_settings(
            store.as_ref(),
            user,
            plan.id,
            PlanSettingsUpdate {
                is_favorite: None,
                status: Some(PlanStatus::Completed),
            },
        )
        .await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_delete_removes_plan_and_progress() {
        let (store, user, plan) = setup().await;
        update_task_progress(store.as_ref(), user, plan.id, "w1-t0", toggle(true))
            .await
            .unwrap();
        delete_owned_plan(store.as_ref(), user, plan.id).await.unwrap();
        assert!(store.get_plan(plan.id).await.unwrap().is_none());
        assert!(store.progress_for_plan(plan.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_favorite_survives_concurrent_task_toggle() {
        let (inner, user, plan) = setup().await;
        let store = PausedStore::new(inner);
        let plan_id = plan.id;

        let toggling = tokio::spawn({
            let store = store.clone();
            async move {
                update_task_progress(store.as_ref(), user, plan_id, "w1-t0", toggle(true)).await
            }
        });
        store.paused.notified().await;
        update_plan_settings(store.as_ref(), user, plan_id, favorite())
            .await
            .unwrap();
        store.resume.notify_one();

        let summary = toggling.await.unwrap().unwrap();
        assert_eq!(summary.progress_percentage, 6);

        let stored = store.get_plan(plan_id).await.unwrap().unwrap();
        assert!(stored.is_favorite);
        assert_eq!(stored.progress_percentage, 6);
    }

    #[tokio::test]
    async fn test_favorite_patch_keeps_concurrent_progress() {
        let (inner, user, plan) = setup().await;
        let store = PausedStore::new(inner);
        let plan_id = plan.id;

        let patching = tokio::spawn({
            let store = store.clone();
            async move { update_plan_settings(store.as_ref(), user, plan_id, favorite()).await }
        });
        store.paused.notified().await;
        update_task_progress(store.as_ref(), user, plan_id, "w1-t0", toggle(true))
            .await
            .unwrap();
        store.resume.notify_one();

        let patched = patching.await.unwrap().unwrap();
        assert!(patched.is_favorite);
        assert_eq!(patched.progress_percentage, 6);

        let stored = store.get_plan(plan_id).await.unwrap().unwrap();
        let records = store.progress_for_plan(plan_id).await.unwrap();
        assert_eq!(
            stored.progress_percentage,
            PlanProgress::recompute(&stored, &records).progress_percentage
        );
        assert_eq!(stored.progress_percentage, 6);
    }
}
