use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::analytics::AnalyticsEvent;
use crate::models::catalog::{CareerInsight, LearningResource};
use crate::models::plan::{CareerPlan, PlanSettingsUpdate, ProgressRecord};
use crate::progress::tracker::{apply_settings, PlanProgress};
use crate::store::{ownerless_plan, seed, CareerStore};

#[derive(Default)]
struct Tables {
    insights: Vec<CareerInsight>,
    resources: Vec<LearningResource>,
    plans: Vec<CareerPlan>,
    progress: Vec<ProgressRecord>,
    events: Vec<AnalyticsEvent>,
}

/// In-process store with the same semantics as the Postgres tables.
#[derive(Default)]
pub struct MemoryCareerStore {
    tables: RwLock<Tables>,
}

impl MemoryCareerStore {
    pub fn new(insights: Vec<CareerInsight>, resources: Vec<LearningResource>) -> Self {
        Self {
            tables: RwLock::new(Tables {
                insights,
                resources,
                ..Tables::default()
            }),
        }
    }

    /// Store preloaded with the sample catalog.
    pub fn seeded() -> Self {
        Self::new(seed::career_insights(), seed::learning_resources())
    }

    #[cfg(test)]
    pub async fn plan_count(&self) -> usize {
        self.tables.read().await.plans.len()
    }

    #[cfg(test)]
    pub async fn events(&self) -> Vec<AnalyticsEvent> {
        self.tables.read().await.events.clone()
    }
}

#[async_trait]
impl CareerStore for MemoryCareerStore {
    async fn career_insights(&self) -> Result<Vec<CareerInsight>, AppError> {
        Ok(self.tables.read().await.insights.clone())
    }

    async fn learning_resources(&self) -> Result<Vec<LearningResource>, AppError> {
        Ok(self.tables.read().await.resources.clone())
    }

    async fn insert_plan(&self, plan: &CareerPlan) -> Result<(), AppError> {
        if plan.user_id.is_none() {
            return Err(ownerless_plan(plan));
        }
        self.tables.write().await.plans.push(plan.clone());
        Ok(())
    }

    async fn get_plan(&self, plan_id: Uuid) -> Result<Option<CareerPlan>, AppError> {
        Ok(self
            .tables
            .read()
            .await
            .plans
            .iter()
            .find(|p| p.id == plan_id)
            .cloned())
    }

    async fn list_plans(&self, user_id: Uuid) -> Result<Vec<CareerPlan>, AppError> {
        let tables = self.tables.read().await;
        let mut plans: Vec<CareerPlan> = tables
            .plans
            .iter()
            .filter(|p| p.user_id == Some(user_id))
            .cloned()
            .collect();
        plans.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(plans)
    }

    async fn save_settings(
        &self,
        plan_id: Uuid,
        update: &PlanSettingsUpdate,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<CareerPlan>, AppError> {
        let mut tables = self.tables.write().await;
        let Some(plan) = tables.plans.iter_mut().find(|p| p.id == plan_id) else {
            return Ok(None);
        };
        apply_settings(plan, update)?;
        plan.updated_at = updated_at;
        Ok(Some(plan.clone()))
    }

    async fn delete_plan(&self, plan_id: Uuid) -> Result<bool, AppError> {
        let mut tables = self.tables.write().await;
        let before = tables.plans.len();
        tables.plans.retain(|p| p.id != plan_id);
        let removed = tables.plans.len() != before;
        if removed {
            tables.progress.retain(|r| r.plan_id != plan_id);
        }
        Ok(removed)
    }

    async fn record_progress(
        &self,
        record: &ProgressRecord,
    ) -> Result<Option<PlanProgress>, AppError> {
        // One write guard covers the upsert, the recount and the plan update.
        let mut guard = self.tables.write().await;
        let tables = &mut *guard;
        let Some(plan) = tables.plans.iter_mut().find(|p| p.id == record.plan_id) else {
            return Ok(None);
        };

        let position = tables
            .progress
            .iter()
            .position(|r| r.plan_id == record.plan_id && r.task_id == record.task_id);
        match position {
            Some(i) => tables.progress[i] = record.clone(),
            None => tables.progress.push(record.clone()),
        }

        let records: Vec<ProgressRecord> = tables
            .progress
            .iter()
            .filter(|r| r.plan_id == record.plan_id)
            .cloned()
            .collect();
        let outcome = PlanProgress::recompute(plan, &records);
        if outcome.differs_from(plan) {
            plan.progress_percentage = outcome.progress_percentage;
            plan.status = outcome.status;
            plan.updated_at = record.updated_at;
        }
        Ok(Some(outcome))
    }

    async fn progress_for_plan(&self, plan_id: Uuid) -> Result<Vec<ProgressRecord>, AppError> {
        Ok(self
            .tables
            .read()
            .await
            .progress
            .iter()
            .filter(|r| r.plan_id == plan_id)
            .cloned()
            .collect())
    }

    async fn record_event(&self, event: &AnalyticsEvent) -> Result<(), AppError> {
        self.tables.write().await.events.push(event.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::plan::{LearningWeek, PlanStatus, TaskType};
    use crate::models::profile::{EducationLevel, UserProfile};
    use chrono::{Duration, Utc};

    fn plan(user_id: Option<Uuid>, age_minutes: i64) -> CareerPlan {
        let created = Utc::now() - Duration::minutes(age_minutes);
        CareerPlan {
            id: Uuid::new_v4(),
            user_id,
            title: "Plan".to_string(),
            profile: UserProfile {
                name: "Kim".to_string(),
                education_level: EducationLevel::Masters,
                interests: vec![],
                experience: String::new(),
                goals: String::new(),
            },
            career_recommendations: vec![],
            skill_recommendations: vec![],
            learning_plan: vec![],
            status: PlanStatus::Active,
            progress_percentage: 0,
            is_favorite: false,
            tags: vec![],
            created_at: created,
            updated_at: created,
        }
    }

    fn record(plan_id: Uuid, task_id: &str, completed: bool) -> ProgressRecord {
        ProgressRecord {
            user_id: Uuid::new_v4(),
            plan_id,
            task_id: task_id.to_string(),
            task_type: TaskType::Learning,
            completed,
            completed_at: completed.then(Utc::now),
            notes: None,
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_seeded_store_has_catalog() {
        let store = MemoryCareerStore::seeded();
        assert!(!store.career_insights().await.unwrap().is_empty());
        assert!(!store.learning_resources().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_ownerless_plan_is_rejected() {
        let store = MemoryCareerStore::default();
        assert!(store.insert_plan(&plan(None, 0)).await.is_err());
        assert_eq!(store.plan_count().await, 0);
    }

    #[tokio::test]
    async fn test_list_plans_is_owner_scoped_newest_first() {
        let store = MemoryCareerStore::default();
        let owner = Uuid::new_v4();
        let old = plan(Some(owner), 60);
        let new = plan(Some(owner), 1);
        store.insert_plan(&old).await.unwrap();
        store.insert_plan(&new).await.unwrap();
        store.insert_plan(&plan(Some(Uuid::new_v4()), 0)).await.unwrap();

        let listed = store.list_plans(owner).await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].id, new.id);
    }

    #[tokio::test]
    async fn test_progress_upsert_overwrites_by_task() {
        let store = MemoryCareerStore::default();
        let owned = plan(Some(Uuid::new_v4()), 0);
        store.insert_plan(&owned).await.unwrap();
        store.record_progress(&record(owned.id, "w1-t0", true)).await.unwrap();
        store.record_progress(&record(owned.id, "w1-t0", false)).await.unwrap();
        store.record_progress(&record(owned.id, "w1-t1", true)).await.unwrap();

        let records = store.progress_for_plan(owned.id).await.unwrap();
        assert_eq!(records.len(), 2);
        assert!(!records[0].completed);
    }

    #[tokio::test]
    async fn test_progress_for_missing_plan_is_not_stored() {
        let store = MemoryCareerStore::default();
        let orphan = Uuid::new_v4();
        let outcome = store.record_progress(&record(orphan, "w1-t0", true)).await.unwrap();
        assert!(outcome.is_none());
        assert!(store.progress_for_plan(orphan).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_progress_and_settings_write_separate_columns() {
        let store = MemoryCareerStore::default();
        let mut owned = plan(Some(Uuid::new_v4()), 0);
        owned.learning_plan = vec![LearningWeek {
            week: 1,
            focus: "Foundation Building".to_string(),
            tasks: vec!["a".to_string(), "b".to_string()],
            resources: vec![],
        }];
        store.insert_plan(&owned).await.unwrap();

        let favorite = PlanSettingsUpdate {
            is_favorite: Some(true),
            status: None,
        };
        store.save_settings(owned.id, &favorite, Utc::now()).await.unwrap();
        let outcome = store
            .record_progress(&record(owned.id, "w1-t0", true))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(outcome.progress_percentage, 50);

        let unfavorite = PlanSettingsUpdate {
            is_favorite: Some(false),
            status: None,
        };
        let saved = store
            .save_settings(owned.id, &unfavorite, Utc::now())
            .await
            .unwrap()
            .unwrap();
        assert!(!saved.is_favorite);
        assert_eq!(saved.progress_percentage, 50);

        store.record_progress(&record(owned.id, "w1-t1", true)).await.unwrap();
        let stored = store.get_plan(owned.id).await.unwrap().unwrap();
        assert!(!stored.is_favorite);
        assert_eq!(stored.progress_percentage, 100);
        assert_eq!(stored.status, PlanStatus::Completed);
    }

    #[tokio::test]
    async fn test_delete_plan_cascades_progress() {
        let store = MemoryCareerStore::default();
        let owned = plan(Some(Uuid::new_v4()), 0);
        store.insert_plan(&owned).await.unwrap();
        store.record_progress(&record(owned.id, "w2-t1", true)).await.unwrap();

        assert!(store.delete_plan(owned.id).await.unwrap());
        assert!(store.progress_for_plan(owned.id).await.unwrap().is_empty());
        assert!(!store.delete_plan(owned.id).await.unwrap());
    }
}
