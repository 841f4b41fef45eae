//! Pure progress rules: task addressing, percentage recomputation and status transitions.

use std::fmt;

use crate::errors::AppError;
use crate::models::plan::{CareerPlan, PlanSettingsUpdate, PlanStatus, ProgressRecord};

/// Address of one checklist task: `w{week}-t{index}`, week 1-based, index 0-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskId {
    pub week: u8,
    pub index: usize,
}

impl TaskId {
    pub fn parse(raw: &str) -> Option<Self> {
        let (week, index) = raw.strip_prefix('w')?.split_once("-t")?;
        Some(TaskId {
            week: week.parse().ok()?,
            index: index.parse().ok()?,
        })
    }

    /// Parses and checks that the id addresses a task that exists in `plan`.
    pub fn for_plan(raw: &str, plan: &CareerPlan) -> Result<Self, AppError> {
        let task = TaskId::parse(raw).ok_or_else(|| {
            AppError::Validation(format!("task id '{raw}' must look like w1-t0"))
        })?;
        let exists = plan
            .learning_plan
            .iter()
            .find(|w| w.week == task.week)
            .is_some_and(|w| task.index < w.tasks.len());
        if !exists {
            return Err(AppError::Validation(format!(
                "task {raw} does not exist in plan {}",
                plan.id
            )));
        }
        Ok(task)
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "w{}-t{}", self.week, self.index)
    }
}

/// `round(100 × completed / total)`; only records addressing a real task count.
pub fn compute_progress(plan: &CareerPlan, records: &[ProgressRecord]) -> u8 {
    let total = plan.total_tasks();
    if total == 0 {
        return 0;
    }
    let completed = records
        .iter()
        .filter(|r| r.completed && TaskId::for_plan(&r.task_id, plan).is_ok())
        .count()
        .min(total);
    ((completed as f64 / total as f64) * 100.0).round() as u8
}

/// Status implied by a progress value. Archived plans stay archived.
pub fn status_for_progress(current: PlanStatus, progress: u8) -> PlanStatus {
    match current {
        PlanStatus::Archived => PlanStatus::Archived,
        _ if progress >= 100 => PlanStatus::Completed,
        _ => PlanStatus::Active,
    }
}

/// Applies a user-requested status change.
///
/// `archived` is reachable from anywhere; `active` un-archives and lands on
/// whatever the progress implies; `completed` is only reached through progress.
pub fn requested_status(
    current: PlanStatus,
    requested: PlanStatus,
    progress: u8,
) -> Result<PlanStatus, AppError> {
    match requested {
        PlanStatus::Archived => Ok(PlanStatus::Archived),
        PlanStatus::Active => Ok(status_for_progress(PlanStatus::Active, progress)),
        PlanStatus::Completed if current == PlanStatus::Completed => Ok(current),
        PlanStatus::Completed => Err(AppError::Validation(
            "a plan becomes completed when all of its tasks are done".to_string(),
        )),
    }
}

/// Progress and status a plan should carry for its current record set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlanProgress {
    pub progress_percentage: u8,
    pub status: PlanStatus,
}

impl PlanProgress {
    pub fn recompute(plan: &CareerPlan, records: &[ProgressRecord]) -> Self {
        let progress_percentage = compute_progress(plan, records);
        PlanProgress {
            progress_percentage,
            status: status_for_progress(plan.status, progress_percentage),
        }
    }

    pub fn differs_from(&self, plan: &CareerPlan) -> bool {
        self.progress_percentage != plan.progress_percentage || self.status != plan.status
    }
}

/// Applies favorite and status edits to `plan` as currently stored.
/// Leaves `plan` untouched when the status request is refused.
pub fn apply_settings(
    plan: &mut CareerPlan,
    update: &PlanSettingsUpdate,
) -> Result<(), AppError> {
    if let Some(requested) = update.status {
        plan.status = requested_status(plan.status, requested, plan.progress_percentage)?;
    }
    if let Some(is_favorite) = update.is_favorite {
        plan.is_favorite = is_favorite;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::plan::{LearningWeek, TaskType};
    use crate::models::profile::{EducationLevel, UserProfile};
    use chrono::Utc;
    use uuid::Uuid;

    fn standard_plan() -> CareerPlan {
        let weeks = (1..=4)
            .map(|week| LearningWeek {
                week,
                focus: format!("Week {week}"),
                tasks: (0..4).map(|i| format!("task {i}")).collect(),
                resources: vec![],
            })
            .collect();
        CareerPlan {
            id: Uuid::new_v4(),
            user_id: Some(Uuid::new_v4()),
            title: "Plan".to_string(),
            profile: UserProfile {
                name: "Rae".to_string(),
                education_level: EducationLevel::Diploma,
                interests: vec![],
                experience: String::new(),
                goals: String::new(),
            },
            career_recommendations: vec![],
            skill_recommendations: vec![],
            learning_plan: weeks,
            status: PlanStatus::Active,
            progress_percentage: 0,
            is_favorite: false,
            tags: vec![],
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn done(plan: &CareerPlan, task_id: &str, completed: bool) -> ProgressRecord {
        ProgressRecord {
            user_id: Uuid::new_v4(),
            plan_id: plan.id,
            task_id: task_id.to_string(),
            task_type: TaskType::Learning,
            completed,
            completed_at: completed.then(Utc::now),
            notes: None,
            updated_at: Utc::now(),
        }
    }

    fn all_tasks(plan: &CareerPlan) -> Vec<String> {
        plan.learning_plan
            .iter()
            .flat_map(|w| {
                (0..w.tasks.len()).map(move |index| TaskId { week: w.week, index }.to_string())
            })
            .collect()
    }

    #[test]
    fn test_task_id_parse_and_display() {
        let id = TaskId::parse("w3-t2").unwrap();
        assert_eq!(id, TaskId { week: 3, index: 2 });
        assert_eq!(id.to_string(), "w3-t2");
        assert!(TaskId::parse("3-2").is_none());
        assert!(TaskId::parse("w3-tx").is_none());
    }

    #[test]
    fn test_task_id_must_exist_in_plan() {
        let plan = standard_plan();
        assert!(TaskId::for_plan("w4-t3", &plan).is_ok());
        assert!(TaskId::for_plan("w5-t0", &plan).is_err());
        assert!(TaskId::for_plan("w1-t4", &plan).is_err());
    }

    #[test]
    fn test_progress_rounds() {
        let plan = standard_plan();
        let records = vec![done(&plan, "w1-t0", true)];
        // 1/16 = 6.25
        assert_eq!(compute_progress(&plan, &records), 6);

        let records: Vec<ProgressRecord> = ["w1-t0", "w1-t1", "w1-t2"]
            .iter()
            .map(|t| done(&plan, t, true))
            .collect();
        // 3/16 = 18.75
        assert_eq!(compute_progress(&plan, &records), 19);
    }

    #[test]
    fn test_incomplete_and_unknown_records_do_not_count() {
        let plan = standard_plan();
        let records = vec![
            done(&plan, "w1-t0", false),
            done(&plan, "w9-t9", true),
            done(&plan, "w2-t1", true),
        ];
        assert_eq!(compute_progress(&plan, &records), 6);
    }

    #[test]
    fn test_last_of_sixteen_completes_plan() {
        let plan = standard_plan();
        let records: Vec<ProgressRecord> = all_tasks(&plan)
            .iter()
            .map(|t| done(&plan, t, true))
            .collect();
        assert_eq!(records.len(), 16);
        let progress = compute_progress(&plan, &records);
        assert_eq!(progress, 100);
        assert_eq!(
            status_for_progress(PlanStatus::Active, progress),
            PlanStatus::Completed
        );
    }

    #[test]
    fn test_status_follows_progress_except_archived() {
        assert_eq!(
            status_for_progress(PlanStatus::Completed, 94),
            PlanStatus::Active
        );
        assert_eq!(
            status_for_progress(PlanStatus::Archived, 100),
            PlanStatus::Archived
        );
    }

    #[test]
    fn test_requested_status_rules() {
        assert_eq!(
            requested_status(PlanStatus::Completed, PlanStatus::Archived, 100).unwrap(),
            PlanStatus::Archived
        );
        assert_eq!(
            requested_status(PlanStatus::Archived, PlanStatus::Active, 100).unwrap(),
            PlanStatus::Completed
        );
        assert_eq!(
            requested_status(PlanStatus::Archived, PlanStatus::Active, 40).unwrap(),
            PlanStatus::Active
        );
        assert!(requested_status(PlanStatus::Active, PlanStatus::Completed, 40).is_err());
    }

    #[test]
    fn test_empty_plan_has_zero_progress() {
        let mut plan = standard_plan();
        plan.learning_plan.clear();
        assert_eq!(compute_progress(&plan, &[]), 0);
    }

    #[test]
    fn test_recompute_flags_only_real_changes() {
        let mut plan = standard_plan();
        let records = vec![done(&plan, "w1-t0", true)];
        let outcome = PlanProgress::recompute(&plan, &records);
        assert_eq!(outcome.progress_percentage, 6);
        assert_eq!(outcome.status, PlanStatus::Active);
        assert!(outcome.differs_from(&plan));

        plan.progress_percentage = 6;
        assert!(!outcome.differs_from(&plan));
    }

    #[test]
    fn test_refused_settings_leave_plan_untouched() {
        let mut plan = standard_plan();
        let update = PlanSettingsUpdate {
            is_favorite: Some(true),
            status: Some(PlanStatus::Completed),
        };
        assert!(apply_settings(&mut plan, &update).is_err());
        assert!(!plan.is_favorite);
        assert_eq!(plan.status, PlanStatus::Active);
    }
}
