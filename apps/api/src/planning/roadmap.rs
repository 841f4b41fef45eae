//! Plan Builder: lays the aggregated skills onto the fixed four-week template.

use crate::models::catalog::{Difficulty, LearningResource};
use crate::models::plan::{LearningWeek, SkillRecommendation, TaskType};
use crate::planning::tables::{
    ADVANCED_FOCUS, ADVANCED_SKILL_TASKS, CORE_SKILLS_FOCUS, CORE_SKILL_TASKS,
    FALLBACK_WEEK_RESOURCES, FOUNDATION_FOCUS, FOUNDATION_TASKS, PORTFOLIO_FOCUS,
    PORTFOLIO_RESOURCES, PORTFOLIO_TASKS,
};

pub const PLAN_WEEKS: u8 = 4;
const MAX_FOUNDATION_RESOURCES: usize = 3;

/// Always returns weeks 1–4 in order. Missing skills fall back to the generic
/// focus labels and resource lists.
pub fn build_roadmap(
    skills: &[SkillRecommendation],
    resources: &[LearningResource],
) -> Vec<LearningWeek> {
    let foundation_resources = resources
        .iter()
        .filter(|r| r.difficulty == Difficulty::Beginner)
        .take(MAX_FOUNDATION_RESOURCES)
        .map(|r| r.title.clone())
        .collect();

    vec![
        LearningWeek {
            week: 1,
            focus: FOUNDATION_FOCUS.to_string(),
            tasks: to_strings(FOUNDATION_TASKS),
            resources: foundation_resources,
        },
        skill_week(2, skills.first(), CORE_SKILLS_FOCUS, CORE_SKILL_TASKS),
        skill_week(3, skills.get(1), ADVANCED_FOCUS, ADVANCED_SKILL_TASKS),
        LearningWeek {
            week: PLAN_WEEKS,
            focus: PORTFOLIO_FOCUS.to_string(),
            tasks: to_strings(PORTFOLIO_TASKS),
            resources: to_strings(PORTFOLIO_RESOURCES),
        },
    ]
}

fn skill_week(
    week: u8,
    skill: Option<&SkillRecommendation>,
    fallback_focus: &str,
    templates: &[&str],
) -> LearningWeek {
    let focus = skill
        .map(|s| s.skill.clone())
        .unwrap_or_else(|| fallback_focus.to_string());
    let subject = match skill {
        Some(s) => s.skill.clone(),
        None => fallback_focus.to_lowercase(),
    };
    LearningWeek {
        week,
        tasks: templates
            .iter()
            .map(|t| t.replace("{skill}", &subject))
            .collect(),
        resources: skill
            .map(|s| s.resources.clone())
            .unwrap_or_else(|| to_strings(FALLBACK_WEEK_RESOURCES)),
        focus,
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Task type implied by a template slot; used when a progress update omits one.
pub fn default_task_type(week: u8, index: usize) -> TaskType {
    match (week, index) {
        (1, 0) => TaskType::Setup,
        (1, 2) => TaskType::Networking,
        (1, 3) => TaskType::Planning,
        (1, _) => TaskType::Learning,
        (2 | 3, 0) => TaskType::Learning,
        (2 | 3, 1) => TaskType::Practice,
        (2 | 3, 2) => TaskType::Project,
        (2 | 3, _) => TaskType::Practice,
        (_, 0) => TaskType::Project,
        (_, 1 | 2) => TaskType::Networking,
        _ => TaskType::Planning,
    }
}
