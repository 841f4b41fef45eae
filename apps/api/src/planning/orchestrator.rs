//! Plan Orchestrator: the request entry point for plan generation.
//!
//! Flow: fetch catalog (both reads concurrently) → matcher → skill aggregator →
//!       roadmap builder → assemble plan → persist (authenticated callers only)
//!       → hand an analytics event to the background worker → return.
//!
//! Any store failure aborts the request; nothing is retried and no partial
//! plan is returned. Identical submissions produce independent plans.

use chrono::Utc;
use serde_json::json;
use tracing::{info, warn};
use uuid::Uuid;

use crate::analytics::AnalyticsSender;
use crate::errors::AppError;
use crate::models::analytics::AnalyticsEvent;
use crate::models::plan::{CareerPlan, PlanStatus};
use crate::models::profile::UserProfile;
use crate::planning::matcher::CareerMatcher;
use crate::planning::roadmap::build_roadmap;
use crate::planning::skills::aggregate_skills;
use crate::store::CareerStore;

pub const PLAN_GENERATED_EVENT: &str = "career_plan_generated";

/// Runs the full pipeline for one submission.
///
/// Steps:
/// 1. career_insights() + learning_resources() → catalog
/// 2. matcher.recommend() → top 3 CareerRecommendations
/// 3. aggregate_skills() → up to 3 SkillRecommendations
/// 4. build_roadmap() → four LearningWeeks
/// 5. assemble CareerPlan
/// 6. INSERT into career_plans when `caller` is set
/// 7. dispatch analytics event (never fails the request)
pub async fn generate_career_plan(
    store: &dyn CareerStore,
    matcher: &dyn CareerMatcher,
    analytics: &AnalyticsSender,
    caller: Option<Uuid>,
    profile: UserProfile,
) -> Result<CareerPlan, AppError> {
    // Step 1: Load catalog
    let (insights, resources) =
        tokio::try_join!(store.career_insights(), store.learning_resources())?;

    if profile.interests.is_empty() {
        warn!(
            "Profile for {} has no interests; recommendations reflect demand and growth only",
            profile.name
        );
    }

    // Steps 2-4: Pure pipeline
    let career_recommendations = matcher.recommend(&profile.interests, &insights);
    let skill_recommendations = aggregate_skills(&career_recommendations, &resources);
    let learning_plan = build_roadmap(&skill_recommendations, &resources);
    info!(
        "Matched {} careers and {} skills from {} insights",
        career_recommendations.len(),
        skill_recommendations.len(),
        insights.len()
    );

    // Step 5: Assemble
    let now = Utc::now();
    let plan = CareerPlan {
        id: Uuid::new_v4(),
        user_id: caller,
        title: format!("Career Plan for {}", profile.name),
        tags: plan_tags(&profile),
        profile,
        career_recommendations,
        skill_recommendations,
        learning_plan,
        status: PlanStatus::Active,
        progress_percentage: 0,
        is_favorite: false,
        created_at: now,
        updated_at: now,
    };

    // Step 6: Persist for authenticated callers; guest plans stay client-side
    if let Some(user_id) = caller {
        store.insert_plan(&plan).await?;
        info!("Persisted career plan {} for user {}", plan.id, user_id);
    } else {
        info!("Generated guest career plan {} (not persisted)", plan.id);
    }

    // Step 7: Analytics
    analytics.dispatch(plan_generated_event(&plan));

    Ok(plan)
}

/// Lower-cased, de-duplicated interests in submission order.
fn plan_tags(profile: &UserProfile) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for interest in &profile.interests {
        let tag = interest.to_lowercase();
        if !tags.contains(&tag) {
            tags.push(tag);
        }
    }
    tags
}

fn plan_generated_event(plan: &CareerPlan) -> AnalyticsEvent {
    let career_titles: Vec<&str> = plan
        .career_recommendations
        .iter()
        .map(|r| r.title.as_str())
        .collect();
    AnalyticsEvent::new(
        PLAN_GENERATED_EVENT,
        json!({
            "plan_id": plan.id,
            "career_titles": career_titles,
            "interests": plan.profile.interests,
            "education_level": plan.profile.education_level.as_str(),
            "persisted": plan.user_id.is_some(),
        }),
        plan.user_id,
    )
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
