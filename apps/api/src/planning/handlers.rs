//! Axum route handlers for plan generation and the read-only catalog.

use axum::{
    extract::{rejection::JsonRejection, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::auth::Caller;
use crate::errors::AppError;
use crate::models::catalog::{CareerInsight, Difficulty, LearningResource, PriceType};
use crate::models::plan::CareerPlan;
use crate::models::profile::{ProfileSubmission, UserProfile};
use crate::planning::orchestrator::generate_career_plan;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratePlanResponse {
    #[serde(flatten)]
    pub plan: CareerPlan,
    pub persisted: bool,
}

#[derive(Debug, Default, Deserialize)]
pub struct ResourceQuery {
    pub skill: Option<String>,
    pub difficulty: Option<Difficulty>,
    pub price_type: Option<PriceType>,
    pub featured: Option<bool>,
}

impl ResourceQuery {
    fn matches(&self, resource: &LearningResource) -> bool {
        let skill_ok = self.skill.as_deref().map_or(true, |skill| {
            let skill = skill.to_lowercase();
            resource
                .skill_tags
                .iter()
                .any(|tag| tag.to_lowercase().contains(&skill))
        });
        skill_ok
            && self.difficulty.map_or(true, |d| resource.difficulty == d)
            && self.price_type.map_or(true, |p| resource.price_type == p)
            && self.featured.map_or(true, |f| resource.is_featured == f)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/plans/generate
///
/// Validates the submitted profile, runs the matching pipeline and returns the plan.
/// Plans are persisted only for authenticated callers.
pub async fn handle_generate_plan(
    State(state): State<AppState>,
    caller: Caller,
    payload: Result<Json<ProfileSubmission>, JsonRejection>,
) -> Result<Json<GeneratePlanResponse>, AppError> {
    let Json(submission) = payload?;
    let profile = UserProfile::try_from(submission)?;

    let plan = generate_career_plan(
        state.store.as_ref(),
        state.matcher.as_ref(),
        &state.analytics,
        caller.0,
        profile,
    )
    .await?;

    Ok(Json(GeneratePlanResponse {
        persisted: plan.user_id.is_some(),
        plan,
    }))
}

/// GET /api/v1/insights
pub async fn handle_list_insights(
    State(state): State<AppState>,
) -> Result<Json<Vec<CareerInsight>>, AppError> {
    Ok(Json(state.store.career_insights().await?))
}

/// GET /api/v1/resources?skill=&difficulty=&price_type=&featured=
pub async fn handle_list_resources(
    State(state): State<AppState>,
    Query(query): Query<ResourceQuery>,
) -> Result<Json<Vec<LearningResource>>, AppError> {
    let resources = state
        .store
        .learning_resources()
        .await?
        .into_iter()
        .filter(|r| query.matches(r))
        .collect();
    Ok(Json(resources))
}
