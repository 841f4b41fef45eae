//! Axum route handlers for the plan dashboard. All routes require a caller.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use crate::auth::Caller;
use crate::errors::AppError;
use crate::models::plan::{CareerPlan, PlanSettingsUpdate, ProgressRecord};
use crate::progress::service::{
    delete_owned_plan, load_owned_plan, update_plan_settings, update_task_progress,
    ProgressSummary, TaskProgressUpdate,
};
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanDetailResponse {
    pub plan: CareerPlan,
    pub progress: Vec<ProgressRecord>,
}

/// GET /api/v1/plans
pub async fn handle_list_plans(
    State(state): State<AppState>,
    caller: Caller,
) -> Result<Json<Vec<CareerPlan>>, AppError> {
    let user_id = caller.require()?;
    Ok(Json(state.store.list_plans(user_id).await?))
}

/// GET /api/v1/plans/:id
pub async fn handle_get_plan(
    State(state): State<AppState>,
    caller: Caller,
    Path(plan_id): Path<Uuid>,
) -> Result<Json<PlanDetailResponse>, AppError> {
    let user_id = caller.require()?;
    let plan = load_owned_plan(state.store.as_ref(), user_id, plan_id).await?;
    let progress = state.store.progress_for_plan(plan_id).await?;
    Ok(Json(PlanDetailResponse { plan, progress }))
}

/// PATCH /api/v1/plans/:id
pub async fn handle_update_plan(
    State(state): State<AppState>,
    caller: Caller,
    Path(plan_id): Path<Uuid>,
    payload: Result<Json<PlanSettingsUpdate>, JsonRejection>,
) -> Result<Json<CareerPlan>, AppError> {
    let user_id = caller.require()?;
    let Json(update) = payload?;
    let plan = update_plan_settings(state.store.as_ref(), user_id, plan_id, update).await?;
    Ok(Json(plan))
}

/// DELETE /api/v1/plans/:id
pub async fn handle_delete_plan(
    State(state): State<AppState>,
    caller: Caller,
    Path(plan_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let user_id = caller.require()?;
    delete_owned_plan(state.store.as_ref(), user_id, plan_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/v1/plans/:id/progress/:task_id
pub async fn handle_update_progress(
    State(state): State<AppState>,
    caller: Caller,
    Path((plan_id, task_id)): Path<(Uuid, String)>,
    payload: Result<Json<TaskProgressUpdate>, JsonRejection>,
) -> Result<Json<ProgressSummary>, AppError> {
    let user_id = caller.require()?;
    let Json(update) = payload?;
    let summary =
        update_task_progress(state.store.as_ref(), user_id, plan_id, &task_id, update).await?;
    Ok(Json(summary))
}
