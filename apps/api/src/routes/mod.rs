pub mod health;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::planning::handlers as planning;
use crate::progress::handlers as progress;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Plan generation
        .route("/api/v1/plans/generate", post(planning::handle_generate_plan))
        // Dashboard
        .route("/api/v1/plans", get(progress::handle_list_plans))
        .route(
            "/api/v1/plans/:id",
            get(progress::handle_get_plan)
                .patch(progress::handle_update_plan)
                .delete(progress::handle_delete_plan),
        )
        .route(
            "/api/v1/plans/:id/progress/:task_id",
            put(progress::handle_update_progress),
        )
        // Catalog (read-only)
        .route("/api/v1/insights", get(planning::handle_list_insights))
        .route("/api/v1/resources", get(planning::handle_list_resources))
        .with_state(state)
}
