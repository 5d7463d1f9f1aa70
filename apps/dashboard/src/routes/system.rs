use axum::{extract::State, Json};

use crate::errors::AppError;
use crate::models::{ServiceConfigs, ServiceHealthReport};
use crate::panels::overview::OverviewSnapshot;
use crate::state::AppState;
use crate::view_state::hooks::SystemData;
use crate::view_state::ViewState;

/// GET /api/v1/overview
/// Serves the polled snapshot; loads once if nothing has been fetched yet.
pub async fn handle_overview(State(state): State<AppState>) -> Json<ViewState<OverviewSnapshot>> {
    if state.overview.state().data.is_none() {
        let _ = state.overview.load().await;
    }
    Json(state.overview.state())
}

/// POST /api/v1/overview/refresh
pub async fn handle_overview_refresh(
    State(state): State<AppState>,
) -> Json<ViewState<OverviewSnapshot>> {
    let _ = state.overview.load().await;
    Json(state.overview.state())
}

/// GET /api/v1/system/health
pub async fn handle_system_health(
    State(state): State<AppState>,
) -> Result<Json<ServiceHealthReport>, AppError> {
    Ok(Json(state.system.check_all_services_health().await?))
}

/// GET /api/v1/system/configs
pub async fn handle_system_configs(
    State(state): State<AppState>,
) -> Result<Json<ServiceConfigs>, AppError> {
    Ok(Json(state.system.get_all_configs().await?))
}

/// GET /api/v1/system/state
pub async fn handle_system_state(State(state): State<AppState>) -> Json<ViewState<SystemData>> {
    Json(state.system.state())
}
