//! Admin dashboard.

use axum::{extract::State, routing::get, Router};

use common::AppResult;
use domain::{Capability, DashboardSummary};

use crate::api::middleware::guarded;
use crate::api::AppState;
use crate::types::ApiResponse;

pub fn dashboard_routes() -> Router<AppState> {
    guarded(
        Capability::ViewDashboard,
        Router::new().route("/summary", get(summary)),
    )
}

#[utoipa::path(
    get,
    path = "/api/dashboard/summary",
    tag = "Dashboard",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Headcount, payroll and leave totals", body = DashboardSummary),
        (status = 403, description = "Admin only")
    )
)]
pub async fn summary(State(state): State<AppState>) -> AppResult<ApiResponse<DashboardSummary>> {
    let summary = state.dashboard_service.summary().await?;
    Ok(ApiResponse::success(summary))
}
