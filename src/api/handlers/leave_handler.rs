//! Leave handlers.

use axum::{
    extract::{Extension, Path, State},
    routing::{get, post, put},
    Router,
};
use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use common::AppResult;
use domain::{Capability, LeaveApplication, LeaveRequest, LeaveType, LeaveView};

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::{guarded, CurrentUser};
use crate::api::AppState;
use crate::types::{ApiResponse, Created, Named};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApplyLeaveRequest {
    pub leave_type: LeaveType,
    #[schema(example = "2024-05-08")]
    pub start_date: NaiveDate,
    #[schema(example = "2024-05-10")]
    pub end_date: NaiveDate,
    #[serde(default)]
    pub reason: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct DecideLeaveRequest {
    /// `Approved` or `Rejected`
    #[schema(example = "Approved")]
    pub status: String,
}

pub fn leave_routes() -> Router<AppState> {
    guarded(
        Capability::ViewOwnLeave,
        Router::new().route("/employee", get(my_leaves)),
    )
    .merge(guarded(
        Capability::ApplyLeave,
        Router::new().route("/apply", post(apply_leave)),
    ))
    .merge(guarded(
        Capability::ManageLeave,
        Router::new()
            .route("/", get(list_leaves))
            .route("/:id", put(decide_leave)),
    ))
}

/// The caller's own requests
#[utoipa::path(
    get,
    path = "/api/leave/employee",
    tag = "Leave",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Own requests, latest first", body = Vec<LeaveRequest>),
        (status = 404, description = "Employee record not found")
    )
)]
pub async fn my_leaves(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Named<Vec<LeaveRequest>>>> {
    let leaves = state
        .leave_service
        .list_for_account(current_user.account_id)
        .await?;
    Ok(ApiResponse::named("leaves", leaves))
}

#[utoipa::path(
    post,
    path = "/api/leave/apply",
    tag = "Leave",
    security(("bearer_auth" = [])),
    request_body = ApplyLeaveRequest,
    responses(
        (status = 201, description = "Request submitted as Pending", body = LeaveRequest),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Employee record not found")
    )
)]
pub async fn apply_leave(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<ApplyLeaveRequest>,
) -> AppResult<Created<Named<LeaveRequest>>> {
    let leave = state
        .leave_service
        .apply_for_account(
            current_user.account_id,
            LeaveApplication {
                leave_type: payload.leave_type,
                start_date: payload.start_date,
                end_date: payload.end_date,
                reason: payload.reason,
            },
        )
        .await?;

    Ok(Created(
        ApiResponse::named("leave", leave).and_message("Leave application submitted successfully"),
    ))
}

#[utoipa::path(
    get,
    path = "/api/leave",
    tag = "Leave",
    security(("bearer_auth" = [])),
    responses((status = 200, description = "Every request with employee details", body = Vec<LeaveView>))
)]
pub async fn list_leaves(
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Named<Vec<LeaveView>>>> {
    let leaves = state.leave_service.list_all().await?;
    Ok(ApiResponse::named("leaves", leaves))
}

/// Approve or reject a request
#[utoipa::path(
    put,
    path = "/api/leave/{id}",
    tag = "Leave",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Leave request ID")),
    request_body = DecideLeaveRequest,
    responses(
        (status = 200, description = "Decision recorded", body = LeaveRequest),
        (status = 400, description = "Status is not Approved or Rejected"),
        (status = 404, description = "Leave request not found")
    )
)]
pub async fn decide_leave(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<DecideLeaveRequest>,
) -> AppResult<ApiResponse<Named<LeaveRequest>>> {
    let leave = state
        .leave_service
        .decide(id, payload.status, current_user.account_id)
        .await?;

    let message = format!("Leave {} successfully", leave.status.as_str().to_lowercase());
    Ok(ApiResponse::named("leave", leave).and_message(message))
}
