//! Attendance handlers.

use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Router,
};
use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use common::AppResult;
use domain::{
    AttendanceFilter, AttendancePatch, AttendanceRecord, AttendanceReport, AttendanceStatus,
    AttendanceView, Capability, MarkAttendance,
};

use crate::api::extractors::{ValidatedJson, ValidatedQuery};
use crate::api::middleware::{guarded, CurrentUser};
use crate::api::AppState;
use crate::types::{ApiResponse, Named};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MarkAttendanceRequest {
    pub employee_id: Uuid,
    #[schema(example = "2024-03-04")]
    pub date: NaiveDate,
    pub status: AttendanceStatus,
    #[schema(example = "09:00")]
    pub time_in: Option<String>,
    #[schema(example = "17:30")]
    pub time_out: Option<String>,
    pub remarks: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAttendanceRequest {
    pub status: Option<AttendanceStatus>,
    pub time_in: Option<String>,
    pub time_out: Option<String>,
    pub remarks: Option<String>,
}

#[derive(Debug, Deserialize, Validate, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceQuery {
    pub employee_id: Option<Uuid>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    #[param(value_type = Option<String>, example = "Present")]
    pub status: Option<AttendanceStatus>,
}

#[derive(Debug, Deserialize, Validate, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct MyAttendanceQuery {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize, Validate, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ReportQuery {
    pub employee_id: Option<Uuid>,
    #[param(example = 3)]
    pub month: u32,
    #[param(example = 2024)]
    pub year: i32,
}

pub fn attendance_routes() -> Router<AppState> {
    guarded(
        Capability::ManageAttendance,
        Router::new()
            .route("/", get(list_attendance))
            .route("/mark", post(mark_attendance))
            .route("/report", get(attendance_report))
            .route("/:id", put(update_attendance).delete(delete_attendance)),
    )
    .merge(guarded(
        Capability::ViewOwnAttendance,
        Router::new().route("/my-attendance", get(my_attendance)),
    ))
}

/// Mark or overwrite one employee's attendance for a day
#[utoipa::path(
    post,
    path = "/api/attendance/mark",
    tag = "Attendance",
    security(("bearer_auth" = [])),
    request_body = MarkAttendanceRequest,
    responses(
        (status = 201, description = "Attendance marked", body = AttendanceRecord),
        (status = 200, description = "Existing record updated", body = AttendanceRecord),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Employee not found")
    )
)]
pub async fn mark_attendance(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<MarkAttendanceRequest>,
) -> AppResult<Response> {
    let outcome = state
        .attendance_service
        .mark(
            MarkAttendance {
                employee_id: payload.employee_id,
                date: payload.date,
                status: payload.status,
                time_in: payload.time_in,
                time_out: payload.time_out,
                remarks: payload.remarks,
            },
            current_user.account_id,
        )
        .await?;

    let (status, message) = if outcome.created {
        (StatusCode::CREATED, "Attendance marked successfully")
    } else {
        (StatusCode::OK, "Attendance updated successfully")
    };

    Ok((
        status,
        ApiResponse::named("attendance", outcome.record).and_message(message),
    )
        .into_response())
}

#[utoipa::path(
    get,
    path = "/api/attendance",
    tag = "Attendance",
    security(("bearer_auth" = [])),
    params(AttendanceQuery),
    responses((status = 200, description = "Matching records, newest first", body = Vec<AttendanceView>))
)]
pub async fn list_attendance(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<AttendanceQuery>,
) -> AppResult<ApiResponse<Named<Vec<AttendanceView>>>> {
    let records = state
        .attendance_service
        .list(AttendanceFilter {
            employee_id: query.employee_id,
            start_date: query.start_date,
            end_date: query.end_date,
            status: query.status,
        })
        .await?;
    Ok(ApiResponse::named("attendance", records))
}

/// Monthly records and summary
#[utoipa::path(
    get,
    path = "/api/attendance/report",
    tag = "Attendance",
    security(("bearer_auth" = [])),
    params(ReportQuery),
    responses(
        (status = 200, description = "Records and summary", body = AttendanceReport),
        (status = 400, description = "Invalid month or year")
    )
)]
pub async fn attendance_report(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<ReportQuery>,
) -> AppResult<ApiResponse<AttendanceReport>> {
    let report = state
        .attendance_service
        .report(query.employee_id, query.month, query.year)
        .await?;
    Ok(ApiResponse::success(report))
}

#[utoipa::path(
    put,
    path = "/api/attendance/{id}",
    tag = "Attendance",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Attendance record ID")),
    request_body = UpdateAttendanceRequest,
    responses(
        (status = 200, description = "Record updated", body = AttendanceRecord),
        (status = 404, description = "Attendance record not found")
    )
)]
pub async fn update_attendance(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateAttendanceRequest>,
) -> AppResult<ApiResponse<Named<AttendanceRecord>>> {
    let patch = AttendancePatch {
        status: payload.status,
        time_in: payload.time_in,
        time_out: payload.time_out,
        remarks: payload.remarks,
    };

    let record = state
        .attendance_service
        .update(id, patch, current_user.account_id)
        .await?;
    Ok(ApiResponse::named("attendance", record).and_message("Attendance updated successfully"))
}

#[utoipa::path(
    delete,
    path = "/api/attendance/{id}",
    tag = "Attendance",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Attendance record ID")),
    responses(
        (status = 200, description = "Record deleted"),
        (status = 404, description = "Attendance record not found")
    )
)]
pub async fn delete_attendance(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<ApiResponse<()>> {
    state.attendance_service.delete(id).await?;
    Ok(ApiResponse::message("Attendance deleted successfully"))
}

/// The caller's own attendance
#[utoipa::path(
    get,
    path = "/api/attendance/my-attendance",
    tag = "Attendance",
    security(("bearer_auth" = [])),
    params(MyAttendanceQuery),
    responses(
        (status = 200, description = "Own records, newest first", body = Vec<AttendanceView>),
        (status = 404, description = "Employee record not found")
    )
)]
pub async fn my_attendance(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<MyAttendanceQuery>,
) -> AppResult<ApiResponse<Named<Vec<AttendanceView>>>> {
    let records = state
        .attendance_service
        .list_for_account(current_user.account_id, query.start_date, query.end_date)
        .await?;
    Ok(ApiResponse::named("attendance", records))
}
