//! Salary handlers (admin).

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Router,
};
use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use common::AppResult;
use domain::{Amount, Capability, NewSalaryRecord, SalaryRecord, SalaryView};

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::guarded;
use crate::api::AppState;
use crate::types::{ApiResponse, Named};

/// Amounts accept integers, floats or numeric strings.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddSalaryRequest {
    #[serde(alias = "employee")]
    pub employee_id: Uuid,
    #[schema(value_type = i64, example = 50000)]
    pub basic_salary: Amount,
    #[serde(default)]
    #[schema(value_type = i64, example = 5000)]
    pub allowances: Amount,
    #[serde(default)]
    #[schema(value_type = i64, example = 2000)]
    pub deductions: Amount,
    #[schema(example = "2024-01-31")]
    pub pay_date: NaiveDate,
}

pub fn salary_routes() -> Router<AppState> {
    guarded(
        Capability::ManageSalary,
        Router::new()
            .route("/add", post(add_salary))
            .route("/:employee_id", get(employee_salaries)),
    )
}

#[utoipa::path(
    post,
    path = "/api/salary/add",
    tag = "Salary",
    security(("bearer_auth" = [])),
    request_body = AddSalaryRequest,
    responses(
        (status = 200, description = "Record added", body = SalaryRecord),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Employee not found")
    )
)]
pub async fn add_salary(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<AddSalaryRequest>,
) -> AppResult<ApiResponse<Named<SalaryRecord>>> {
    let record = state
        .salary_service
        .add_record(NewSalaryRecord {
            employee_id: payload.employee_id,
            basic_salary: payload.basic_salary.into(),
            allowances: payload.allowances.into(),
            deductions: payload.deductions.into(),
            pay_date: payload.pay_date,
        })
        .await?;
    Ok(ApiResponse::named("salary", record))
}

#[utoipa::path(
    get,
    path = "/api/salary/{employee_id}",
    tag = "Salary",
    security(("bearer_auth" = [])),
    params(("employee_id" = Uuid, Path, description = "Employee ID")),
    responses((status = 200, description = "Pay history, latest first", body = Vec<SalaryView>))
)]
pub async fn employee_salaries(
    State(state): State<AppState>,
    Path(employee_id): Path<Uuid>,
) -> AppResult<ApiResponse<Named<Vec<SalaryView>>>> {
    let salaries = state.salary_service.list_for_employee(employee_id).await?;
    Ok(ApiResponse::named("salary", salaries))
}
