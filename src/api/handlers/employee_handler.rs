//! Employee directory handlers. Admins manage the directory; every
//! account can read its own profile and pay history.

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
use domain::{
    Amount, Capability, EmployeePatch, EmployeeProfile, Gender, MaritalStatus, NewEmployee, Role,
    SalaryView,
};

use super::auth_handler;
use crate::api::extractors::ValidatedJson;
use crate::api::middleware::{guarded, CurrentUser};
use crate::api::AppState;
use crate::types::{ApiResponse, Created, Named};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddEmployeeRequest {
    #[validate(length(min = 1, message = "Name, email, and password are required"))]
    #[schema(example = "Jane Doe")]
    pub name: String,
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "jane@example.com")]
    pub email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
    #[serde(default)]
    pub role: Role,
    /// Company employee code
    #[validate(length(min = 1, message = "Employee ID is required"))]
    #[schema(example = "EMP001")]
    pub employee_id: String,
    pub dob: Option<NaiveDate>,
    pub gender: Option<Gender>,
    pub marital_status: Option<MaritalStatus>,
    pub designation: Option<String>,
    #[serde(alias = "department")]
    pub department_id: Uuid,
    #[serde(default)]
    #[schema(value_type = i64, example = 50000)]
    pub salary: Amount,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEmployeeRequest {
    #[validate(length(min = 1, message = "Name cannot be empty"))]
    pub name: Option<String>,
    pub marital_status: Option<MaritalStatus>,
    pub designation: Option<String>,
    #[serde(alias = "department")]
    pub department_id: Option<Uuid>,
    #[schema(value_type = Option<i64>)]
    pub salary: Option<Amount>,
}

pub fn employee_routes() -> Router<AppState> {
    let directory = guarded(
        Capability::ManageEmployees,
        Router::new()
            .route("/", get(list_employees))
            .route("/add", post(add_employee))
            .route("/department/:id", get(list_by_department))
            .route(
                "/:id",
                get(get_employee).put(update_employee).delete(delete_employee),
            ),
    );

    directory
        .merge(guarded(
            Capability::ViewOwnProfile,
            Router::new().route("/detail", get(my_profile)),
        ))
        .merge(guarded(
            Capability::ViewOwnSalary,
            Router::new().route("/salary", get(my_salary)),
        ))
        .merge(guarded(
            Capability::ChangeOwnPassword,
            Router::new().route("/change-password", put(auth_handler::change_password)),
        ))
}

#[utoipa::path(
    post,
    path = "/api/employee/add",
    tag = "Employees",
    security(("bearer_auth" = [])),
    request_body = AddEmployeeRequest,
    responses(
        (status = 201, description = "Employee and account created", body = EmployeeProfile),
        (status = 400, description = "Validation error, or email / employeeId already exists"),
        (status = 404, description = "Department not found")
    )
)]
pub async fn add_employee(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<AddEmployeeRequest>,
) -> AppResult<Created<Named<EmployeeProfile>>> {
    let employee = state
        .employee_service
        .create(NewEmployee {
            name: payload.name,
            email: payload.email,
            password: payload.password,
            role: payload.role,
            employee_code: payload.employee_id,
            dob: payload.dob,
            gender: payload.gender,
            marital_status: payload.marital_status,
            designation: payload.designation,
            department_id: payload.department_id,
            salary: payload.salary.into(),
        })
        .await?;

    Ok(Created(
        ApiResponse::named("employee", employee).and_message("Employee created"),
    ))
}

#[utoipa::path(
    get,
    path = "/api/employee",
    tag = "Employees",
    security(("bearer_auth" = [])),
    responses((status = 200, description = "All employees", body = Vec<EmployeeProfile>))
)]
pub async fn list_employees(
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Named<Vec<EmployeeProfile>>>> {
    let employees = state.employee_service.list().await?;
    Ok(ApiResponse::named("employees", employees))
}

#[utoipa::path(
    get,
    path = "/api/employee/department/{id}",
    tag = "Employees",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Department ID")),
    responses((status = 200, description = "Employees of the department", body = Vec<EmployeeProfile>))
)]
pub async fn list_by_department(
    State(state): State<AppState>,
    Path(department_id): Path<Uuid>,
) -> AppResult<ApiResponse<Named<Vec<EmployeeProfile>>>> {
    let employees = state
        .employee_service
        .list_by_department(department_id)
        .await?;
    Ok(ApiResponse::named("employees", employees))
}

#[utoipa::path(
    get,
    path = "/api/employee/{id}",
    tag = "Employees",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Employee ID")),
    responses(
        (status = 200, description = "Employee profile", body = EmployeeProfile),
        (status = 404, description = "Employee not found")
    )
)]
pub async fn get_employee(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<ApiResponse<Named<EmployeeProfile>>> {
    let employee = state.employee_service.get(id).await?;
    Ok(ApiResponse::named("employee", employee))
}

#[utoipa::path(
    put,
    path = "/api/employee/{id}",
    tag = "Employees",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Employee ID")),
    request_body = UpdateEmployeeRequest,
    responses(
        (status = 200, description = "Updated profile", body = EmployeeProfile),
        (status = 404, description = "Employee or department not found")
    )
)]
pub async fn update_employee(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateEmployeeRequest>,
) -> AppResult<ApiResponse<Named<EmployeeProfile>>> {
    let patch = EmployeePatch {
        name: payload.name,
        marital_status: payload.marital_status,
        designation: payload.designation,
        department_id: payload.department_id,
        salary: payload.salary.map(i64::from),
    };

    let employee = state.employee_service.update(id, patch).await?;
    Ok(ApiResponse::named("employee", employee))
}

#[utoipa::path(
    delete,
    path = "/api/employee/{id}",
    tag = "Employees",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Employee ID")),
    responses(
        (status = 200, description = "Employee deleted"),
        (status = 404, description = "Employee not found")
    )
)]
pub async fn delete_employee(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<ApiResponse<()>> {
    state.employee_service.delete(id).await?;
    Ok(ApiResponse::message("Deleted"))
}

/// The caller's own profile
#[utoipa::path(
    get,
    path = "/api/employee/detail",
    tag = "Employees",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Own profile", body = EmployeeProfile),
        (status = 404, description = "Employee record not found")
    )
)]
pub async fn my_profile(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Named<EmployeeProfile>>> {
    let employee = state
        .employee_service
        .profile_for_account(current_user.account_id)
        .await?;
    Ok(ApiResponse::named("employee", employee))
}

/// The caller's own pay history
#[utoipa::path(
    get,
    path = "/api/employee/salary",
    tag = "Employees",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Own salary records", body = Vec<SalaryView>),
        (status = 404, description = "Employee record not found")
    )
)]
pub async fn my_salary(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Named<Vec<SalaryView>>>> {
    let salaries = state
        .salary_service
        .list_for_account(current_user.account_id)
        .await?;
    Ok(ApiResponse::named("salaries", salaries))
}
