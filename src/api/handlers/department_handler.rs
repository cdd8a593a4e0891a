//! Department handlers (admin).

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use common::AppResult;
use domain::{Capability, Department, DepartmentPatch};

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::guarded;
use crate::api::AppState;
use crate::types::{ApiResponse, Named};

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct AddDepartmentRequest {
    #[serde(alias = "dep_name", alias = "depName")]
    #[validate(length(min = 1, message = "Department name is required"))]
    #[schema(example = "Engineering")]
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateDepartmentRequest {
    #[serde(alias = "dep_name", alias = "depName")]
    #[validate(length(min = 1, message = "Department name is required"))]
    pub name: Option<String>,
    pub description: Option<String>,
}

pub fn department_routes() -> Router<AppState> {
    guarded(
        Capability::ManageDepartments,
        Router::new()
            .route("/", get(list_departments))
            .route("/add", post(add_department))
            .route(
                "/:id",
                get(get_department)
                    .put(update_department)
                    .delete(delete_department),
            ),
    )
}

#[utoipa::path(
    get,
    path = "/api/department",
    tag = "Departments",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All departments by name", body = Vec<Department>),
        (status = 403, description = "Admin only")
    )
)]
pub async fn list_departments(
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Named<Vec<Department>>>> {
    let departments = state.department_service.list().await?;
    Ok(ApiResponse::named("departments", departments))
}

#[utoipa::path(
    post,
    path = "/api/department/add",
    tag = "Departments",
    security(("bearer_auth" = [])),
    request_body = AddDepartmentRequest,
    responses(
        (status = 200, description = "Department created", body = Department),
        (status = 400, description = "Validation error")
    )
)]
pub async fn add_department(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<AddDepartmentRequest>,
) -> AppResult<ApiResponse<Named<Department>>> {
    let department = state
        .department_service
        .create(payload.name, payload.description)
        .await?;
    Ok(ApiResponse::named("department", department))
}

#[utoipa::path(
    get,
    path = "/api/department/{id}",
    tag = "Departments",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Department ID")),
    responses(
        (status = 200, description = "Department", body = Department),
        (status = 404, description = "Department not found")
    )
)]
pub async fn get_department(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<ApiResponse<Named<Department>>> {
    let department = state.department_service.get(id).await?;
    Ok(ApiResponse::named("department", department))
}

#[utoipa::path(
    put,
    path = "/api/department/{id}",
    tag = "Departments",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Department ID")),
    request_body = UpdateDepartmentRequest,
    responses(
        (status = 200, description = "Updated department", body = Department),
        (status = 404, description = "Department not found")
    )
)]
pub async fn update_department(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateDepartmentRequest>,
) -> AppResult<ApiResponse<Named<Department>>> {
    let department = state
        .department_service
        .update(
            id,
            DepartmentPatch {
                name: payload.name,
                description: payload.description,
            },
        )
        .await?;
    Ok(ApiResponse::named("department", department))
}

#[utoipa::path(
    delete,
    path = "/api/department/{id}",
    tag = "Departments",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Department ID")),
    responses(
        (status = 200, description = "Department deleted"),
        (status = 400, description = "Employees still assigned"),
        (status = 404, description = "Department not found")
    )
)]
pub async fn delete_department(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<ApiResponse<()>> {
    state.department_service.delete(id).await?;
    Ok(ApiResponse::message("Deleted successfully"))
}
