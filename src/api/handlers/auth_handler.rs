//! Authentication handlers.

use axum::{
    extract::{Extension, State},
    middleware,
    routing::{get, post, put},
    Router,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use common::AppResult;
use domain::{AccountResponse, Capability, Role};

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::{guarded, protected, rate_limit_auth_middleware, CurrentUser};
use crate::api::AppState;
use crate::services::{LoginResponse, NewAccount};
use crate::types::{ApiResponse, Created, Named};

/// Login request. `email` also accepts an employee code.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    /// Email address or employee code
    #[serde(alias = "employeeId", alias = "identifier")]
    #[validate(length(min = 1, message = "Email/Employee ID and password are required"))]
    #[schema(example = "admin@example.com")]
    pub email: String,
    #[validate(length(min = 1, message = "Email/Employee ID and password are required"))]
    #[schema(example = "admin123")]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    #[validate(length(min = 1, message = "Current and new password are required"))]
    pub current_password: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    #[schema(min_length = 6)]
    pub new_password: String,
}

/// Admin-side account creation
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[validate(length(min = 1, message = "Name, email & password are required"))]
    #[schema(example = "Jane Doe")]
    pub name: String,
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "jane@example.com")]
    pub email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
    #[serde(default)]
    pub role: Role,
}

/// Login body: `{"success": true, "token", "tokenType", "expiresIn", "user"}`
#[derive(Debug, Serialize, ToSchema)]
pub struct LoginEnvelope {
    pub success: bool,
    #[serde(flatten)]
    pub login: LoginResponse,
}

/// `/auth` routes. Login is public under the stricter limit; the rest
/// need a token.
pub fn auth_routes(state: &AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/login", post(login))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            rate_limit_auth_middleware,
        ));

    let account = Router::new()
        .merge(guarded(
            Capability::ViewOwnProfile,
            Router::new().route("/me", get(me)),
        ))
        .merge(guarded(
            Capability::ChangeOwnPassword,
            Router::new().route("/change-password", put(change_password)),
        ))
        .merge(guarded(
            Capability::ManageAccounts,
            Router::new().route("/register", post(register)),
        ));

    public.merge(protected(account, state))
}

/// Login with email or employee code
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginEnvelope),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Invalid credentials"),
        (status = 429, description = "Too many attempts")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> AppResult<axum::Json<LoginEnvelope>> {
    let login = state
        .auth_service
        .login(payload.email, payload.password)
        .await?;

    Ok(axum::Json(LoginEnvelope {
        success: true,
        login,
    }))
}

/// The authenticated account
#[utoipa::path(
    get,
    path = "/api/auth/me",
    tag = "Authentication",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current account", body = AccountResponse),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn me(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Named<AccountResponse>>> {
    let account = state.auth_service.me(current_user.account_id).await?;
    Ok(ApiResponse::named("user", AccountResponse::from(account)))
}

/// Change the caller's password
#[utoipa::path(
    put,
    path = "/api/auth/change-password",
    tag = "Authentication",
    security(("bearer_auth" = [])),
    request_body = ChangePasswordRequest,
    responses(
        (status = 200, description = "Password changed"),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Current password is incorrect")
    )
)]
pub async fn change_password(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<ChangePasswordRequest>,
) -> AppResult<ApiResponse<()>> {
    state
        .auth_service
        .change_password(
            current_user.account_id,
            payload.current_password,
            payload.new_password,
        )
        .await?;

    Ok(ApiResponse::message("Password changed successfully"))
}

/// Create an account without an employee record (admin)
#[utoipa::path(
    post,
    path = "/api/auth/register",
    tag = "Authentication",
    security(("bearer_auth" = [])),
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = AccountResponse),
        (status = 400, description = "Validation error or email already exists"),
        (status = 403, description = "Admin only")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<RegisterRequest>,
) -> AppResult<Created<Named<AccountResponse>>> {
    let account = state
        .auth_service
        .register(NewAccount {
            name: payload.name,
            email: payload.email,
            password: payload.password,
            role: payload.role,
        })
        .await?;

    Ok(Created(ApiResponse::named(
        "user",
        AccountResponse::from(account),
    )))
}
