//! JWT authentication and capability checks.

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use common::AppError;
use domain::{Capability, Role, BEARER_TOKEN_PREFIX};

use crate::api::AppState;

/// Authenticated account extracted from the bearer token.
#[derive(Clone, Debug)]
pub struct CurrentUser {
    pub account_id: Uuid,
    pub email: String,
    pub role: Role,
}

impl CurrentUser {
    pub fn can(&self, capability: Capability) -> bool {
        self.role.grants(capability)
    }
}

/// Validate the bearer token and insert [`CurrentUser`] into the request
/// extensions.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| AppError::unauthorized("Token not provided"))?;

    let token = auth_header
        .strip_prefix(BEARER_TOKEN_PREFIX)
        .ok_or_else(|| AppError::unauthorized("Token not provided"))?;

    let claims = state.auth_service.verify_token(token)?;

    request.extensions_mut().insert(CurrentUser {
        account_id: claims.sub,
        email: claims.email,
        role: claims.role,
    });

    Ok(next.run(request).await)
}

/// Reject callers whose role lacks the route's capability.
///
/// Must run inside [`auth_middleware`].
pub async fn require_capability(
    State(capability): State<Capability>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let user = request
        .extensions()
        .get::<CurrentUser>()
        .ok_or(AppError::Unauthorized)?;

    if !user.can(capability) {
        tracing::debug!(
            account_id = %user.account_id,
            role = %user.role,
            ?capability,
            "Capability denied"
        );
        return Err(AppError::Forbidden);
    }

    Ok(next.run(request).await)
}
