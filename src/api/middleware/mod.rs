//! API middleware.

mod auth;
mod rate_limit;

use axum::{middleware, Router};

use domain::Capability;

use super::AppState;

pub use auth::{auth_middleware, require_capability, CurrentUser};
pub use rate_limit::{rate_limit_auth_middleware, rate_limit_middleware, RateLimitError};

/// Guard every route of `router` with `capability`.
pub fn guarded(capability: Capability, router: Router<AppState>) -> Router<AppState> {
    router.route_layer(middleware::from_fn_with_state(capability, require_capability))
}

/// Bearer authentication plus the general rate limit. Layers added last
/// run first, so the limiter sees the request before the token check.
pub fn protected(router: Router<AppState>, state: &AppState) -> Router<AppState> {
    router
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            rate_limit_middleware,
        ))
}
