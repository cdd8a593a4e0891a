//! Rate limiting middleware backed by Redis counters.

use std::net::SocketAddr;

use axum::{
    extract::{ConnectInfo, Request, State},
    http::{HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use common::RateLimitConfig;

use crate::api::AppState;
use crate::config::{CACHE_PREFIX_RATE_LIMIT, CACHE_PREFIX_RATE_LIMIT_AUTH};

/// Rate limit error response
#[derive(Debug)]
pub struct RateLimitError {
    pub retry_after: u64,
}

impl IntoResponse for RateLimitError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "success": false,
            "error": "Too many requests. Please try again later.",
            "code": "TOO_MANY_REQUESTS",
        }));

        let mut response = (StatusCode::TOO_MANY_REQUESTS, body).into_response();
        let headers = response.headers_mut();
        headers.insert("Retry-After", HeaderValue::from(self.retry_after));
        headers.insert("X-RateLimit-Remaining", HeaderValue::from_static("0"));
        response
    }
}

/// Client identifier: first `X-Forwarded-For` hop, then `X-Real-IP`,
/// then the socket address.
fn get_client_identifier(request: &Request) -> String {
    if let Some(forwarded) = request
        .headers()
        .get("X-Forwarded-For")
        .and_then(|h| h.to_str().ok())
    {
        if let Some(ip) = forwarded.split(',').next() {
            return ip.trim().to_string();
        }
    }

    if let Some(real_ip) = request
        .headers()
        .get("X-Real-IP")
        .and_then(|h| h.to_str().ok())
    {
        return real_ip.to_string();
    }

    if let Some(connect_info) = request.extensions().get::<ConnectInfo<SocketAddr>>() {
        return connect_info.0.ip().to_string();
    }

    "unknown".to_string()
}

async fn enforce(
    state: &AppState,
    prefix: &str,
    limits: &RateLimitConfig,
    request: Request,
    next: Next,
) -> Result<Response, RateLimitError> {
    let client_id = get_client_identifier(&request);
    let key = format!("{}{}", prefix, client_id);

    let status = match state
        .rate_limiter
        .check_rate_limit(&key, limits.max_requests, limits.window_seconds)
        .await
    {
        Ok(status) => status,
        Err(e) => {
            // Fail closed
            tracing::error!(error = %e, "Rate limit check failed - denying request");
            return Err(RateLimitError {
                retry_after: limits.window_seconds,
            });
        }
    };

    if !status.allowed {
        tracing::warn!(client = %client_id, count = status.count, "Rate limit exceeded");
        return Err(RateLimitError {
            retry_after: status.retry_after,
        });
    }

    let mut response = next.run(request).await;

    let remaining = limits.max_requests.saturating_sub(status.count);
    let headers = response.headers_mut();
    headers.insert("X-RateLimit-Limit", HeaderValue::from(limits.max_requests));
    headers.insert("X-RateLimit-Remaining", HeaderValue::from(remaining));

    Ok(response)
}

/// General limit for every protected route.
pub async fn rate_limit_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, RateLimitError> {
    let limits = state.rate_limits.general.clone();
    enforce(&state, CACHE_PREFIX_RATE_LIMIT, &limits, request, next).await
}

/// Stricter limit for the login endpoint.
pub async fn rate_limit_auth_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, RateLimitError> {
    let limits = state.rate_limits.auth.clone();
    enforce(&state, CACHE_PREFIX_RATE_LIMIT_AUTH, &limits, request, next).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    #[test]
    fn rate_limit_error_carries_retry_after() {
        let response = RateLimitError { retry_after: 42 }.into_response();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(response.headers()["Retry-After"], "42");
    }

    #[test]
    fn forwarded_for_wins_over_real_ip() {
        let request = Request::builder()
            .header("X-Forwarded-For", "203.0.113.7, 10.0.0.1")
            .header("X-Real-IP", "10.0.0.2")
            .body(Body::empty())
            .unwrap();
        assert_eq!(get_client_identifier(&request), "203.0.113.7");
    }

    #[test]
    fn unknown_client_without_headers_or_socket() {
        let request = Request::builder().body(Body::empty()).unwrap();
        assert_eq!(get_client_identifier(&request), "unknown");
    }
}
