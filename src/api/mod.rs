//! HTTP layer: routes, handlers, middleware and extractors.
//!
//! Every API route lives under `/api`. Protected groups pass through the
//! general rate limiter, bearer authentication and a capability guard,
//! in that order.

pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod state;

pub use openapi::ApiDoc;
pub use routes::create_router;
pub use state::{AppState, RateLimits};
