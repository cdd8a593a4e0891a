//! Connectivity probes used by `GET /health`.

use async_trait::async_trait;

use common::AppResult;

#[async_trait]
pub trait HealthCheck: Send + Sync {
    /// Cheap round trip to the backing system.
    async fn ping(&self) -> AppResult<()>;
}
