//! Application state - Dependency injection container.

use std::sync::Arc;

use common::RateLimitConfig;

use crate::config::Config;
use crate::infra::{Cache, Database, HealthCheck, RateLimiter};
use crate::services::{
    AttendanceService, AuthService, DashboardService, DepartmentService, EmployeeService,
    LeaveService, SalaryService, ServiceContainer, Services,
};

/// Rate limits applied by the middleware.
#[derive(Debug, Clone)]
pub struct RateLimits {
    pub general: RateLimitConfig,
    pub auth: RateLimitConfig,
}

impl From<&Config> for RateLimits {
    fn from(config: &Config) -> Self {
        Self {
            general: config.rate_limit.clone(),
            auth: config.auth_rate_limit.clone(),
        }
    }
}

/// Everything a handler or middleware can reach.
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<dyn AuthService>,
    pub department_service: Arc<dyn DepartmentService>,
    pub employee_service: Arc<dyn EmployeeService>,
    pub attendance_service: Arc<dyn AttendanceService>,
    pub leave_service: Arc<dyn LeaveService>,
    pub salary_service: Arc<dyn SalaryService>,
    pub dashboard_service: Arc<dyn DashboardService>,
    /// Redis-backed request counters
    pub rate_limiter: Arc<dyn RateLimiter>,
    pub rate_limits: RateLimits,
    pub database: Arc<dyn HealthCheck>,
    pub cache: Arc<dyn HealthCheck>,
}

impl AppState {
    /// Build every service on the given connections.
    pub fn from_config(database: Arc<Database>, cache: Arc<Cache>, config: Config) -> Self {
        let rate_limits = RateLimits::from(&config);
        let container = Services::from_connection(database.get_connection(), config);

        Self::new(&container, cache.clone(), rate_limits, database, cache)
    }

    /// Assemble state from an existing container, e.g. one with fakes.
    pub fn new(
        services: &dyn ServiceContainer,
        rate_limiter: Arc<dyn RateLimiter>,
        rate_limits: RateLimits,
        database: Arc<dyn HealthCheck>,
        cache: Arc<dyn HealthCheck>,
    ) -> Self {
        Self {
            auth_service: services.auth(),
            department_service: services.departments(),
            employee_service: services.employees(),
            attendance_service: services.attendance(),
            leave_service: services.leaves(),
            salary_service: services.salaries(),
            dashboard_service: services.dashboard(),
            rate_limiter,
            rate_limits,
            database,
            cache,
        }
    }
}
