//! Service container: one handle to every application service.

use std::future::Future;
use std::sync::Arc;

use common::AppResult;

use super::{
    AttendanceService, AuthService, DashboardService, DepartmentService, EmployeeService,
    LeaveService, SalaryService,
};
use crate::config::Config;
use crate::infra::Persistence;

/// Service container trait for dependency injection.
pub trait ServiceContainer: Send + Sync {
    fn auth(&self) -> Arc<dyn AuthService>;

    fn departments(&self) -> Arc<dyn DepartmentService>;

    fn employees(&self) -> Arc<dyn EmployeeService>;

    fn attendance(&self) -> Arc<dyn AttendanceService>;

    fn leaves(&self) -> Arc<dyn LeaveService>;

    fn salaries(&self) -> Arc<dyn SalaryService>;

    fn dashboard(&self) -> Arc<dyn DashboardService>;
}

/// Concrete implementation of ServiceContainer
pub struct Services {
    auth_service: Arc<dyn AuthService>,
    department_service: Arc<dyn DepartmentService>,
    employee_service: Arc<dyn EmployeeService>,
    attendance_service: Arc<dyn AttendanceService>,
    leave_service: Arc<dyn LeaveService>,
    salary_service: Arc<dyn SalaryService>,
    dashboard_service: Arc<dyn DashboardService>,
}

impl Services {
    /// Wire every service onto one SeaORM-backed Unit of Work.
    pub fn from_connection(db: sea_orm::DatabaseConnection, config: Config) -> Self {
        use super::{
            AttendanceManager, Authenticator, DashboardManager, DepartmentManager,
            EmployeeManager, LeaveManager, SalaryManager,
        };

        let uow = Arc::new(Persistence::new(db));

        Self {
            auth_service: Arc::new(Authenticator::new(uow.clone(), config)),
            department_service: Arc::new(DepartmentManager::new(uow.clone())),
            employee_service: Arc::new(EmployeeManager::new(uow.clone())),
            attendance_service: Arc::new(AttendanceManager::new(uow.clone())),
            leave_service: Arc::new(LeaveManager::new(uow.clone())),
            salary_service: Arc::new(SalaryManager::new(uow.clone())),
            dashboard_service: Arc::new(DashboardManager::new(uow)),
        }
    }
}

impl ServiceContainer for Services {
    fn auth(&self) -> Arc<dyn AuthService> {
        self.auth_service.clone()
    }

    fn departments(&self) -> Arc<dyn DepartmentService> {
        self.department_service.clone()
    }

    fn employees(&self) -> Arc<dyn EmployeeService> {
        self.employee_service.clone()
    }

    fn attendance(&self) -> Arc<dyn AttendanceService> {
        self.attendance_service.clone()
    }

    fn leaves(&self) -> Arc<dyn LeaveService> {
        self.leave_service.clone()
    }

    fn salaries(&self) -> Arc<dyn SalaryService> {
        self.salary_service.clone()
    }

    fn dashboard(&self) -> Arc<dyn DashboardService> {
        self.dashboard_service.clone()
    }
}

/// Run independent reads concurrently.
///
/// The first error wins and the remaining futures are dropped.
pub mod parallel {
    use super::*;
    use tokio::try_join;

    pub async fn join2<F1, F2, T1, T2>(f1: F1, f2: F2) -> AppResult<(T1, T2)>
    where
        F1: Future<Output = AppResult<T1>>,
        F2: Future<Output = AppResult<T2>>,
    {
        try_join!(f1, f2)
    }

    pub async fn join4<F1, F2, F3, F4, T1, T2, T3, T4>(
        f1: F1,
        f2: F2,
        f3: F3,
        f4: F4,
    ) -> AppResult<(T1, T2, T3, T4)>
    where
        F1: Future<Output = AppResult<T1>>,
        F2: Future<Output = AppResult<T2>>,
        F3: Future<Output = AppResult<T3>>,
        F4: Future<Output = AppResult<T4>>,
    {
        try_join!(f1, f2, f3, f4)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::AppError;

    #[tokio::test]
    async fn join2_returns_both_values() {
        async fn op1() -> AppResult<i32> {
            Ok(1)
        }
        async fn op2() -> AppResult<&'static str> {
            Ok("two")
        }

        let (a, b) = parallel::join2(op1(), op2()).await.unwrap();
        assert_eq!(a, 1);
        assert_eq!(b, "two");
    }

    #[tokio::test]
    async fn join4_stops_at_the_first_error() {
        let result = parallel::join4(
            async { Ok::<_, AppError>(1) },
            async { Err::<i32, _>(AppError::not_found("Employee")) },
            async { Ok::<_, AppError>(3) },
            async { Ok::<_, AppError>(4) },
        )
        .await;

        assert!(matches!(result, Err(AppError::NotFound(entity)) if entity == "Employee"));
    }
}
