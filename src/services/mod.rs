//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and repositories. Every manager is
//! generic over a [`UnitOfWork`](crate::infra::UnitOfWork) so tests can
//! run them against mocked repositories.

mod attendance_service;
mod auth_service;
pub mod container;
mod dashboard_service;
mod department_service;
mod employee_service;
mod leave_service;
mod lookup;
mod salary_service;

#[cfg(test)]
pub(crate) mod testing;

// Service Container
pub use container::{parallel, ServiceContainer, Services};

// Service traits and implementations
pub use attendance_service::{AttendanceManager, AttendanceService};
pub use auth_service::{AuthService, Authenticator, Claims, LoginResponse, NewAccount};
pub use dashboard_service::{DashboardManager, DashboardService};
pub use department_service::{DepartmentManager, DepartmentService};
pub use employee_service::{EmployeeManager, EmployeeService};
pub use leave_service::{LeaveManager, LeaveService};
pub use salary_service::{SalaryManager, SalaryService};
