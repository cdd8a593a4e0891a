//! Repository layer - Data access abstraction
//!
//! Each repository is a trait (mocked in tests) plus a SeaORM-backed
//! store. Query bodies are free functions generic over the connection so
//! that the pooled stores and the transaction-scoped repositories share
//! them.

mod account_repository;
mod attendance_repository;
mod department_repository;
pub(crate) mod entities;
mod employee_repository;
mod leave_repository;
mod salary_repository;

use sea_orm::{DbErr, SqlErr};

use common::AppError;

pub use account_repository::{AccountRepository, AccountStore};
pub use attendance_repository::{AttendanceRepository, AttendanceStore};
pub use department_repository::{DepartmentRepository, DepartmentStore};
pub use employee_repository::{EmployeeRepository, EmployeeStore};
pub use leave_repository::{LeaveRepository, LeaveStore};
pub use salary_repository::{SalaryRepository, SalaryStore};

pub(crate) use account_repository::queries as account_queries;
pub(crate) use employee_repository::queries as employee_queries;

#[cfg(test)]
pub use account_repository::MockAccountRepository;
#[cfg(test)]
pub use attendance_repository::MockAttendanceRepository;
#[cfg(test)]
pub use department_repository::MockDepartmentRepository;
#[cfg(test)]
pub use employee_repository::MockEmployeeRepository;
#[cfg(test)]
pub use leave_repository::MockLeaveRepository;
#[cfg(test)]
pub use salary_repository::MockSalaryRepository;

/// Map a failed insert: unique index violations become `Conflict(field)`.
pub(crate) fn insert_error(err: DbErr, field: &str) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => AppError::conflict(field),
        _ => AppError::Database(err),
    }
}

/// Map a failed update: a vanished row becomes `NotFound(entity)`.
pub(crate) fn update_error(err: DbErr, entity: &str) -> AppError {
    match err {
        DbErr::RecordNotUpdated => AppError::not_found(entity),
        other => AppError::Database(other),
    }
}
