//! Infrastructure layer - External systems integration
//!
//! - PostgreSQL via SeaORM: connection, migrations, repositories
//! - Unit of Work for repository access and transactions
//! - Redis for rate limit counters
//! - Health probes

pub mod cache;
pub mod db;
pub mod health;
pub mod repositories;
pub mod unit_of_work;

pub use cache::{Cache, RateLimitStatus, RateLimiter};
pub use db::{Database, Migrator};
pub use health::HealthCheck;
pub use repositories::{
    AccountRepository, AttendanceRepository, DepartmentRepository, EmployeeRepository,
    LeaveRepository, SalaryRepository,
};
pub use unit_of_work::{Persistence, TransactionContext, TxFuture, UnitOfWork};
