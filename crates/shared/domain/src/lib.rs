//! Domain layer - entities, value objects and business rules of the
//! employee management system.
//!
//! Pure logic only: no database, HTTP or runtime dependencies.

mod labels;

pub mod account;
pub mod attendance;
pub mod constants;
pub mod department;
pub mod employee;
pub mod error;
pub mod leave;
pub mod password;
pub mod policy;
pub mod report;
pub mod salary;

pub use account::{Account, AccountResponse, Role};
pub use attendance::{
    normalize_time_of_day, working_hours, AttendanceFilter, AttendancePatch, AttendanceRecord,
    AttendanceStatus, AttendanceView, MarkAttendance, MarkOutcome,
};
pub use constants::*;
pub use department::{Department, DepartmentPatch};
pub use employee::{
    DepartmentRef, Employee, EmployeeBrief, EmployeePatch, EmployeeProfile, Gender, MaritalStatus,
    NewEmployee,
};
pub use error::{DomainError, DomainResult};
pub use leave::{LeaveApplication, LeaveDecision, LeaveRequest, LeaveStatus, LeaveType, LeaveView};
pub use password::Password;
pub use policy::Capability;
pub use report::{month_window, AttendanceReport, AttendanceSummary, DashboardSummary, LeaveStats};
pub use salary::{net_salary, Amount, NewSalaryRecord, SalaryRecord, SalaryView};
