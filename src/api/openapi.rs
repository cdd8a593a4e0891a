//! OpenAPI documentation served through Swagger UI.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use domain::{
    AccountResponse, AttendanceRecord, AttendanceReport, AttendanceStatus, AttendanceSummary,
    AttendanceView, DashboardSummary, Department, DepartmentRef, EmployeeBrief, EmployeeProfile,
    Gender, LeaveRequest, LeaveStats, LeaveStatus, LeaveType, LeaveView, MaritalStatus, Role,
    SalaryRecord, SalaryView,
};

use crate::api::handlers::{
    attendance_handler, auth_handler, dashboard_handler, department_handler, employee_handler,
    leave_handler, salary_handler,
};
use crate::services::LoginResponse;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Employee Management System",
        version = "0.1.0",
        description = "Departments, employees, attendance, leave and payroll records",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:5000", description = "Local development server")
    ),
    paths(
        auth_handler::login,
        auth_handler::me,
        auth_handler::change_password,
        auth_handler::register,
        department_handler::list_departments,
        department_handler::add_department,
        department_handler::get_department,
        department_handler::update_department,
        department_handler::delete_department,
        employee_handler::add_employee,
        employee_handler::list_employees,
        employee_handler::list_by_department,
        employee_handler::get_employee,
        employee_handler::update_employee,
        employee_handler::delete_employee,
        employee_handler::my_profile,
        employee_handler::my_salary,
        attendance_handler::mark_attendance,
        attendance_handler::list_attendance,
        attendance_handler::attendance_report,
        attendance_handler::update_attendance,
        attendance_handler::delete_attendance,
        attendance_handler::my_attendance,
        leave_handler::my_leaves,
        leave_handler::apply_leave,
        leave_handler::list_leaves,
        leave_handler::decide_leave,
        salary_handler::add_salary,
        salary_handler::employee_salaries,
        dashboard_handler::summary,
    ),
    components(
        schemas(
            Role,
            AccountResponse,
            Department,
            DepartmentRef,
            Gender,
            MaritalStatus,
            EmployeeBrief,
            EmployeeProfile,
            AttendanceStatus,
            AttendanceRecord,
            AttendanceView,
            AttendanceSummary,
            AttendanceReport,
            LeaveType,
            LeaveStatus,
            LeaveRequest,
            LeaveView,
            SalaryRecord,
            SalaryView,
            LeaveStats,
            DashboardSummary,
            LoginResponse,
            auth_handler::LoginRequest,
            auth_handler::LoginEnvelope,
            auth_handler::ChangePasswordRequest,
            auth_handler::RegisterRequest,
            department_handler::AddDepartmentRequest,
            department_handler::UpdateDepartmentRequest,
            employee_handler::AddEmployeeRequest,
            employee_handler::UpdateEmployeeRequest,
            attendance_handler::MarkAttendanceRequest,
            attendance_handler::UpdateAttendanceRequest,
            leave_handler::ApplyLeaveRequest,
            leave_handler::DecideLeaveRequest,
            salary_handler::AddSalaryRequest,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Login, tokens and passwords"),
        (name = "Departments", description = "Department directory"),
        (name = "Employees", description = "Employee directory and self-service profile"),
        (name = "Attendance", description = "Daily attendance ledger"),
        (name = "Leave", description = "Leave requests and decisions"),
        (name = "Salary", description = "Payroll records"),
        (name = "Dashboard", description = "Organization-wide figures")
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for JWT Bearer authentication
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT token obtained from /api/auth/login"))
                        .build(),
                ),
            );
        }
    }
}
