//! Router-level tests.
//!
//! Every service is a hand-written fake, so these run without PostgreSQL
//! or Redis and exercise routing, authentication, capability checks,
//! rate limiting and the response envelope.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use chrono::{NaiveDate, Utc};
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use common::{AppError, AppResult, RateLimitConfig};
use domain::{
    Account, AccountResponse, AttendanceFilter, AttendancePatch, AttendanceRecord,
    AttendanceReport, AttendanceView, DashboardSummary, Department, DepartmentPatch,
    EmployeePatch, EmployeeProfile, LeaveApplication, LeaveDecision, LeaveRequest, LeaveType,
    LeaveView, MarkAttendance, MarkOutcome, NewEmployee, NewSalaryRecord, Role, SalaryRecord,
    SalaryView,
};

use ems::api::{create_router, AppState, RateLimits};
use ems::infra::{HealthCheck, RateLimitStatus, RateLimiter};
use ems::services::{
    AttendanceService, AuthService, Claims, DashboardService, DepartmentService,
    EmployeeService, LeaveService, LoginResponse, NewAccount, SalaryService,
};

const ADMIN_TOKEN: &str = "admin-token";
const EMPLOYEE_TOKEN: &str = "employee-token";

// =============================================================================
// Fakes
// =============================================================================

fn unused<T>() -> AppResult<T> {
    Err(AppError::internal("not used by this test"))
}

fn admin_account() -> Account {
    Account::new(
        "Admin".to_string(),
        "admin@example.com".to_string(),
        "hashed".to_string(),
        Role::Admin,
    )
}

struct FakeAuth;

#[async_trait]
impl AuthService for FakeAuth {
    async fn login(&self, identifier: String, password: String) -> AppResult<LoginResponse> {
        let known = identifier == "admin@example.com" || identifier == "EMP001";
        if known && password == "admin123" {
            Ok(LoginResponse {
                token: ADMIN_TOKEN.to_string(),
                token_type: "Bearer".to_string(),
                expires_in: 864_000,
                user: AccountResponse::from(admin_account()),
            })
        } else {
            Err(AppError::InvalidCredentials)
        }
    }

    fn verify_token(&self, token: &str) -> AppResult<Claims> {
        let role = match token {
            ADMIN_TOKEN => Role::Admin,
            EMPLOYEE_TOKEN => Role::Employee,
            _ => return Err(AppError::Unauthorized),
        };

        Ok(Claims {
            sub: Uuid::new_v4(),
            email: "someone@example.com".to_string(),
            role,
            exp: Utc::now().timestamp() + 3600,
            iat: Utc::now().timestamp(),
        })
    }

    async fn me(&self, _account_id: Uuid) -> AppResult<Account> {
        Ok(admin_account())
    }

    async fn change_password(&self, _: Uuid, _: String, _: String) -> AppResult<()> {
        unused()
    }

    async fn register(&self, _input: NewAccount) -> AppResult<Account> {
        unused()
    }
}

struct FakeDepartments;

#[async_trait]
impl DepartmentService for FakeDepartments {
    async fn list(&self) -> AppResult<Vec<Department>> {
        Ok(vec![Department::new("Engineering".to_string(), None)
            .map_err(AppError::from)?])
    }

    async fn get(&self, _id: Uuid) -> AppResult<Department> {
        Err(AppError::not_found("Department"))
    }

    async fn create(&self, _: String, _: Option<String>) -> AppResult<Department> {
        unused()
    }

    async fn update(&self, _: Uuid, _: DepartmentPatch) -> AppResult<Department> {
        unused()
    }

    async fn delete(&self, _id: Uuid) -> AppResult<()> {
        unused()
    }
}

/// Stands in for every service the tests never reach.
struct Unused;

#[async_trait]
impl EmployeeService for Unused {
    async fn create(&self, _: NewEmployee) -> AppResult<EmployeeProfile> {
        unused()
    }
    async fn list(&self) -> AppResult<Vec<EmployeeProfile>> {
        unused()
    }
    async fn get(&self, _: Uuid) -> AppResult<EmployeeProfile> {
        unused()
    }
    async fn list_by_department(&self, _: Uuid) -> AppResult<Vec<EmployeeProfile>> {
        unused()
    }
    async fn update(&self, _: Uuid, _: EmployeePatch) -> AppResult<EmployeeProfile> {
        unused()
    }
    async fn delete(&self, _: Uuid) -> AppResult<()> {
        unused()
    }
    async fn profile_for_account(&self, _: Uuid) -> AppResult<EmployeeProfile> {
        unused()
    }
}

/// Remembers which (employee, day) pairs were marked.
#[derive(Default)]
struct FakeAttendance {
    marked: Mutex<HashSet<(Uuid, NaiveDate)>>,
}

#[async_trait]
impl AttendanceService for FakeAttendance {
    async fn mark(&self, input: MarkAttendance, actor: Uuid) -> AppResult<MarkOutcome> {
        let record = AttendanceRecord::new(&input, actor)?;
        let created = self
            .marked
            .lock()
            .unwrap()
            .insert((input.employee_id, input.date));
        Ok(MarkOutcome { record, created })
    }
    async fn list(&self, _: AttendanceFilter) -> AppResult<Vec<AttendanceView>> {
        unused()
    }
    async fn list_for_account(
        &self,
        _: Uuid,
        _: Option<NaiveDate>,
        _: Option<NaiveDate>,
    ) -> AppResult<Vec<AttendanceView>> {
        Ok(vec![])
    }
    async fn update(&self, _: Uuid, _: AttendancePatch, _: Uuid) -> AppResult<AttendanceRecord> {
        Err(AppError::not_found("Attendance record"))
    }
    async fn delete(&self, _: Uuid) -> AppResult<()> {
        unused()
    }
    async fn report(&self, _: Option<Uuid>, month: u32, year: i32) -> AppResult<AttendanceReport> {
        Ok(AttendanceReport::new(month, year, vec![]))
    }
}

fn sick_leave() -> LeaveApplication {
    LeaveApplication {
        leave_type: LeaveType::Sick,
        start_date: NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
        end_date: NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
        reason: "Flu".to_string(),
    }
}

struct FakeLeaves;

#[async_trait]
impl LeaveService for FakeLeaves {
    async fn apply(&self, _: Uuid, _: LeaveApplication) -> AppResult<LeaveRequest> {
        unused()
    }
    async fn apply_for_account(
        &self,
        _: Uuid,
        application: LeaveApplication,
    ) -> AppResult<LeaveRequest> {
        Ok(LeaveRequest::pending(Uuid::new_v4(), application)?)
    }
    async fn list_for_employee(&self, _: Uuid) -> AppResult<Vec<LeaveRequest>> {
        unused()
    }
    async fn list_for_account(&self, _: Uuid) -> AppResult<Vec<LeaveRequest>> {
        Ok(vec![LeaveRequest::pending(Uuid::new_v4(), sick_leave())?])
    }
    async fn list_all(&self) -> AppResult<Vec<LeaveView>> {
        unused()
    }
    async fn decide(&self, _: Uuid, decision: String, reviewer: Uuid) -> AppResult<LeaveRequest> {
        let decision: LeaveDecision = decision.parse()?;
        let mut leave = LeaveRequest::pending(Uuid::new_v4(), sick_leave())?;
        leave.status = decision.status();
        leave.reviewed_by = Some(reviewer);
        Ok(leave)
    }
}

struct FakeSalaries;

#[async_trait]
impl SalaryService for FakeSalaries {
    async fn add_record(&self, input: NewSalaryRecord) -> AppResult<SalaryRecord> {
        Ok(SalaryRecord::new(input)?)
    }
    async fn list_for_employee(&self, _: Uuid) -> AppResult<Vec<SalaryView>> {
        Ok(vec![])
    }
    async fn list_for_account(&self, _: Uuid) -> AppResult<Vec<SalaryView>> {
        unused()
    }
}

#[async_trait]
impl DashboardService for Unused {
    async fn summary(&self) -> AppResult<DashboardSummary> {
        unused()
    }
}

/// Allows every request until `deny` is set.
#[derive(Default)]
struct FakeLimiter {
    deny: AtomicBool,
}

#[async_trait]
impl RateLimiter for FakeLimiter {
    async fn check_rate_limit(
        &self,
        _key: &str,
        _max: u64,
        window: u64,
    ) -> AppResult<RateLimitStatus> {
        let allowed = !self.deny.load(Ordering::SeqCst);
        Ok(RateLimitStatus {
            count: 1,
            allowed,
            retry_after: if allowed { 0 } else { window },
        })
    }
}

struct Probe {
    up: bool,
}

#[async_trait]
impl HealthCheck for Probe {
    async fn ping(&self) -> AppResult<()> {
        if self.up {
            Ok(())
        } else {
            Err(AppError::internal("connection refused"))
        }
    }
}

// =============================================================================
// Test Helpers
// =============================================================================

fn state(limiter: Arc<FakeLimiter>, cache_up: bool) -> AppState {
    let unused = Arc::new(Unused);
    AppState {
        auth_service: Arc::new(FakeAuth),
        department_service: Arc::new(FakeDepartments),
        employee_service: unused.clone(),
        attendance_service: Arc::new(FakeAttendance::default()),
        leave_service: Arc::new(FakeLeaves),
        salary_service: Arc::new(FakeSalaries),
        dashboard_service: unused,
        rate_limiter: limiter,
        rate_limits: RateLimits {
            general: RateLimitConfig::default(),
            auth: RateLimitConfig::auth(),
        },
        database: Arc::new(Probe { up: true }),
        cache: Arc::new(Probe { up: cache_up }),
    }
}

fn app() -> Router {
    create_router(state(Arc::new(FakeLimiter::default()), true))
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(Method::GET).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    json_request(Method::POST, uri, None, body)
}

fn json_request(method: Method, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

// =============================================================================
// Public Endpoints
// =============================================================================

#[tokio::test]
async fn root_names_the_api() {
    let response = app().oneshot(get("/", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&bytes[..], b"Employee Management System API");
}

#[tokio::test]
async fn health_reports_each_backend() {
    let (status, body) = send(app(), get("/health", None)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["services"]["redis"]["status"], "healthy");
}

#[tokio::test]
async fn health_degrades_when_redis_is_down() {
    let app = create_router(state(Arc::new(FakeLimiter::default()), false));
    let (status, body) = send(app, get("/health", None)).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["services"]["database"]["status"], "healthy");
    assert_eq!(body["services"]["redis"]["status"], "unhealthy");
}

// =============================================================================
// Login
// =============================================================================

#[tokio::test]
async fn login_returns_token_and_user() {
    let request = post_json(
        "/api/auth/login",
        json!({ "email": "admin@example.com", "password": "admin123" }),
    );
    let (status, body) = send(app(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["token"], ADMIN_TOKEN);
    assert_eq!(body["tokenType"], "Bearer");
    assert_eq!(body["user"]["role"], "admin");
}

#[tokio::test]
async fn login_by_employee_code_has_the_email_login_shape() {
    let request = post_json(
        "/api/auth/login",
        json!({ "employeeId": "EMP001", "password": "admin123" }),
    );
    let (status, body) = send(app(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["token"], ADMIN_TOKEN);
    assert_eq!(body["tokenType"], "Bearer");
    assert_eq!(body["user"]["email"], "admin@example.com");
}

#[tokio::test]
async fn login_with_wrong_password_is_unauthorized() {
    let request = post_json(
        "/api/auth/login",
        json!({ "employeeId": "EMP001", "password": "wrong" }),
    );
    let (status, body) = send(app(), request).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn login_requires_both_fields() {
    let request = post_json("/api/auth/login", json!({ "email": "", "password": "" }));
    let (status, body) = send(app(), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

// =============================================================================
// Authentication and Roles
// =============================================================================

#[tokio::test]
async fn protected_route_requires_a_token() {
    let (status, body) = send(app(), get("/api/department", None)).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn invalid_token_is_rejected() {
    let (status, _) = send(app(), get("/api/department", Some("forged"))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn employee_cannot_reach_admin_routes() {
    let (status, body) = send(app(), get("/api/department", Some(EMPLOYEE_TOKEN))).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn admin_lists_departments() {
    let (status, body) = send(app(), get("/api/department", Some(ADMIN_TOKEN))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["departments"][0]["name"], "Engineering");
}

#[tokio::test]
async fn missing_department_is_not_found() {
    let uri = format!("/api/department/{}", Uuid::new_v4());
    let (status, body) = send(app(), get(&uri, Some(ADMIN_TOKEN))).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn me_returns_the_account() {
    let (status, body) = send(app(), get("/api/auth/me", Some(EMPLOYEE_TOKEN))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["email"], "admin@example.com");
}

// =============================================================================
// Attendance, Leave and Salary
// =============================================================================

fn mark_body(employee_id: Uuid) -> Value {
    json!({
        "employeeId": employee_id,
        "date": "2024-03-04",
        "status": "Present",
        "timeIn": "09:00",
        "timeOut": "17:30"
    })
}

#[tokio::test]
async fn marking_twice_creates_then_updates() {
    let app = app();
    let employee_id = Uuid::new_v4();

    let first = json_request(
        Method::POST,
        "/api/attendance/mark",
        Some(ADMIN_TOKEN),
        mark_body(employee_id),
    );
    let (status, body) = send(app.clone(), first).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Attendance marked successfully");
    assert_eq!(body["attendance"]["workingHours"], 8.5);

    let second = json_request(
        Method::POST,
        "/api/attendance/mark",
        Some(ADMIN_TOKEN),
        mark_body(employee_id),
    );
    let (status, body) = send(app, second).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Attendance updated successfully");
}

#[tokio::test]
async fn employee_cannot_manage_attendance_or_salaries() {
    let mark = json_request(
        Method::POST,
        "/api/attendance/mark",
        Some(EMPLOYEE_TOKEN),
        mark_body(Uuid::new_v4()),
    );
    let (status, _) = send(app(), mark).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let report = get("/api/attendance/report?month=3&year=2024", Some(EMPLOYEE_TOKEN));
    let (status, _) = send(app(), report).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let salaries = get(&format!("/api/salary/{}", Uuid::new_v4()), Some(EMPLOYEE_TOKEN));
    let (status, _) = send(app(), salaries).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn employee_reads_own_attendance_and_leaves() {
    let own_attendance = get("/api/attendance/my-attendance", Some(EMPLOYEE_TOKEN));
    let (status, body) = send(app(), own_attendance).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["attendance"], json!([]));

    let (status, body) = send(app(), get("/api/leave/employee", Some(EMPLOYEE_TOKEN))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["leaves"][0]["status"], "Pending");
}

#[tokio::test]
async fn admin_report_echoes_the_month() {
    let request = get("/api/attendance/report?month=3&year=2024", Some(ADMIN_TOKEN));
    let (status, body) = send(app(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["month"], 3);
    assert_eq!(body["year"], 2024);
}

#[tokio::test]
async fn updating_missing_attendance_is_not_found() {
    let uri = format!("/api/attendance/{}", Uuid::new_v4());
    let request = json_request(Method::PUT, &uri, Some(ADMIN_TOKEN), json!({ "status": "Late" }));
    let (status, _) = send(app(), request).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn leave_decision_must_be_approved_or_rejected() {
    let uri = format!("/api/leave/{}", Uuid::new_v4());

    let cancelled = json_request(
        Method::PUT,
        &uri,
        Some(ADMIN_TOKEN),
        json!({ "status": "Cancelled" }),
    );
    let (status, body) = send(app(), cancelled).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);

    let approved = json_request(
        Method::PUT,
        &uri,
        Some(ADMIN_TOKEN),
        json!({ "status": "Approved" }),
    );
    let (status, body) = send(app(), approved).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Leave approved successfully");
    assert_eq!(body["leave"]["status"], "Approved");
}

#[tokio::test]
async fn salary_accepts_employee_alias_and_string_amounts() {
    let request = json_request(
        Method::POST,
        "/api/salary/add",
        Some(ADMIN_TOKEN),
        json!({
            "employee": Uuid::new_v4(),
            "basicSalary": "1000",
            "allowances": 200.0,
            "deductions": "1500",
            "payDate": "2024-03-31"
        }),
    );
    let (status, body) = send(app(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["salary"]["basicSalary"], 1000);
    assert_eq!(body["salary"]["netSalary"], -300);
}

// =============================================================================
// Rate Limiting
// =============================================================================

#[tokio::test]
async fn rate_limited_requests_get_429() {
    let limiter = Arc::new(FakeLimiter::default());
    limiter.deny.store(true, Ordering::SeqCst);
    let app = create_router(state(limiter, true));

    let response = app
        .oneshot(get("/api/department", Some(ADMIN_TOKEN)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    assert!(response.headers().contains_key("Retry-After"));
}
