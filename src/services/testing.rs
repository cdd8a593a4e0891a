//! Unit of Work over mocked repositories.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use common::{AppError, AppResult};
use domain::{Account, Department, Employee, Role};

use crate::infra::repositories::{
    MockAccountRepository, MockAttendanceRepository, MockDepartmentRepository,
    MockEmployeeRepository, MockLeaveRepository, MockSalaryRepository,
};
use crate::infra::{
    AccountRepository, AttendanceRepository, DepartmentRepository, EmployeeRepository,
    LeaveRepository, SalaryRepository, TransactionContext, TxFuture, UnitOfWork,
};

/// Repositories left at their defaults panic on any call, so a test
/// only configures what the code under test should touch.
#[derive(Default)]
pub(crate) struct TestUnitOfWork {
    pub accounts: MockAccountRepository,
    pub departments: MockDepartmentRepository,
    pub employees: MockEmployeeRepository,
    pub attendance: MockAttendanceRepository,
    pub leaves: MockLeaveRepository,
    pub salaries: MockSalaryRepository,
}

impl TestUnitOfWork {
    pub fn build(self) -> Arc<SealedUnitOfWork> {
        Arc::new(SealedUnitOfWork {
            accounts: Arc::new(self.accounts),
            departments: Arc::new(self.departments),
            employees: Arc::new(self.employees),
            attendance: Arc::new(self.attendance),
            leaves: Arc::new(self.leaves),
            salaries: Arc::new(self.salaries),
        })
    }
}

pub(crate) struct SealedUnitOfWork {
    accounts: Arc<MockAccountRepository>,
    departments: Arc<MockDepartmentRepository>,
    employees: Arc<MockEmployeeRepository>,
    attendance: Arc<MockAttendanceRepository>,
    leaves: Arc<MockLeaveRepository>,
    salaries: Arc<MockSalaryRepository>,
}

#[async_trait]
impl UnitOfWork for SealedUnitOfWork {
    fn accounts(&self) -> Arc<dyn AccountRepository> {
        self.accounts.clone()
    }

    fn departments(&self) -> Arc<dyn DepartmentRepository> {
        self.departments.clone()
    }

    fn employees(&self) -> Arc<dyn EmployeeRepository> {
        self.employees.clone()
    }

    fn attendance(&self) -> Arc<dyn AttendanceRepository> {
        self.attendance.clone()
    }

    fn leaves(&self) -> Arc<dyn LeaveRepository> {
        self.leaves.clone()
    }

    fn salaries(&self) -> Arc<dyn SalaryRepository> {
        self.salaries.clone()
    }

    async fn transaction<F, T>(&self, _f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> TxFuture<'a, T> + Send,
        T: Send,
    {
        // Transactions need a live connection
        Err(AppError::internal("Transactions not supported in test mock"))
    }
}

pub(crate) fn account(role: Role) -> Account {
    Account::new(
        "Test User".into(),
        "test@example.com".into(),
        "hashed".into(),
        role,
    )
}

pub(crate) fn department(name: &str) -> Department {
    let now = Utc::now();
    Department {
        id: Uuid::new_v4(),
        name: name.into(),
        description: None,
        created_at: now,
        updated_at: now,
    }
}

pub(crate) fn employee(account_id: Uuid, department_id: Uuid) -> Employee {
    let now = Utc::now();
    Employee {
        id: Uuid::new_v4(),
        account_id,
        employee_code: "EMP001".into(),
        dob: None,
        gender: None,
        marital_status: None,
        designation: Some("Engineer".into()),
        department_id,
        salary: 50_000,
        created_at: now,
        updated_at: now,
    }
}
