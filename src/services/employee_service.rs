//! Employee directory. An employee is a login account plus a directory
//! entry; both are created together.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use common::{AppError, AppResult, OptionExt};
use domain::{Account, Employee, EmployeePatch, EmployeeProfile, NewEmployee, Password};

use super::lookup::Lookup;
use crate::infra::UnitOfWork;
use crate::with_transaction;

#[async_trait]
pub trait EmployeeService: Send + Sync {
    async fn create(&self, input: NewEmployee) -> AppResult<EmployeeProfile>;

    async fn list(&self) -> AppResult<Vec<EmployeeProfile>>;

    async fn get(&self, id: Uuid) -> AppResult<EmployeeProfile>;

    async fn list_by_department(&self, department_id: Uuid) -> AppResult<Vec<EmployeeProfile>>;

    async fn update(&self, id: Uuid, patch: EmployeePatch) -> AppResult<EmployeeProfile>;

    /// Removes the directory entry only.
    async fn delete(&self, id: Uuid) -> AppResult<()>;

    /// The caller's own profile.
    async fn profile_for_account(&self, account_id: Uuid) -> AppResult<EmployeeProfile>;
}

pub struct EmployeeManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> EmployeeManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    async fn ensure_department(&self, department_id: Uuid) -> AppResult<()> {
        self.uow
            .departments()
            .find_by_id(department_id)
            .await?
            .ok_or_not_found("Department")
            .map(|_| ())
    }

    async fn profiles(&self, employees: Vec<Employee>) -> AppResult<Vec<EmployeeProfile>> {
        let order: Vec<Uuid> = employees.iter().map(|e| e.id).collect();
        let lookup = Lookup::for_employees(self.uow.as_ref(), employees, []).await?;
        Ok(lookup.profiles(&order))
    }

    async fn profile(&self, employee: Employee) -> AppResult<EmployeeProfile> {
        self.profiles(vec![employee])
            .await?
            .pop()
            .ok_or_not_found("Employee")
    }
}

fn require_name(name: &str) -> AppResult<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(AppError::validation("Name is required"));
    }
    Ok(trimmed.to_string())
}

#[async_trait]
impl<U: UnitOfWork> EmployeeService for EmployeeManager<U> {
    async fn create(&self, input: NewEmployee) -> AppResult<EmployeeProfile> {
        let name = require_name(&input.name)?;
        self.ensure_department(input.department_id).await?;

        if self.uow.accounts().find_by_email(&input.email).await?.is_some() {
            return Err(AppError::conflict("email"));
        }
        if self
            .uow
            .employees()
            .find_by_code(&input.employee_code)
            .await?
            .is_some()
        {
            return Err(AppError::conflict("employeeId"));
        }

        let hash = Password::new(&input.password)?.into_string();
        let account = Account::new(name, input.email.clone(), hash, input.role);
        let employee = Employee::new(account.id, &input);

        let employee = with_transaction!(self.uow, |ctx| {
            ctx.accounts().create(&account).await?;
            ctx.employees().create(&employee).await
        })?;

        tracing::info!(
            employee_id = %employee.id,
            employee_code = %employee.employee_code,
            "Employee created"
        );
        self.profile(employee).await
    }

    async fn list(&self) -> AppResult<Vec<EmployeeProfile>> {
        let employees = self.uow.employees().list().await?;
        self.profiles(employees).await
    }

    async fn get(&self, id: Uuid) -> AppResult<EmployeeProfile> {
        let employee = self
            .uow
            .employees()
            .find_by_id(id)
            .await?
            .ok_or_not_found("Employee")?;
        self.profile(employee).await
    }

    async fn list_by_department(&self, department_id: Uuid) -> AppResult<Vec<EmployeeProfile>> {
        let employees = self.uow.employees().list_by_department(department_id).await?;
        self.profiles(employees).await
    }

    async fn update(&self, id: Uuid, patch: EmployeePatch) -> AppResult<EmployeeProfile> {
        let mut employee = self
            .uow
            .employees()
            .find_by_id(id)
            .await?
            .ok_or_not_found("Employee")?;

        if let Some(department_id) = patch.department_id {
            self.ensure_department(department_id).await?;
        }
        employee.apply(&patch);

        let employee = match &patch.name {
            Some(name) => {
                let mut account = self
                    .uow
                    .accounts()
                    .find_by_id(employee.account_id)
                    .await?
                    .ok_or_not_found("User")?;
                account.rename(require_name(name)?);

                with_transaction!(self.uow, |ctx| {
                    ctx.accounts().update(&account).await?;
                    ctx.employees().update(&employee).await
                })?
            }
            None => self.uow.employees().update(employee).await?,
        };

        tracing::info!(employee_id = %employee.id, "Employee updated");
        self.profile(employee).await
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        self.uow.employees().delete(id).await?;
        tracing::info!(employee_id = %id, "Employee deleted");
        Ok(())
    }

    async fn profile_for_account(&self, account_id: Uuid) -> AppResult<EmployeeProfile> {
        let employee = self
            .uow
            .employees()
            .find_by_account(account_id)
            .await?
            .ok_or_not_found("Employee record")?;
        self.profile(employee).await
    }
}
