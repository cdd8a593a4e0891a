//! Batch joins of directory data onto ledger rows.
//!
//! Ledger tables only hold ids. Views need the employee code, account
//! name/email and department name, so a listing loads each referenced
//! table once instead of once per row.

use std::collections::{HashMap, HashSet};

use uuid::Uuid;

use common::AppResult;
use domain::{Account, Department, Employee, EmployeeBrief, EmployeeProfile};

use super::container::parallel;
use crate::infra::UnitOfWork;

#[derive(Debug, Default)]
pub(crate) struct Lookup {
    employees: HashMap<Uuid, Employee>,
    accounts: HashMap<Uuid, Account>,
    departments: HashMap<Uuid, Department>,
}

fn unique(ids: impl IntoIterator<Item = Uuid>) -> Vec<Uuid> {
    let mut seen = HashSet::new();
    ids.into_iter().filter(|id| seen.insert(*id)).collect()
}

impl Lookup {
    /// Load the given employees plus their accounts and departments.
    /// `extra_accounts` adds accounts referenced directly, e.g. markers.
    pub async fn for_employee_ids<U: UnitOfWork>(
        uow: &U,
        employee_ids: impl IntoIterator<Item = Uuid>,
        extra_accounts: impl IntoIterator<Item = Uuid>,
    ) -> AppResult<Self> {
        let employee_ids = unique(employee_ids);
        let employees = if employee_ids.is_empty() {
            Vec::new()
        } else {
            uow.employees().find_by_ids(&employee_ids).await?
        };
        Self::for_employees(uow, employees, extra_accounts).await
    }

    /// Join already-loaded employees with their accounts and departments.
    pub async fn for_employees<U: UnitOfWork>(
        uow: &U,
        employees: Vec<Employee>,
        extra_accounts: impl IntoIterator<Item = Uuid>,
    ) -> AppResult<Self> {
        let account_ids = unique(employees.iter().map(|e| e.account_id).chain(extra_accounts));
        let department_ids = unique(employees.iter().map(|e| e.department_id));

        let accounts_repo = uow.accounts();
        let departments_repo = uow.departments();
        let (accounts, departments) = parallel::join2(
            async {
                if account_ids.is_empty() {
                    Ok(Vec::new())
                } else {
                    accounts_repo.find_by_ids(&account_ids).await
                }
            },
            async {
                if department_ids.is_empty() {
                    Ok(Vec::new())
                } else {
                    departments_repo.find_by_ids(&department_ids).await
                }
            },
        )
        .await?;

        Ok(Self {
            employees: employees.into_iter().map(|e| (e.id, e)).collect(),
            accounts: accounts.into_iter().map(|a| (a.id, a)).collect(),
            departments: departments.into_iter().map(|d| (d.id, d)).collect(),
        })
    }

    /// Display fields for an employee, `None` if it no longer exists.
    pub fn brief(&self, employee_id: Uuid) -> Option<EmployeeBrief> {
        let employee = self.employees.get(&employee_id)?;
        Some(EmployeeBrief::new(
            employee,
            self.accounts.get(&employee.account_id),
            self.departments.get(&employee.department_id),
        ))
    }

    pub fn account_name(&self, account_id: Uuid) -> Option<String> {
        self.accounts.get(&account_id).map(|a| a.name.clone())
    }

    /// Profiles for every loaded employee, in `order`.
    pub fn profiles(self, order: &[Uuid]) -> Vec<EmployeeProfile> {
        let Lookup {
            mut employees,
            accounts,
            departments,
        } = self;

        order
            .iter()
            .filter_map(|id| employees.remove(id))
            .map(|employee| {
                let account = accounts.get(&employee.account_id);
                let department = departments.get(&employee.department_id);
                EmployeeProfile::new(employee, account, department)
            })
            .collect()
    }
}
