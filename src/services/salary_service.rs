//! Salary ledger.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use common::{AppResult, OptionExt};
use domain::{NewSalaryRecord, SalaryRecord, SalaryView};

use super::lookup::Lookup;
use crate::infra::UnitOfWork;

#[async_trait]
pub trait SalaryService: Send + Sync {
    async fn add_record(&self, input: NewSalaryRecord) -> AppResult<SalaryRecord>;

    /// Pay history, latest pay date first.
    async fn list_for_employee(&self, employee_id: Uuid) -> AppResult<Vec<SalaryView>>;

    async fn list_for_account(&self, account_id: Uuid) -> AppResult<Vec<SalaryView>>;
}

pub struct SalaryManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> SalaryManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> SalaryService for SalaryManager<U> {
    async fn add_record(&self, input: NewSalaryRecord) -> AppResult<SalaryRecord> {
        self.uow
            .employees()
            .find_by_id(input.employee_id)
            .await?
            .ok_or_not_found("Employee")?;

        let record = self.uow.salaries().create(SalaryRecord::new(input)?).await?;

        tracing::info!(
            salary_id = %record.id,
            employee_id = %record.employee_id,
            pay_date = %record.pay_date,
            "Salary record added"
        );
        Ok(record)
    }

    async fn list_for_employee(&self, employee_id: Uuid) -> AppResult<Vec<SalaryView>> {
        let records = self.uow.salaries().list_for_employee(employee_id).await?;
        if records.is_empty() {
            return Ok(Vec::new());
        }

        let lookup = Lookup::for_employee_ids(self.uow.as_ref(), [employee_id], []).await?;
        let employee = lookup.brief(employee_id);

        Ok(records
            .into_iter()
            .map(|record| SalaryView {
                record,
                employee: employee.clone(),
            })
            .collect())
    }

    async fn list_for_account(&self, account_id: Uuid) -> AppResult<Vec<SalaryView>> {
        let employee = self
            .uow
            .employees()
            .find_by_account(account_id)
            .await?
            .ok_or_not_found("Employee record")?;
        self.list_for_employee(employee.id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testing::{self, TestUnitOfWork};
    use chrono::NaiveDate;
    use common::AppError;

    fn input(employee_id: Uuid, basic: i64, allowances: i64, deductions: i64) -> NewSalaryRecord {
        NewSalaryRecord {
            employee_id,
            basic_salary: basic,
            allowances,
            deductions,
            pay_date: NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
        }
    }

    #[tokio::test]
    async fn negative_net_is_stored_as_computed() {
        let employee = testing::employee(Uuid::new_v4(), Uuid::new_v4());
        let employee_id = employee.id;

        let mut uow = TestUnitOfWork::default();
        uow.employees
            .expect_find_by_id()
            .returning(move |_| Ok(Some(employee.clone())));
        uow.salaries.expect_create().returning(Ok);

        let record = SalaryManager::new(uow.build())
            .add_record(input(employee_id, 1000, 200, 1500))
            .await
            .unwrap();
        assert_eq!(record.net_salary, -300);
    }

    #[tokio::test]
    async fn unknown_employee_gets_no_record() {
        let mut uow = TestUnitOfWork::default();
        uow.employees.expect_find_by_id().returning(|_| Ok(None));
        uow.salaries.expect_create().never();

        let result = SalaryManager::new(uow.build())
            .add_record(input(Uuid::new_v4(), 5000, 0, 0))
            .await;
        assert!(matches!(result, Err(AppError::NotFound(entity)) if entity == "Employee"));
    }

    #[tokio::test]
    async fn history_is_joined_with_the_employee() {
        let department = testing::department("Finance");
        let employee = testing::employee(Uuid::new_v4(), department.id);
        let employee_id = employee.id;
        let record = SalaryRecord::new(input(employee_id, 5000, 500, 100)).unwrap();

        let mut uow = TestUnitOfWork::default();
        uow.salaries
            .expect_list_for_employee()
            .returning(move |_| Ok(vec![record.clone()]));
        uow.employees
            .expect_find_by_ids()
            .returning(move |_| Ok(vec![employee.clone()]));
        uow.accounts.expect_find_by_ids().returning(|_| Ok(vec![]));
        uow.departments
            .expect_find_by_ids()
            .returning(move |_| Ok(vec![department.clone()]));

        let views = SalaryManager::new(uow.build())
            .list_for_employee(employee_id)
            .await
            .unwrap();

        assert_eq!(views[0].record.net_salary, 5400);
        let employee = views[0].employee.as_ref().unwrap();
        assert_eq!(employee.department.as_deref(), Some("Finance"));
    }
}
