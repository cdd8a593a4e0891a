//! Organization-wide figures for the admin dashboard.

use std::sync::Arc;

use async_trait::async_trait;

use common::AppResult;
use domain::{DashboardSummary, LeaveStats};

use super::container::parallel;
use crate::infra::UnitOfWork;

#[async_trait]
pub trait DashboardService: Send + Sync {
    async fn summary(&self) -> AppResult<DashboardSummary>;
}

pub struct DashboardManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> DashboardManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> DashboardService for DashboardManager<U> {
    async fn summary(&self) -> AppResult<DashboardSummary> {
        let employees = self.uow.employees();
        let departments = self.uow.departments();
        let leaves = self.uow.leaves();

        let (total_employees, total_departments, monthly_salary, leave_counts) = parallel::join4(
            employees.count(),
            departments.count(),
            employees.total_salary(),
            leaves.count_by_status(),
        )
        .await?;

        Ok(DashboardSummary {
            total_employees,
            total_departments,
            monthly_salary,
            leaves: LeaveStats::from_counts(leave_counts),
        })
    }
}
