//! Leave ledger: employees apply, admins approve or reject.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use common::{AppResult, OptionExt};
use domain::{LeaveApplication, LeaveDecision, LeaveRequest, LeaveView};

use super::lookup::Lookup;
use crate::infra::UnitOfWork;

#[async_trait]
pub trait LeaveService: Send + Sync {
    async fn apply(
        &self,
        employee_id: Uuid,
        application: LeaveApplication,
    ) -> AppResult<LeaveRequest>;

    /// Apply on behalf of the employee linked to `account_id`.
    async fn apply_for_account(
        &self,
        account_id: Uuid,
        application: LeaveApplication,
    ) -> AppResult<LeaveRequest>;

    async fn list_for_employee(&self, employee_id: Uuid) -> AppResult<Vec<LeaveRequest>>;

    async fn list_for_account(&self, account_id: Uuid) -> AppResult<Vec<LeaveRequest>>;

    async fn list_all(&self) -> AppResult<Vec<LeaveView>>;

    /// `decision` must be exactly `Approved` or `Rejected`.
    async fn decide(&self, id: Uuid, decision: String, reviewer: Uuid) -> AppResult<LeaveRequest>;
}

pub struct LeaveManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> LeaveManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    async fn employee_id_for(&self, account_id: Uuid) -> AppResult<Uuid> {
        self.uow
            .employees()
            .find_by_account(account_id)
            .await?
            .ok_or_not_found("Employee record")
            .map(|employee| employee.id)
    }
}

#[async_trait]
impl<U: UnitOfWork> LeaveService for LeaveManager<U> {
    async fn apply(
        &self,
        employee_id: Uuid,
        application: LeaveApplication,
    ) -> AppResult<LeaveRequest> {
        let request = LeaveRequest::pending(employee_id, application)?;
        let request = self.uow.leaves().create(request).await?;

        tracing::info!(
            leave_id = %request.id,
            employee_id = %employee_id,
            leave_type = %request.leave_type,
            "Leave applied"
        );
        Ok(request)
    }

    async fn apply_for_account(
        &self,
        account_id: Uuid,
        application: LeaveApplication,
    ) -> AppResult<LeaveRequest> {
        application.validate()?;
        let employee_id = self.employee_id_for(account_id).await?;
        self.apply(employee_id, application).await
    }

    async fn list_for_employee(&self, employee_id: Uuid) -> AppResult<Vec<LeaveRequest>> {
        self.uow.leaves().list_for_employee(employee_id).await
    }

    async fn list_for_account(&self, account_id: Uuid) -> AppResult<Vec<LeaveRequest>> {
        let employee_id = self.employee_id_for(account_id).await?;
        self.list_for_employee(employee_id).await
    }

    async fn list_all(&self) -> AppResult<Vec<LeaveView>> {
        let requests = self.uow.leaves().list_all().await?;
        let lookup = Lookup::for_employee_ids(
            self.uow.as_ref(),
            requests.iter().map(|r| r.employee_id),
            [],
        )
        .await?;

        Ok(requests
            .into_iter()
            .map(|request| LeaveView {
                employee: lookup.brief(request.employee_id),
                request,
            })
            .collect())
    }

    async fn decide(&self, id: Uuid, decision: String, reviewer: Uuid) -> AppResult<LeaveRequest> {
        let decision: LeaveDecision = decision.parse()?;

        let mut request = self
            .uow
            .leaves()
            .find_by_id(id)
            .await?
            .ok_or_not_found("Leave request")?;

        if request.is_decided() {
            tracing::warn!(
                leave_id = %id,
                previous = %request.status,
                next = %decision.status(),
                "Leave request decided again"
            );
        }

        request.decide(decision, reviewer);
        let request = self.uow.leaves().update(request).await?;

        tracing::info!(leave_id = %id, reviewer = %reviewer, "Leave {}", decision.verb());
        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testing::{self, TestUnitOfWork};
    use chrono::NaiveDate;
    use common::AppError;
    use domain::{LeaveStatus, LeaveType};
    use mockall::predicate::eq;

    fn application(start: u32, end: u32, reason: &str) -> LeaveApplication {
        LeaveApplication {
            leave_type: LeaveType::Casual,
            start_date: NaiveDate::from_ymd_opt(2024, 5, start).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 5, end).unwrap(),
            reason: reason.into(),
        }
    }

    #[tokio::test]
    async fn reversed_dates_fail_before_any_lookup() {
        let mut uow = TestUnitOfWork::default();
        uow.employees.expect_find_by_account().never();
        uow.leaves.expect_create().never();

        let result = LeaveManager::new(uow.build())
            .apply_for_account(Uuid::new_v4(), application(10, 8, ""))
            .await;

        assert!(matches!(
            result,
            Err(AppError::Validation(message)) if message == "End date must be after start date"
        ));
    }

    #[tokio::test]
    async fn apply_for_account_creates_a_pending_request() {
        let employee = testing::employee(Uuid::new_v4(), Uuid::new_v4());
        let account_id = employee.account_id;
        let employee_id = employee.id;

        let mut uow = TestUnitOfWork::default();
        uow.employees
            .expect_find_by_account()
            .with(eq(account_id))
            .returning(move |_| Ok(Some(employee.clone())));
        uow.leaves.expect_create().returning(Ok);

        let request = LeaveManager::new(uow.build())
            .apply_for_account(account_id, application(8, 10, "Family event"))
            .await
            .unwrap();

        assert_eq!(request.employee_id, employee_id);
        assert_eq!(request.status, LeaveStatus::Pending);
        assert_eq!(request.reviewed_by, None);
    }

    #[tokio::test]
    async fn caller_without_employee_record_cannot_apply() {
        let mut uow = TestUnitOfWork::default();
        uow.employees.expect_find_by_account().returning(|_| Ok(None));

        let result = LeaveManager::new(uow.build())
            .apply_for_account(Uuid::new_v4(), application(8, 10, "Trip"))
            .await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn unknown_decision_touches_nothing() {
        let mut uow = TestUnitOfWork::default();
        uow.leaves.expect_find_by_id().never();
        uow.leaves.expect_update().never();

        let result = LeaveManager::new(uow.build())
            .decide(Uuid::new_v4(), "Cancelled".into(), Uuid::new_v4())
            .await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn approve_records_the_reviewer() {
        let pending = LeaveRequest::pending(Uuid::new_v4(), application(8, 10, "Trip")).unwrap();
        let id = pending.id;
        let reviewer = Uuid::new_v4();

        let mut uow = TestUnitOfWork::default();
        uow.leaves
            .expect_find_by_id()
            .with(eq(id))
            .returning(move |_| Ok(Some(pending.clone())));
        uow.leaves.expect_update().times(1).returning(Ok);

        let request = LeaveManager::new(uow.build())
            .decide(id, "Approved".into(), reviewer)
            .await
            .unwrap();

        assert_eq!(request.status, LeaveStatus::Approved);
        assert_eq!(request.reviewed_by, Some(reviewer));
        assert!(request.reviewed_at.is_some());
    }

    #[tokio::test]
    async fn deciding_a_missing_request() {
        let mut uow = TestUnitOfWork::default();
        uow.leaves.expect_find_by_id().returning(|_| Ok(None));

        let result = LeaveManager::new(uow.build())
            .decide(Uuid::new_v4(), "Rejected".into(), Uuid::new_v4())
            .await;
        assert!(matches!(result, Err(AppError::NotFound(entity)) if entity == "Leave request"));
    }

    #[tokio::test]
    async fn list_all_keeps_requests_of_deleted_employees() {
        let request = LeaveRequest::pending(Uuid::new_v4(), application(1, 2, "Flu")).unwrap();

        let mut uow = TestUnitOfWork::default();
        uow.leaves
            .expect_list_all()
            .returning(move || Ok(vec![request.clone()]));
        uow.employees.expect_find_by_ids().returning(|_| Ok(vec![]));

        let views = LeaveManager::new(uow.build()).list_all().await.unwrap();

        assert_eq!(views.len(), 1);
        assert!(views[0].employee.is_none());
    }
}
