//! Attendance ledger: at most one record per employee per day.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use common::{AppError, AppResult, OptionExt};
use domain::{
    month_window, AttendanceFilter, AttendancePatch, AttendanceRecord, AttendanceReport,
    AttendanceView, MarkAttendance, MarkOutcome,
};

use super::lookup::Lookup;
use crate::infra::UnitOfWork;

#[async_trait]
pub trait AttendanceService: Send + Sync {
    /// Create the day's record, or overwrite it if one exists.
    async fn mark(&self, input: MarkAttendance, actor: Uuid) -> AppResult<MarkOutcome>;

    async fn list(&self, filter: AttendanceFilter) -> AppResult<Vec<AttendanceView>>;

    async fn list_for_account(
        &self,
        account_id: Uuid,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> AppResult<Vec<AttendanceView>>;

    async fn update(
        &self,
        id: Uuid,
        patch: AttendancePatch,
        actor: Uuid,
    ) -> AppResult<AttendanceRecord>;

    async fn delete(&self, id: Uuid) -> AppResult<()>;

    /// Records and summary for one calendar month.
    async fn report(
        &self,
        employee_id: Option<Uuid>,
        month: u32,
        year: i32,
    ) -> AppResult<AttendanceReport>;
}

pub struct AttendanceManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> AttendanceManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    async fn overwrite(
        &self,
        mut record: AttendanceRecord,
        patch: AttendancePatch,
        actor: Uuid,
    ) -> AppResult<MarkOutcome> {
        record.apply(patch, actor)?;
        let record = self.uow.attendance().update(record).await?;
        Ok(MarkOutcome {
            record,
            created: false,
        })
    }

    async fn views(&self, records: Vec<AttendanceRecord>) -> AppResult<Vec<AttendanceView>> {
        let lookup = Lookup::for_employee_ids(
            self.uow.as_ref(),
            records.iter().map(|r| r.employee_id),
            records.iter().map(|r| r.marked_by),
        )
        .await?;

        Ok(records
            .into_iter()
            .map(|record| AttendanceView {
                employee: lookup.brief(record.employee_id),
                marked_by_name: lookup.account_name(record.marked_by),
                record,
            })
            .collect())
    }
}

#[async_trait]
impl<U: UnitOfWork> AttendanceService for AttendanceManager<U> {
    async fn mark(&self, input: MarkAttendance, actor: Uuid) -> AppResult<MarkOutcome> {
        let patch = AttendancePatch::from(&input);
        patch.validate()?;

        self.uow
            .employees()
            .find_by_id(input.employee_id)
            .await?
            .ok_or_not_found("Employee")?;

        let attendance = self.uow.attendance();
        if let Some(existing) = attendance
            .find_by_employee_and_date(input.employee_id, input.date)
            .await?
        {
            return self.overwrite(existing, patch, actor).await;
        }

        let outcome = match attendance.create(AttendanceRecord::new(&input, actor)?).await {
            Ok(record) => MarkOutcome {
                record,
                created: true,
            },
            Err(AppError::Conflict(_)) => {
                tracing::debug!(
                    employee_id = %input.employee_id,
                    date = %input.date,
                    "Concurrent mark won the insert, updating instead"
                );
                let winner = attendance
                    .find_by_employee_and_date(input.employee_id, input.date)
                    .await?
                    .ok_or_else(|| AppError::conflict("Attendance"))?;
                self.overwrite(winner, patch, actor).await?
            }
            Err(e) => return Err(e),
        };

        tracing::info!(
            employee_id = %input.employee_id,
            date = %input.date,
            status = %outcome.record.status,
            created = outcome.created,
            "Attendance marked"
        );
        Ok(outcome)
    }

    async fn list(&self, filter: AttendanceFilter) -> AppResult<Vec<AttendanceView>> {
        let records = self.uow.attendance().list(filter).await?;
        self.views(records).await
    }

    async fn list_for_account(
        &self,
        account_id: Uuid,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> AppResult<Vec<AttendanceView>> {
        let employee = self
            .uow
            .employees()
            .find_by_account(account_id)
            .await?
            .ok_or_not_found("Employee record")?;

        self.list(AttendanceFilter {
            employee_id: Some(employee.id),
            start_date,
            end_date,
            status: None,
        })
        .await
    }

    async fn update(
        &self,
        id: Uuid,
        patch: AttendancePatch,
        actor: Uuid,
    ) -> AppResult<AttendanceRecord> {
        let record = self
            .uow
            .attendance()
            .find_by_id(id)
            .await?
            .ok_or_not_found("Attendance record")?;

        let outcome = self.overwrite(record, patch, actor).await?;
        tracing::info!(attendance_id = %id, "Attendance updated");
        Ok(outcome.record)
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        self.uow
            .attendance()
            .find_by_id(id)
            .await?
            .ok_or_not_found("Attendance record")?;
        self.uow.attendance().delete(id).await?;

        tracing::info!(attendance_id = %id, "Attendance deleted");
        Ok(())
    }

    async fn report(
        &self,
        employee_id: Option<Uuid>,
        month: u32,
        year: i32,
    ) -> AppResult<AttendanceReport> {
        let (start_date, end_date) = month_window(month, year)?;
        let records = self
            .list(AttendanceFilter {
                employee_id,
                start_date: Some(start_date),
                end_date: Some(end_date),
                status: None,
            })
            .await?;

        Ok(AttendanceReport::new(month, year, records))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testing::{self, TestUnitOfWork};
    use domain::{AttendanceStatus, Role};
    use mockall::predicate::eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn mark_input(employee_id: Uuid) -> MarkAttendance {
        MarkAttendance {
            employee_id,
            date: date(2024, 3, 4),
            status: AttendanceStatus::Present,
            time_in: Some("09:00".into()),
            time_out: Some("17:30".into()),
            remarks: None,
        }
    }

    fn with_employee(uow: &mut TestUnitOfWork) -> Uuid {
        let employee = testing::employee(Uuid::new_v4(), Uuid::new_v4());
        let id = employee.id;
        uow.employees
            .expect_find_by_id()
            .returning(move |_| Ok(Some(employee.clone())));
        id
    }

    #[tokio::test]
    async fn first_mark_creates_with_working_hours() {
        let actor = Uuid::new_v4();
        let mut uow = TestUnitOfWork::default();
        let employee_id = with_employee(&mut uow);
        uow.attendance
            .expect_find_by_employee_and_date()
            .returning(|_, _| Ok(None));
        uow.attendance.expect_create().returning(Ok);

        let outcome = AttendanceManager::new(uow.build())
            .mark(mark_input(employee_id), actor)
            .await
            .unwrap();

        assert!(outcome.created);
        assert_eq!(outcome.record.working_hours, Some(8.5));
        assert_eq!(outcome.record.marked_by, actor);
    }

    #[tokio::test]
    async fn second_mark_updates_the_same_record() {
        let first_actor = Uuid::new_v4();
        let second_actor = Uuid::new_v4();
        let mut uow = TestUnitOfWork::default();
        let employee_id = with_employee(&mut uow);

        let mut earlier = mark_input(employee_id);
        earlier.status = AttendanceStatus::Late;
        earlier.time_out = None;
        let existing = AttendanceRecord::new(&earlier, first_actor).unwrap();
        let existing_id = existing.id;

        uow.attendance
            .expect_find_by_employee_and_date()
            .with(eq(employee_id), eq(date(2024, 3, 4)))
            .returning(move |_, _| Ok(Some(existing.clone())));
        uow.attendance.expect_create().never();
        uow.attendance.expect_update().times(1).returning(Ok);

        let outcome = AttendanceManager::new(uow.build())
            .mark(mark_input(employee_id), second_actor)
            .await
            .unwrap();

        assert!(!outcome.created);
        assert_eq!(outcome.record.id, existing_id);
        assert_eq!(outcome.record.status, AttendanceStatus::Present);
        assert_eq!(outcome.record.working_hours, Some(8.5));
        assert_eq!(outcome.record.marked_by, second_actor);
    }

    #[tokio::test]
    async fn lost_insert_race_becomes_an_update() {
        let actor = Uuid::new_v4();
        let mut uow = TestUnitOfWork::default();
        let employee_id = with_employee(&mut uow);
        let winner = AttendanceRecord::new(&mark_input(employee_id), Uuid::new_v4()).unwrap();
        let winner_id = winner.id;

        let mut calls = 0;
        uow.attendance
            .expect_find_by_employee_and_date()
            .times(2)
            .returning(move |_, _| {
                calls += 1;
                Ok((calls > 1).then(|| winner.clone()))
            });
        uow.attendance
            .expect_create()
            .returning(|_| Err(AppError::conflict("Attendance")));
        uow.attendance.expect_update().times(1).returning(Ok);

        let outcome = AttendanceManager::new(uow.build())
            .mark(mark_input(employee_id), actor)
            .await
            .unwrap();

        assert!(!outcome.created);
        assert_eq!(outcome.record.id, winner_id);
        assert_eq!(outcome.record.marked_by, actor);
    }

    #[tokio::test]
    async fn malformed_time_is_rejected_before_any_lookup() {
        let mut uow = TestUnitOfWork::default();
        uow.employees.expect_find_by_id().never();

        let mut input = mark_input(Uuid::new_v4());
        input.time_in = Some("nine".into());

        let result = AttendanceManager::new(uow.build())
            .mark(input, Uuid::new_v4())
            .await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn marking_an_unknown_employee() {
        let mut uow = TestUnitOfWork::default();
        uow.employees.expect_find_by_id().returning(|_| Ok(None));

        let result = AttendanceManager::new(uow.build())
            .mark(mark_input(Uuid::new_v4()), Uuid::new_v4())
            .await;
        assert!(matches!(result, Err(AppError::NotFound(entity)) if entity == "Employee"));
    }

    #[tokio::test]
    async fn list_joins_employee_and_marker() {
        let marker = testing::account(Role::Admin);
        let marker_id = marker.id;
        let department = testing::department("Engineering");
        let employee = testing::employee(Uuid::new_v4(), department.id);
        let employee_id = employee.id;
        let record = AttendanceRecord::new(&mark_input(employee_id), marker_id).unwrap();

        let mut uow = TestUnitOfWork::default();
        uow.attendance
            .expect_list()
            .returning(move |_| Ok(vec![record.clone()]));
        uow.employees
            .expect_find_by_ids()
            .returning(move |_| Ok(vec![employee.clone()]));
        uow.accounts
            .expect_find_by_ids()
            .returning(move |_| Ok(vec![marker.clone()]));
        uow.departments
            .expect_find_by_ids()
            .returning(move |_| Ok(vec![department.clone()]));

        let views = AttendanceManager::new(uow.build())
            .list(AttendanceFilter::default())
            .await
            .unwrap();

        assert_eq!(views.len(), 1);
        let employee = views[0].employee.as_ref().unwrap();
        assert_eq!(employee.employee_code, "EMP001");
        assert_eq!(employee.department.as_deref(), Some("Engineering"));
        assert_eq!(views[0].marked_by_name.as_deref(), Some("Test User"));
    }

    #[tokio::test]
    async fn report_uses_the_calendar_month() {
        let mut uow = TestUnitOfWork::default();
        uow.attendance
            .expect_list()
            .withf(|filter| {
                filter.start_date == Some(date(2024, 3, 1))
                    && filter.end_date == Some(date(2024, 3, 31))
            })
            .returning(|_| Ok(vec![]));

        let report = AttendanceManager::new(uow.build())
            .report(None, 3, 2024)
            .await
            .unwrap();

        assert_eq!(report.month, 3);
        assert_eq!(report.summary.total_days, 0);
    }

    #[tokio::test]
    async fn report_rejects_month_thirteen() {
        let mut uow = TestUnitOfWork::default();
        uow.attendance.expect_list().never();

        let result = AttendanceManager::new(uow.build()).report(None, 13, 2024).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn update_of_a_missing_record() {
        let mut uow = TestUnitOfWork::default();
        uow.attendance.expect_find_by_id().returning(|_| Ok(None));

        let result = AttendanceManager::new(uow.build())
            .update(Uuid::new_v4(), AttendancePatch::default(), Uuid::new_v4())
            .await;
        assert!(matches!(result, Err(AppError::NotFound(entity)) if entity == "Attendance record"));
    }
}
