//! Attendance ledger repository.

use async_trait::async_trait;
use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder,
};
use uuid::Uuid;

use common::{AppError, AppResult};
use domain::{AttendanceFilter, AttendanceRecord};

use super::entities::attendance::{self, ActiveModel, Entity as AttendanceEntity};
use super::{insert_error, update_error};

#[cfg(test)]
use mockall::automock;

#[cfg_attr(test, automock)]
#[async_trait]
pub trait AttendanceRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<AttendanceRecord>>;

    async fn find_by_employee_and_date(
        &self,
        employee_id: Uuid,
        date: NaiveDate,
    ) -> AppResult<Option<AttendanceRecord>>;

    /// Matching records, newest date first.
    async fn list(&self, filter: AttendanceFilter) -> AppResult<Vec<AttendanceRecord>>;

    /// Insert. A second record for the same (employee, date) yields
    /// `Conflict("Attendance")`.
    async fn create(&self, record: AttendanceRecord) -> AppResult<AttendanceRecord>;

    async fn update(&self, record: AttendanceRecord) -> AppResult<AttendanceRecord>;

    async fn delete(&self, id: Uuid) -> AppResult<()>;
}

pub struct AttendanceStore {
    db: DatabaseConnection,
}

impl AttendanceStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn filter_condition(filter: &AttendanceFilter) -> Condition {
    let mut condition = Condition::all();
    if let Some(employee_id) = filter.employee_id {
        condition = condition.add(attendance::Column::EmployeeId.eq(employee_id));
    }
    if let Some(start) = filter.start_date {
        condition = condition.add(attendance::Column::Date.gte(start));
    }
    if let Some(end) = filter.end_date {
        condition = condition.add(attendance::Column::Date.lte(end));
    }
    if let Some(status) = filter.status {
        condition = condition.add(attendance::Column::Status.eq(status.as_str()));
    }
    condition
}

#[async_trait]
impl AttendanceRepository for AttendanceStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<AttendanceRecord>> {
        AttendanceEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .map(AttendanceRecord::try_from)
            .transpose()
    }

    async fn find_by_employee_and_date(
        &self,
        employee_id: Uuid,
        date: NaiveDate,
    ) -> AppResult<Option<AttendanceRecord>> {
        AttendanceEntity::find()
            .filter(attendance::Column::EmployeeId.eq(employee_id))
            .filter(attendance::Column::Date.eq(date))
            .one(&self.db)
            .await?
            .map(AttendanceRecord::try_from)
            .transpose()
    }

    async fn list(&self, filter: AttendanceFilter) -> AppResult<Vec<AttendanceRecord>> {
        let models = AttendanceEntity::find()
            .filter(filter_condition(&filter))
            .order_by_desc(attendance::Column::Date)
            .order_by_desc(attendance::Column::CreatedAt)
            .all(&self.db)
            .await?;
        models.into_iter().map(AttendanceRecord::try_from).collect()
    }

    async fn create(&self, record: AttendanceRecord) -> AppResult<AttendanceRecord> {
        let model = ActiveModel::from(&record)
            .insert(&self.db)
            .await
            .map_err(|e| insert_error(e, "Attendance"))?;
        AttendanceRecord::try_from(model)
    }

    async fn update(&self, record: AttendanceRecord) -> AppResult<AttendanceRecord> {
        let model = ActiveModel::from(&record)
            .update(&self.db)
            .await
            .map_err(|e| update_error(e, "Attendance record"))?;
        AttendanceRecord::try_from(model)
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = AttendanceEntity::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(AppError::not_found("Attendance record"));
        }
        Ok(())
    }
}
