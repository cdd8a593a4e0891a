//! Salary ledger repository. Append-only: no update or delete.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
};
use uuid::Uuid;

use common::AppResult;
use domain::SalaryRecord;

use super::entities::salary::{self, ActiveModel, Entity as SalaryEntity};

#[cfg(test)]
use mockall::automock;

#[cfg_attr(test, automock)]
#[async_trait]
pub trait SalaryRepository: Send + Sync {
    async fn create(&self, record: SalaryRecord) -> AppResult<SalaryRecord>;

    /// One employee's pay records, latest pay date first.
    async fn list_for_employee(&self, employee_id: Uuid) -> AppResult<Vec<SalaryRecord>>;
}

pub struct SalaryStore {
    db: DatabaseConnection,
}

impl SalaryStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SalaryRepository for SalaryStore {
    async fn create(&self, record: SalaryRecord) -> AppResult<SalaryRecord> {
        let model = ActiveModel::from(&record).insert(&self.db).await?;
        Ok(SalaryRecord::from(model))
    }

    async fn list_for_employee(&self, employee_id: Uuid) -> AppResult<Vec<SalaryRecord>> {
        let models = SalaryEntity::find()
            .filter(salary::Column::EmployeeId.eq(employee_id))
            .order_by_desc(salary::Column::PayDate)
            .order_by_desc(salary::Column::CreatedAt)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(SalaryRecord::from).collect())
    }
}
