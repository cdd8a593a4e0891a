//! Department repository.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder,
};
use uuid::Uuid;

use common::{AppError, AppResult};
use domain::Department;

use super::entities::department::{self, ActiveModel, Entity as DepartmentEntity};
use super::update_error;

#[cfg(test)]
use mockall::automock;

#[cfg_attr(test, automock)]
#[async_trait]
pub trait DepartmentRepository: Send + Sync {
    /// All departments ordered by name.
    async fn list(&self) -> AppResult<Vec<Department>>;

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Department>>;

    async fn find_by_ids(&self, ids: &[Uuid]) -> AppResult<Vec<Department>>;

    async fn create(&self, department: Department) -> AppResult<Department>;

    async fn update(&self, department: Department) -> AppResult<Department>;

    /// Delete by id; `NotFound` if nothing was deleted.
    async fn delete(&self, id: Uuid) -> AppResult<()>;

    async fn count(&self) -> AppResult<u64>;
}

pub struct DepartmentStore {
    db: DatabaseConnection,
}

impl DepartmentStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl DepartmentRepository for DepartmentStore {
    async fn list(&self) -> AppResult<Vec<Department>> {
        let models = DepartmentEntity::find()
            .order_by_asc(department::Column::Name)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(Department::from).collect())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Department>> {
        let model = DepartmentEntity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Department::from))
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> AppResult<Vec<Department>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let models = DepartmentEntity::find()
            .filter(department::Column::Id.is_in(ids.iter().copied()))
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(Department::from).collect())
    }

    async fn create(&self, department: Department) -> AppResult<Department> {
        let model = ActiveModel::from(&department).insert(&self.db).await?;
        Ok(Department::from(model))
    }

    async fn update(&self, department: Department) -> AppResult<Department> {
        let model = ActiveModel::from(&department)
            .update(&self.db)
            .await
            .map_err(|e| update_error(e, "Department"))?;
        Ok(Department::from(model))
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = DepartmentEntity::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(AppError::not_found("Department"));
        }
        Ok(())
    }

    async fn count(&self) -> AppResult<u64> {
        Ok(DepartmentEntity::find().count(&self.db).await?)
    }
}
