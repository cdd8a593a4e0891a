//! Department directory.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use common::{AppError, AppResult, OptionExt};
use domain::{Department, DepartmentPatch};

use crate::infra::UnitOfWork;

#[async_trait]
pub trait DepartmentService: Send + Sync {
    async fn list(&self) -> AppResult<Vec<Department>>;

    async fn get(&self, id: Uuid) -> AppResult<Department>;

    async fn create(&self, name: String, description: Option<String>) -> AppResult<Department>;

    async fn update(&self, id: Uuid, patch: DepartmentPatch) -> AppResult<Department>;

    /// Refused while any employee still belongs to the department.
    async fn delete(&self, id: Uuid) -> AppResult<()>;
}

pub struct DepartmentManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> DepartmentManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> DepartmentService for DepartmentManager<U> {
    async fn list(&self) -> AppResult<Vec<Department>> {
        self.uow.departments().list().await
    }

    async fn get(&self, id: Uuid) -> AppResult<Department> {
        self.uow
            .departments()
            .find_by_id(id)
            .await?
            .ok_or_not_found("Department")
    }

    async fn create(&self, name: String, description: Option<String>) -> AppResult<Department> {
        let department = self
            .uow
            .departments()
            .create(Department::new(name, description)?)
            .await?;

        tracing::info!(department_id = %department.id, name = %department.name, "Department created");
        Ok(department)
    }

    async fn update(&self, id: Uuid, patch: DepartmentPatch) -> AppResult<Department> {
        let mut department = self.get(id).await?;
        department.apply(patch)?;
        self.uow.departments().update(department).await
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let assigned = self.uow.employees().count_by_department(id).await?;
        if assigned > 0 {
            return Err(AppError::validation(format!(
                "Cannot delete department with {} assigned employee(s)",
                assigned
            )));
        }

        self.uow.departments().delete(id).await?;
        tracing::info!(department_id = %id, "Department deleted");
        Ok(())
    }
}
