//! Employee repository.

use async_trait::async_trait;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect,
};
use sea_orm::sea_query::Expr;
use uuid::Uuid;

use common::{AppError, AppResult};
use domain::Employee;

use super::entities::employee::{self, Entity as EmployeeEntity};

#[cfg(test)]
use mockall::automock;

#[cfg_attr(test, automock)]
#[async_trait]
pub trait EmployeeRepository: Send + Sync {
    /// All employees ordered by employee code.
    async fn list(&self) -> AppResult<Vec<Employee>>;

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Employee>>;

    async fn find_by_ids(&self, ids: &[Uuid]) -> AppResult<Vec<Employee>>;

    /// The directory entry linked to a login account.
    async fn find_by_account(&self, account_id: Uuid) -> AppResult<Option<Employee>>;

    async fn find_by_code(&self, employee_code: &str) -> AppResult<Option<Employee>>;

    async fn list_by_department(&self, department_id: Uuid) -> AppResult<Vec<Employee>>;

    async fn count_by_department(&self, department_id: Uuid) -> AppResult<u64>;

    async fn count(&self) -> AppResult<u64>;

    /// Sum of base salaries across every employee.
    async fn total_salary(&self) -> AppResult<i64>;

    async fn update(&self, employee: Employee) -> AppResult<Employee>;

    /// Delete the directory entry only; the account stays.
    async fn delete(&self, id: Uuid) -> AppResult<()>;
}

pub struct EmployeeStore {
    db: DatabaseConnection,
}

impl EmployeeStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl EmployeeRepository for EmployeeStore {
    async fn list(&self) -> AppResult<Vec<Employee>> {
        let models = EmployeeEntity::find()
            .order_by_asc(employee::Column::EmployeeCode)
            .all(&self.db)
            .await?;
        models.into_iter().map(Employee::try_from).collect()
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Employee>> {
        EmployeeEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .map(Employee::try_from)
            .transpose()
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> AppResult<Vec<Employee>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let models = EmployeeEntity::find()
            .filter(employee::Column::Id.is_in(ids.iter().copied()))
            .all(&self.db)
            .await?;
        models.into_iter().map(Employee::try_from).collect()
    }

    async fn find_by_account(&self, account_id: Uuid) -> AppResult<Option<Employee>> {
        EmployeeEntity::find()
            .filter(employee::Column::AccountId.eq(account_id))
            .one(&self.db)
            .await?
            .map(Employee::try_from)
            .transpose()
    }

    async fn find_by_code(&self, employee_code: &str) -> AppResult<Option<Employee>> {
        queries::find_by_code(&self.db, employee_code).await
    }

    async fn list_by_department(&self, department_id: Uuid) -> AppResult<Vec<Employee>> {
        let models = EmployeeEntity::find()
            .filter(employee::Column::DepartmentId.eq(department_id))
            .order_by_asc(employee::Column::EmployeeCode)
            .all(&self.db)
            .await?;
        models.into_iter().map(Employee::try_from).collect()
    }

    async fn count_by_department(&self, department_id: Uuid) -> AppResult<u64> {
        Ok(EmployeeEntity::find()
            .filter(employee::Column::DepartmentId.eq(department_id))
            .count(&self.db)
            .await?)
    }

    async fn count(&self) -> AppResult<u64> {
        Ok(EmployeeEntity::find().count(&self.db).await?)
    }

    async fn total_salary(&self) -> AppResult<i64> {
        // SUM(bigint) is numeric in Postgres; cast back for decoding
        let total: Option<i64> = EmployeeEntity::find()
            .select_only()
            .column_as(Expr::cust("COALESCE(SUM(salary), 0)::BIGINT"), "total")
            .into_tuple()
            .one(&self.db)
            .await?;
        Ok(total.unwrap_or(0))
    }

    async fn update(&self, employee: Employee) -> AppResult<Employee> {
        queries::update(&self.db, &employee).await
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = EmployeeEntity::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(AppError::not_found("Employee"));
        }
        Ok(())
    }
}

pub(crate) mod queries {
    use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter};

    use common::AppResult;
    use domain::Employee;

    use crate::infra::repositories::entities::employee::{self, ActiveModel, Entity as EmployeeEntity};
    use crate::infra::repositories::{insert_error, update_error};

    pub async fn find_by_code<C: ConnectionTrait>(
        db: &C,
        employee_code: &str,
    ) -> AppResult<Option<Employee>> {
        EmployeeEntity::find()
            .filter(employee::Column::EmployeeCode.eq(employee_code))
            .one(db)
            .await?
            .map(Employee::try_from)
            .transpose()
    }

    /// Insert. A taken employee code yields `Conflict("employeeId")`.
    pub async fn insert<C: ConnectionTrait>(db: &C, employee: &Employee) -> AppResult<Employee> {
        let model = ActiveModel::from(employee)
            .insert(db)
            .await
            .map_err(|e| insert_error(e, "employeeId"))?;
        Employee::try_from(model)
    }

    pub async fn update<C: ConnectionTrait>(db: &C, employee: &Employee) -> AppResult<Employee> {
        let model = ActiveModel::from(employee)
            .update(db)
            .await
            .map_err(|e| update_error(e, "Employee"))?;
        Employee::try_from(model)
    }
}
