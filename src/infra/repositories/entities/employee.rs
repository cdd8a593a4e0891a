//! Employee database entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::Set;

use common::AppError;
use domain::Employee;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "employees")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub account_id: Uuid,
    #[sea_orm(unique)]
    pub employee_code: String,
    pub dob: Option<Date>,
    pub gender: Option<String>,
    pub marital_status: Option<String>,
    pub designation: Option<String>,
    pub department_id: Uuid,
    pub salary: i64,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for Employee {
    type Error = AppError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Employee {
            id: model.id,
            account_id: model.account_id,
            employee_code: model.employee_code,
            dob: model.dob,
            gender: model.gender.as_deref().map(str::parse).transpose()?,
            marital_status: model.marital_status.as_deref().map(str::parse).transpose()?,
            designation: model.designation,
            department_id: model.department_id,
            salary: model.salary,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

impl From<&Employee> for ActiveModel {
    fn from(employee: &Employee) -> Self {
        ActiveModel {
            id: Set(employee.id),
            account_id: Set(employee.account_id),
            employee_code: Set(employee.employee_code.clone()),
            dob: Set(employee.dob),
            gender: Set(employee.gender.map(|g| g.as_str().to_string())),
            marital_status: Set(employee.marital_status.map(|m| m.as_str().to_string())),
            designation: Set(employee.designation.clone()),
            department_id: Set(employee.department_id),
            salary: Set(employee.salary),
            created_at: Set(employee.created_at),
            updated_at: Set(employee.updated_at),
        }
    }
}
