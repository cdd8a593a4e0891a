//! Salary database entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::Set;

use domain::SalaryRecord;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "salaries")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub employee_id: Uuid,
    pub basic_salary: i64,
    pub allowances: i64,
    pub deductions: i64,
    pub net_salary: i64,
    pub pay_date: Date,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for SalaryRecord {
    fn from(model: Model) -> Self {
        SalaryRecord {
            id: model.id,
            employee_id: model.employee_id,
            basic_salary: model.basic_salary,
            allowances: model.allowances,
            deductions: model.deductions,
            net_salary: model.net_salary,
            pay_date: model.pay_date,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<&SalaryRecord> for ActiveModel {
    fn from(record: &SalaryRecord) -> Self {
        ActiveModel {
            id: Set(record.id),
            employee_id: Set(record.employee_id),
            basic_salary: Set(record.basic_salary),
            allowances: Set(record.allowances),
            deductions: Set(record.deductions),
            net_salary: Set(record.net_salary),
            pay_date: Set(record.pay_date),
            created_at: Set(record.created_at),
            updated_at: Set(record.updated_at),
        }
    }
}
