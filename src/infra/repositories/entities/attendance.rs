//! Attendance database entity for SeaORM.
//!
//! `(employee_id, date)` carries a unique index; see the create migration.

use sea_orm::entity::prelude::*;
use sea_orm::Set;

use common::AppError;
use domain::AttendanceRecord;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "attendance")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub employee_id: Uuid,
    pub date: Date,
    pub status: String,
    pub time_in: Option<String>,
    pub time_out: Option<String>,
    pub working_hours: Option<f64>,
    pub remarks: Option<String>,
    pub marked_by: Uuid,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for AttendanceRecord {
    type Error = AppError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(AttendanceRecord {
            id: model.id,
            employee_id: model.employee_id,
            date: model.date,
            status: model.status.parse()?,
            time_in: model.time_in,
            time_out: model.time_out,
            working_hours: model.working_hours,
            remarks: model.remarks,
            marked_by: model.marked_by,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

impl From<&AttendanceRecord> for ActiveModel {
    fn from(record: &AttendanceRecord) -> Self {
        ActiveModel {
            id: Set(record.id),
            employee_id: Set(record.employee_id),
            date: Set(record.date),
            status: Set(record.status.as_str().to_string()),
            time_in: Set(record.time_in.clone()),
            time_out: Set(record.time_out.clone()),
            working_hours: Set(record.working_hours),
            remarks: Set(record.remarks.clone()),
            marked_by: Set(record.marked_by),
            created_at: Set(record.created_at),
            updated_at: Set(record.updated_at),
        }
    }
}
