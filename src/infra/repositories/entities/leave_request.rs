//! Leave request database entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::Set;

use common::AppError;
use domain::LeaveRequest;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "leave_requests")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub employee_id: Uuid,
    pub leave_type: String,
    pub start_date: Date,
    pub end_date: Date,
    pub reason: String,
    pub status: String,
    pub applied_at: DateTimeUtc,
    pub reviewed_by: Option<Uuid>,
    pub reviewed_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for LeaveRequest {
    type Error = AppError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(LeaveRequest {
            id: model.id,
            employee_id: model.employee_id,
            leave_type: model.leave_type.parse()?,
            start_date: model.start_date,
            end_date: model.end_date,
            reason: model.reason,
            status: model.status.parse()?,
            applied_at: model.applied_at,
            reviewed_by: model.reviewed_by,
            reviewed_at: model.reviewed_at,
        })
    }
}

impl From<&LeaveRequest> for ActiveModel {
    fn from(request: &LeaveRequest) -> Self {
        ActiveModel {
            id: Set(request.id),
            employee_id: Set(request.employee_id),
            leave_type: Set(request.leave_type.as_str().to_string()),
            start_date: Set(request.start_date),
            end_date: Set(request.end_date),
            reason: Set(request.reason.clone()),
            status: Set(request.status.as_str().to_string()),
            applied_at: Set(request.applied_at),
            reviewed_by: Set(request.reviewed_by),
            reviewed_at: Set(request.reviewed_at),
        }
    }
}
