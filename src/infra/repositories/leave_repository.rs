//! Leave request repository.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect,
};
use uuid::Uuid;

use common::AppResult;
use domain::{LeaveRequest, LeaveStatus};

use super::entities::leave_request::{self, ActiveModel, Entity as LeaveEntity};
use super::update_error;

#[cfg(test)]
use mockall::automock;

#[cfg_attr(test, automock)]
#[async_trait]
pub trait LeaveRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<LeaveRequest>>;

    /// One employee's requests, most recently applied first.
    async fn list_for_employee(&self, employee_id: Uuid) -> AppResult<Vec<LeaveRequest>>;

    /// Every request, most recently applied first.
    async fn list_all(&self) -> AppResult<Vec<LeaveRequest>>;

    async fn create(&self, request: LeaveRequest) -> AppResult<LeaveRequest>;

    async fn update(&self, request: LeaveRequest) -> AppResult<LeaveRequest>;

    /// Number of requests per status. Statuses with no rows are absent.
    async fn count_by_status(&self) -> AppResult<Vec<(LeaveStatus, u64)>>;
}

pub struct LeaveStore {
    db: DatabaseConnection,
}

impl LeaveStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl LeaveRepository for LeaveStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<LeaveRequest>> {
        LeaveEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .map(LeaveRequest::try_from)
            .transpose()
    }

    async fn list_for_employee(&self, employee_id: Uuid) -> AppResult<Vec<LeaveRequest>> {
        let models = LeaveEntity::find()
            .filter(leave_request::Column::EmployeeId.eq(employee_id))
            .order_by_desc(leave_request::Column::AppliedAt)
            .all(&self.db)
            .await?;
        models.into_iter().map(LeaveRequest::try_from).collect()
    }

    async fn list_all(&self) -> AppResult<Vec<LeaveRequest>> {
        let models = LeaveEntity::find()
            .order_by_desc(leave_request::Column::AppliedAt)
            .all(&self.db)
            .await?;
        models.into_iter().map(LeaveRequest::try_from).collect()
    }

    async fn create(&self, request: LeaveRequest) -> AppResult<LeaveRequest> {
        let model = ActiveModel::from(&request).insert(&self.db).await?;
        LeaveRequest::try_from(model)
    }

    async fn update(&self, request: LeaveRequest) -> AppResult<LeaveRequest> {
        let model = ActiveModel::from(&request)
            .update(&self.db)
            .await
            .map_err(|e| update_error(e, "Leave request"))?;
        LeaveRequest::try_from(model)
    }

    async fn count_by_status(&self) -> AppResult<Vec<(LeaveStatus, u64)>> {
        let rows: Vec<(String, i64)> = LeaveEntity::find()
            .select_only()
            .column(leave_request::Column::Status)
            .column_as(leave_request::Column::Id.count(), "count")
            .group_by(leave_request::Column::Status)
            .into_tuple()
            .all(&self.db)
            .await?;

        rows.into_iter()
            .map(|(status, count)| -> AppResult<(LeaveStatus, u64)> {
                Ok((status.parse()?, count.max(0) as u64))
            })
            .collect()
    }
}
