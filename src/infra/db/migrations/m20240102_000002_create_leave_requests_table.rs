//! Migration: Create leave_requests table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(LeaveRequests::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(LeaveRequests::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(LeaveRequests::EmployeeId).uuid().not_null())
                    .col(ColumnDef::new(LeaveRequests::LeaveType).string_len(32).not_null())
                    .col(ColumnDef::new(LeaveRequests::StartDate).date().not_null())
                    .col(ColumnDef::new(LeaveRequests::EndDate).date().not_null())
                    .col(ColumnDef::new(LeaveRequests::Reason).text().not_null())
                    .col(
                        ColumnDef::new(LeaveRequests::Status)
                            .string_len(16)
                            .not_null()
                            .default("Pending"),
                    )
                    .col(
                        ColumnDef::new(LeaveRequests::AppliedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(LeaveRequests::ReviewedBy).uuid().null())
                    .col(
                        ColumnDef::new(LeaveRequests::ReviewedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_leave_requests_employee_id")
                    .table(LeaveRequests::Table)
                    .col(LeaveRequests::EmployeeId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(LeaveRequests::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum LeaveRequests {
    Table,
    Id,
    EmployeeId,
    LeaveType,
    StartDate,
    EndDate,
    Reason,
    Status,
    AppliedAt,
    ReviewedBy,
    ReviewedAt,
}
