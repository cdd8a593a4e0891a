//! Migration: Create attendance table.
//!
//! No foreign key to `employees`: ledger rows outlive a deleted employee.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Attendance::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Attendance::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Attendance::EmployeeId).uuid().not_null())
                    .col(ColumnDef::new(Attendance::Date).date().not_null())
                    .col(ColumnDef::new(Attendance::Status).string_len(32).not_null())
                    .col(ColumnDef::new(Attendance::TimeIn).string_len(8).null())
                    .col(ColumnDef::new(Attendance::TimeOut).string_len(8).null())
                    .col(ColumnDef::new(Attendance::WorkingHours).double().null())
                    .col(ColumnDef::new(Attendance::Remarks).text().null())
                    .col(ColumnDef::new(Attendance::MarkedBy).uuid().not_null())
                    .col(
                        ColumnDef::new(Attendance::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Attendance::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // One record per employee per day
        manager
            .create_index(
                Index::create()
                    .name("idx_attendance_employee_date")
                    .table(Attendance::Table)
                    .col(Attendance::EmployeeId)
                    .col(Attendance::Date)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_attendance_date")
                    .table(Attendance::Table)
                    .col(Attendance::Date)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Attendance::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Attendance {
    Table,
    Id,
    EmployeeId,
    Date,
    Status,
    TimeIn,
    TimeOut,
    WorkingHours,
    Remarks,
    MarkedBy,
    CreatedAt,
    UpdatedAt,
}
