//! Migration: Create salaries table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Salaries::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Salaries::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Salaries::EmployeeId).uuid().not_null())
                    .col(ColumnDef::new(Salaries::BasicSalary).big_integer().not_null())
                    .col(
                        ColumnDef::new(Salaries::Allowances)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Salaries::Deductions)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Salaries::NetSalary).big_integer().not_null())
                    .col(ColumnDef::new(Salaries::PayDate).date().not_null())
                    .col(
                        ColumnDef::new(Salaries::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Salaries::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_salaries_employee_pay_date")
                    .table(Salaries::Table)
                    .col(Salaries::EmployeeId)
                    .col(Salaries::PayDate)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Salaries::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Salaries {
    Table,
    Id,
    EmployeeId,
    BasicSalary,
    Allowances,
    Deductions,
    NetSalary,
    PayDate,
    CreatedAt,
    UpdatedAt,
}
