//! Migration: Create employees table.
//!
//! Deleting an employee leaves its account in place; the account foreign
//! key therefore restricts deletes on `accounts` only.

use sea_orm_migration::prelude::*;

use super::m20240101_000001_create_accounts_table::Accounts;
use super::m20240101_000002_create_departments_table::Departments;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Employees::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Employees::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Employees::AccountId).uuid().not_null().unique_key())
                    .col(
                        ColumnDef::new(Employees::EmployeeCode)
                            .string_len(64)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Employees::Dob).date().null())
                    .col(ColumnDef::new(Employees::Gender).string_len(16).null())
                    .col(ColumnDef::new(Employees::MaritalStatus).string_len(16).null())
                    .col(ColumnDef::new(Employees::Designation).string().null())
                    .col(ColumnDef::new(Employees::DepartmentId).uuid().not_null())
                    .col(
                        ColumnDef::new(Employees::Salary)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Employees::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Employees::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_employees_account")
                            .from(Employees::Table, Employees::AccountId)
                            .to(Accounts::Table, Accounts::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_employees_department")
                            .from(Employees::Table, Employees::DepartmentId)
                            .to(Departments::Table, Departments::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_employees_department_id")
                    .table(Employees::Table)
                    .col(Employees::DepartmentId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Employees::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Employees {
    Table,
    Id,
    AccountId,
    EmployeeCode,
    Dob,
    Gender,
    MaritalStatus,
    Designation,
    DepartmentId,
    Salary,
    CreatedAt,
    UpdatedAt,
}
