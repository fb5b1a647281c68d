use sea_orm_migration::prelude::*;

use crate::{fk_cascade, fk_restrict, fk_set_null, pk};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 收费标准表
        manager
            .create_table(
                Table::create()
                    .table(FeeStructures::Table)
                    .if_not_exists()
                    .col(pk(FeeStructures::Id))
                    .col(
                        ColumnDef::new(FeeStructures::BranchId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(FeeStructures::ClassId).big_integer().null())
                    .col(ColumnDef::new(FeeStructures::Name).string().not_null())
                    .col(ColumnDef::new(FeeStructures::Amount).double().not_null())
                    .col(ColumnDef::new(FeeStructures::Frequency).string().not_null())
                    .col(
                        ColumnDef::new(FeeStructures::AcademicYear)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(FeeStructures::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(FeeStructures::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(&mut fk_cascade(
                        FeeStructures::Table,
                        FeeStructures::BranchId,
                        Branches::Table,
                        Branches::Id,
                    ))
                    .foreign_key(&mut fk_set_null(
                        FeeStructures::Table,
                        FeeStructures::ClassId,
                        Classes::Table,
                        Classes::Id,
                    ))
                    .to_owned(),
            )
            .await?;

        // 账单表，明细以 JSON 文本保存
        manager
            .create_table(
                Table::create()
                    .table(Invoices::Table)
                    .if_not_exists()
                    .col(pk(Invoices::Id))
                    .col(ColumnDef::new(Invoices::BranchId).big_integer().not_null())
                    .col(ColumnDef::new(Invoices::StudentId).big_integer().not_null())
                    .col(ColumnDef::new(Invoices::InvoiceNo).string().not_null())
                    .col(ColumnDef::new(Invoices::IssueDate).string().not_null())
                    .col(ColumnDef::new(Invoices::DueDate).string().not_null())
                    .col(ColumnDef::new(Invoices::Items).text().not_null())
                    .col(ColumnDef::new(Invoices::TotalAmount).double().not_null())
                    .col(ColumnDef::new(Invoices::PaidAmount).double().not_null())
                    .col(ColumnDef::new(Invoices::Status).string().not_null())
                    .col(ColumnDef::new(Invoices::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Invoices::UpdatedAt).big_integer().not_null())
                    .foreign_key(&mut fk_cascade(
                        Invoices::Table,
                        Invoices::BranchId,
                        Branches::Table,
                        Branches::Id,
                    ))
                    .foreign_key(&mut fk_restrict(
                        Invoices::Table,
                        Invoices::StudentId,
                        Students::Table,
                        Students::Id,
                    ))
                    .to_owned(),
            )
            .await?;

        // 缴费记录表
        manager
            .create_table(
                Table::create()
                    .table(Payments::Table)
                    .if_not_exists()
                    .col(pk(Payments::Id))
                    .col(ColumnDef::new(Payments::BranchId).big_integer().not_null())
                    .col(ColumnDef::new(Payments::InvoiceId).big_integer().not_null())
                    .col(ColumnDef::new(Payments::Amount).double().not_null())
                    .col(ColumnDef::new(Payments::Method).string().not_null())
                    .col(ColumnDef::new(Payments::Reference).string().null())
                    .col(ColumnDef::new(Payments::PaidAt).big_integer().not_null())
                    .col(ColumnDef::new(Payments::RecordedBy).big_integer().null())
                    .col(ColumnDef::new(Payments::CreatedAt).big_integer().not_null())
                    .foreign_key(&mut fk_cascade(
                        Payments::Table,
                        Payments::BranchId,
                        Branches::Table,
                        Branches::Id,
                    ))
                    .foreign_key(&mut fk_restrict(
                        Payments::Table,
                        Payments::InvoiceId,
                        Invoices::Table,
                        Invoices::Id,
                    ))
                    .foreign_key(&mut fk_set_null(
                        Payments::Table,
                        Payments::RecordedBy,
                        Users::Table,
                        Users::Id,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_invoices_branch_invoice_no")
                    .table(Invoices::Table)
                    .col(Invoices::BranchId)
                    .col(Invoices::InvoiceNo)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_invoices_student_id")
                    .table(Invoices::Table)
                    .col(Invoices::StudentId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_payments_invoice_id")
                    .table(Payments::Table)
                    .col(Payments::InvoiceId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Payments::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Invoices::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(FeeStructures::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Branches {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Students {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Classes {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum FeeStructures {
    Table,
    Id,
    BranchId,
    ClassId,
    Name,
    Amount,
    Frequency,
    AcademicYear,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Invoices {
    Table,
    Id,
    BranchId,
    StudentId,
    InvoiceNo,
    IssueDate,
    DueDate,
    Items,
    TotalAmount,
    PaidAmount,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Payments {
    Table,
    Id,
    BranchId,
    InvoiceId,
    Amount,
    Method,
    Reference,
    PaidAt,
    RecordedBy,
    CreatedAt,
}
