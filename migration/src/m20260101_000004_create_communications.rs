use sea_orm_migration::prelude::*;

use crate::{fk_cascade, fk_set_null, pk};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 通知活动表
        manager
            .create_table(
                Table::create()
                    .table(Campaigns::Table)
                    .if_not_exists()
                    .col(pk(Campaigns::Id))
                    .col(ColumnDef::new(Campaigns::BranchId).big_integer().not_null())
                    .col(ColumnDef::new(Campaigns::Name).string().not_null())
                    .col(ColumnDef::new(Campaigns::Channel).string().not_null())
                    .col(ColumnDef::new(Campaigns::Subject).string().null())
                    .col(ColumnDef::new(Campaigns::Body).text().not_null())
                    .col(ColumnDef::new(Campaigns::Audience).string().not_null())
                    .col(ColumnDef::new(Campaigns::AudienceRefId).big_integer().null())
                    .col(ColumnDef::new(Campaigns::Status).string().not_null())
                    .col(ColumnDef::new(Campaigns::SentAt).big_integer().null())
                    .col(ColumnDef::new(Campaigns::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Campaigns::UpdatedAt).big_integer().not_null())
                    .foreign_key(&mut fk_cascade(
                        Campaigns::Table,
                        Campaigns::BranchId,
                        Branches::Table,
                        Branches::Id,
                    ))
                    .to_owned(),
            )
            .await?;

        // 消息表
        manager
            .create_table(
                Table::create()
                    .table(Messages::Table)
                    .if_not_exists()
                    .col(pk(Messages::Id))
                    .col(ColumnDef::new(Messages::BranchId).big_integer().not_null())
                    .col(ColumnDef::new(Messages::CampaignId).big_integer().null())
                    .col(ColumnDef::new(Messages::StudentId).big_integer().null())
                    .col(ColumnDef::new(Messages::Recipient).string().not_null())
                    .col(ColumnDef::new(Messages::Channel).string().not_null())
                    .col(ColumnDef::new(Messages::Subject).string().null())
                    .col(ColumnDef::new(Messages::Body).text().not_null())
                    .col(ColumnDef::new(Messages::Status).string().not_null())
                    .col(ColumnDef::new(Messages::SentAt).big_integer().null())
                    .col(ColumnDef::new(Messages::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Messages::UpdatedAt).big_integer().not_null())
                    .foreign_key(&mut fk_cascade(
                        Messages::Table,
                        Messages::BranchId,
                        Branches::Table,
                        Branches::Id,
                    ))
                    .foreign_key(&mut fk_cascade(
                        Messages::Table,
                        Messages::CampaignId,
                        Campaigns::Table,
                        Campaigns::Id,
                    ))
                    .foreign_key(&mut fk_set_null(
                        Messages::Table,
                        Messages::StudentId,
                        Students::Table,
                        Students::Id,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_messages_campaign_id")
                    .table(Messages::Table)
                    .col(Messages::CampaignId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Messages::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Campaigns::Table).to_owned())
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
enum Students {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Campaigns {
    Table,
    Id,
    BranchId,
    Name,
    Channel,
    Subject,
    Body,
    Audience,
    AudienceRefId,
    Status,
    SentAt,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Messages {
    Table,
    Id,
    BranchId,
    CampaignId,
    StudentId,
    Recipient,
    Channel,
    Subject,
    Body,
    Status,
    SentAt,
    CreatedAt,
    UpdatedAt,
}
