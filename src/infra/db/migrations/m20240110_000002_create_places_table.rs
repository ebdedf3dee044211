//! Migration: Create the places table.

use sea_orm_migration::prelude::*;

use super::m20240110_000001_create_users_table::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Places::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Places::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Places::Title).string().not_null())
                    .col(ColumnDef::new(Places::Description).text().not_null())
                    .col(ColumnDef::new(Places::Address).string().not_null())
                    .col(ColumnDef::new(Places::Lat).double().not_null())
                    .col(ColumnDef::new(Places::Lng).double().not_null())
                    .col(ColumnDef::new(Places::ImagePath).string().not_null())
                    .col(ColumnDef::new(Places::CreatorId).uuid().not_null())
                    .col(
                        ColumnDef::new(Places::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Places::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_places_creator_id")
                            .from(Places::Table, Places::CreatorId)
                            .to(Users::Table, Users::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // Index for the places-by-user listing
        manager
            .create_index(
                Index::create()
                    .name("idx_places_creator_id")
                    .table(Places::Table)
                    .col(Places::CreatorId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_places_creator_id")
                    .table(Places::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Places::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Places {
    Table,
    Id,
    Title,
    Description,
    Address,
    Lat,
    Lng,
    ImagePath,
    CreatorId,
    CreatedAt,
    UpdatedAt,
}
