use sea_orm_migration::prelude::*;

use super::m20250801_000001_create_spaces_table::Spaces;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(WorkItemTypes::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(WorkItemTypes::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(WorkItemTypes::SpaceId).uuid().not_null())
                    .col(ColumnDef::new(WorkItemTypes::Name).string().not_null())
                    .col(ColumnDef::new(WorkItemTypes::Description).text())
                    .col(ColumnDef::new(WorkItemTypes::Icon).string().not_null().default(""))
                    .col(ColumnDef::new(WorkItemTypes::Version).integer().not_null().default(0))
                    .col(ColumnDef::new(WorkItemTypes::ExtendedTypeName).uuid())
                    .col(ColumnDef::new(WorkItemTypes::Fields).json().not_null())
                    .col(
                        ColumnDef::new(WorkItemTypes::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(WorkItemTypes::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_work_item_types_space_id")
                            .from(WorkItemTypes::Table, WorkItemTypes::SpaceId)
                            .to(Spaces::Table, Spaces::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_work_item_types_space_created")
                    .table(WorkItemTypes::Table)
                    .col(WorkItemTypes::SpaceId)
                    .col(WorkItemTypes::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(WorkItemTypes::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum WorkItemTypes {
    Table,
    Id,
    SpaceId,
    Name,
    Description,
    Icon,
    Version,
    ExtendedTypeName,
    Fields,
    CreatedAt,
    UpdatedAt,
}
