//! Create cars table

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Cars::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Cars::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Cars::Name).string().not_null())
                    .col(ColumnDef::new(Cars::Model).string().not_null())
                    .col(ColumnDef::new(Cars::Feature1).string())
                    .col(ColumnDef::new(Cars::Feature2).string())
                    .col(ColumnDef::new(Cars::Feature3).string())
                    .col(ColumnDef::new(Cars::CarType).string_len(20).not_null())
                    .col(ColumnDef::new(Cars::Price).double().not_null())
                    .col(
                        ColumnDef::new(Cars::Booked)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Cars::Version)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Cars::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Cars {
    Table,
    Id,
    Name,
    Model,
    Feature1,
    Feature2,
    Feature3,
    #[iden = "type"]
    CarType,
    Price,
    Booked,
    Version,
}
