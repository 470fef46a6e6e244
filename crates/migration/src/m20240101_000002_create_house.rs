//! Create `house` table holding listings.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(House::Table)
                    .if_not_exists()
                    .col(pk_auto(House::Id))
                    .col(string_len(House::Title, 100).not_null())
                    .col(text(House::Description).not_null())
                    .col(double(House::Price).not_null())
                    .col(string_len(House::Location, 100).not_null())
                    .col(string_len_null(House::ContactName, 100))
                    .col(string_len_null(House::ContactPhone, 20))
                    .col(string_len_null(House::ImageFile, 120))
                    .col(boolean(House::Available).not_null().default(true))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(House::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum House {
    Table,
    Id,
    Title,
    Description,
    Price,
    Location,
    ContactName,
    ContactPhone,
    ImageFile,
    Available,
}
