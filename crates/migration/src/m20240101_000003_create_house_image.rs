//! Create `house_image` table with FK to `house`.
//!
//! One row per additional gallery image; `position` keeps upload order.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(HouseImage::Table)
                    .if_not_exists()
                    .col(pk_auto(HouseImage::Id))
                    .col(integer(HouseImage::HouseId).not_null())
                    .col(string_len(HouseImage::Filename, 120).not_null())
                    .col(integer(HouseImage::Position).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_house_image_house")
                            .from(HouseImage::Table, HouseImage::HouseId)
                            .to(House::Table, House::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(HouseImage::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum HouseImage { Table, Id, HouseId, Filename, Position }

#[derive(DeriveIden)]
enum House { Table, Id }
