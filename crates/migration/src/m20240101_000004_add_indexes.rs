use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Gallery lookups always filter by house and sort by position
        manager
            .create_index(
                Index::create()
                    .name("idx_house_image_house_position")
                    .table(HouseImage::Table)
                    .col(HouseImage::HouseId)
                    .col(HouseImage::Position)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_house_image_house_position")
                    .table(HouseImage::Table)
                    .to_owned(),
            )
            .await
    }
}

#[derive(DeriveIden)]
enum HouseImage { Table, HouseId, Position }
