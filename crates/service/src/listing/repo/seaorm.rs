use models::house::{self, HouseColumns};
use models::house_image;
use sea_orm::{DatabaseConnection, DbErr, TransactionTrait};

use crate::listing::domain::HouseView;
use crate::listing::errors::ListingError;
use crate::listing::repository::HouseRepository;

pub struct SeaOrmHouseRepository {
    pub db: DatabaseConnection,
}

fn txn_err(e: DbErr) -> ListingError {
    ListingError::Repository(e.to_string())
}

#[async_trait::async_trait]
impl HouseRepository for SeaOrmHouseRepository {
    async fn list(&self) -> Result<Vec<HouseView>, ListingError> {
        let rows = house::list_all(&self.db).await?;
        let ids: Vec<i32> = rows.iter().map(|r| r.id).collect();
        let mut galleries = house_image::filenames_by_house(&self.db, &ids).await?;
        Ok(rows
            .into_iter()
            .map(|row| {
                let images = galleries.remove(&row.id).unwrap_or_default();
                HouseView::new(row, images)
            })
            .collect())
    }

    async fn get(&self, id: i32) -> Result<Option<HouseView>, ListingError> {
        let Some(row) = house::find_by_id(&self.db, id).await? else { return Ok(None) };
        let images = house_image::filenames_for(&self.db, id).await?;
        Ok(Some(HouseView::new(row, images)))
    }

    async fn create(
        &self,
        cols: HouseColumns,
        image_file: Option<String>,
        additional_images: Vec<String>,
    ) -> Result<HouseView, ListingError> {
        let txn = self.db.begin().await.map_err(txn_err)?;
        let row = house::insert(&txn, cols, image_file).await?;
        house_image::append(&txn, row.id, &additional_images).await?;
        txn.commit().await.map_err(txn_err)?;
        Ok(HouseView::new(row, additional_images))
    }

    async fn update(
        &self,
        id: i32,
        cols: HouseColumns,
        available: bool,
        image_file: Option<String>,
        additional_images: Vec<String>,
    ) -> Result<Option<HouseView>, ListingError> {
        let txn = self.db.begin().await.map_err(txn_err)?;
        let Some(existing) = house::find_by_id(&txn, id).await? else {
            txn.rollback().await.map_err(txn_err)?;
            return Ok(None);
        };
        let row = house::overwrite(&txn, existing, cols, available, image_file).await?;
        house_image::append(&txn, id, &additional_images).await?;
        let images = house_image::filenames_for(&txn, id).await?;
        txn.commit().await.map_err(txn_err)?;
        Ok(Some(HouseView::new(row, images)))
    }
}
