use async_trait::async_trait;
use models::house::HouseColumns;

use super::domain::HouseView;
use super::errors::ListingError;

/// Repository abstraction for listing persistence.
///
/// `create` and `update` write the house row and its gallery atomically.
#[async_trait]
pub trait HouseRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<HouseView>, ListingError>;
    async fn get(&self, id: i32) -> Result<Option<HouseView>, ListingError>;
    async fn create(
        &self,
        cols: HouseColumns,
        image_file: Option<String>,
        additional_images: Vec<String>,
    ) -> Result<HouseView, ListingError>;
    /// Overwrites every column, replaces the primary image only when
    /// `image_file` is `Some`, appends `additional_images` to the gallery.
    /// `Ok(None)` when no house has that id.
    async fn update(
        &self,
        id: i32,
        cols: HouseColumns,
        available: bool,
        image_file: Option<String>,
        additional_images: Vec<String>,
    ) -> Result<Option<HouseView>, ListingError>;
}

/// Simple in-memory mock repository for tests
pub mod mock {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MockHouseRepository {
        houses: Mutex<Vec<HouseView>>, // index + 1 == id
    }

    fn poisoned<T>(e: std::sync::PoisonError<T>) -> ListingError {
        ListingError::Repository(e.to_string())
    }

    #[async_trait]
    impl HouseRepository for MockHouseRepository {
        async fn list(&self) -> Result<Vec<HouseView>, ListingError> {
            Ok(self.houses.lock().map_err(poisoned)?.clone())
        }

        async fn get(&self, id: i32) -> Result<Option<HouseView>, ListingError> {
            let houses = self.houses.lock().map_err(poisoned)?;
            Ok(houses.iter().find(|h| h.id == id).cloned())
        }

        async fn create(
            &self,
            cols: HouseColumns,
            image_file: Option<String>,
            additional_images: Vec<String>,
        ) -> Result<HouseView, ListingError> {
            let mut houses = self.houses.lock().map_err(poisoned)?;
            let view = HouseView {
                id: houses.len() as i32 + 1,
                title: cols.title,
                description: cols.description,
                price: cols.price,
                location: cols.location,
                contact_name: cols.contact_name,
                contact_phone: cols.contact_phone,
                image_file,
                additional_images,
                available: true,
            };
            houses.push(view.clone());
            Ok(view)
        }

        async fn update(
            &self,
            id: i32,
            cols: HouseColumns,
            available: bool,
            image_file: Option<String>,
            additional_images: Vec<String>,
        ) -> Result<Option<HouseView>, ListingError> {
            let mut houses = self.houses.lock().map_err(poisoned)?;
            let Some(h) = houses.iter_mut().find(|h| h.id == id) else { return Ok(None) };
            h.title = cols.title;
            h.description = cols.description;
            h.price = cols.price;
            h.location = cols.location;
            h.contact_name = cols.contact_name;
            h.contact_phone = cols.contact_phone;
            h.available = available;
            if image_file.is_some() {
                h.image_file = image_file;
            }
            h.additional_images.extend(additional_images);
            Ok(Some(h.clone()))
        }
    }
}
