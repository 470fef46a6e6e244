use std::sync::Arc;

use tracing::{info, instrument};

use super::domain::{HouseInput, HouseView};
use super::errors::ListingError;
use super::repository::HouseRepository;
use crate::auth::{domain::AuthUser, require_admin};
use crate::uploads::{UploadStore, UploadedFile};

/// Listing business service: reads are public, writes need an admin caller.
pub struct ListingService<R: HouseRepository> {
    repo: Arc<R>,
    uploads: UploadStore,
}

impl<R: HouseRepository> ListingService<R> {
    pub fn new(repo: Arc<R>, uploads: UploadStore) -> Self { Self { repo, uploads } }

    pub fn uploads(&self) -> &UploadStore { &self.uploads }

    /// Every listing in insertion order.
    pub async fn list_all(&self) -> Result<Vec<HouseView>, ListingError> {
        self.repo.list().await
    }

    pub async fn get(&self, id: i32) -> Result<HouseView, ListingError> {
        self.repo.get(id).await?.ok_or(ListingError::NotFound(id))
    }

    /// Create a listing and return its id.
    ///
    /// Order of checks: admin access, then form fields, then uploads. Images
    /// with a disallowed suffix are skipped without failing the request.
    #[instrument(skip_all, fields(caller = caller.map(|u| u.id)))]
    pub async fn create(
        &self,
        caller: Option<&AuthUser>,
        input: HouseInput,
        image_file: Option<UploadedFile>,
        additional_images: Vec<UploadedFile>,
    ) -> Result<i32, ListingError> {
        require_admin(caller)?;
        let cols = input.validate()?;

        let primary = self.uploads.store(image_file.as_ref()).await?;
        let gallery = self.uploads.store_all(&additional_images).await?;

        let created = self.repo.create(cols, primary, gallery).await?;
        info!(house_id = created.id, images = created.additional_images.len(), "house_created");
        Ok(created.id)
    }

    /// Overwrite a listing's fields, keeping its primary image unless a new
    /// valid one was submitted and appending any new gallery images.
    #[instrument(skip_all, fields(house_id = id, caller = caller.map(|u| u.id)))]
    pub async fn update(
        &self,
        caller: Option<&AuthUser>,
        id: i32,
        input: HouseInput,
        image_file: Option<UploadedFile>,
        additional_images: Vec<UploadedFile>,
    ) -> Result<HouseView, ListingError> {
        require_admin(caller)?;
        if self.repo.get(id).await?.is_none() {
            return Err(ListingError::NotFound(id));
        }
        let cols = input.validate()?;

        let primary = self.uploads.store(image_file.as_ref()).await?;
        let gallery = self.uploads.store_all(&additional_images).await?;

        let updated = self
            .repo
            .update(id, cols, input.available, primary, gallery)
            .await?
            .ok_or(ListingError::NotFound(id))?;
        info!(house_id = id, available = updated.available, "house_updated");
        Ok(updated)
    }
}
