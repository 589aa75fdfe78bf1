use crate::geo::Geocoder;
use crate::models::{ImageRef, Listing, ListingDraft, ListingId, Owner};
use crate::store::ListingStore;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum ListingError {
    #[error("listing not found")]
    NotFound,
    #[error("no listings in category {0}")]
    NoneInCategory(String),
    #[error("geocoding failed: {0}")]
    Geocode(#[source] anyhow::Error),
    #[error("listing store error: {0}")]
    Store(#[from] anyhow::Error),
}

/// CRUD over listings: thin glue between the store and the geocoder.
pub struct ListingService {
    store: Arc<dyn ListingStore>,
    geocoder: Arc<dyn Geocoder>,
}

impl ListingService {
    pub fn new(store: Arc<dyn ListingStore>, geocoder: Arc<dyn Geocoder>) -> Self {
        Self { store, geocoder }
    }

    pub async fn all(&self) -> Result<Vec<Listing>, ListingError> {
        Ok(self.store.all().await?)
    }

    pub async fn show(&self, id: ListingId) -> Result<Listing, ListingError> {
        self.store.get(id).await?.ok_or(ListingError::NotFound)
    }

    /// Create a listing: geocode its location, attach the uploaded image
    /// reference, stamp the owner.
    pub async fn create(
        &self,
        draft: ListingDraft,
        owner: Owner,
        image: Option<ImageRef>,
    ) -> Result<Listing, ListingError> {
        let geometry = self
            .geocoder
            .forward(&draft.location)
            .await
            .map_err(ListingError::Geocode)?;

        let listing = Listing::from_draft(draft, owner, image, geometry);
        self.store.insert(listing.clone()).await?;
        info!(id = %listing.id, title = %listing.title, "listing created");
        Ok(listing)
    }

    /// Update a listing's fields, re-geocoding against location and country
    /// together. The stored image survives unless a replacement is supplied.
    pub async fn update(
        &self,
        id: ListingId,
        draft: ListingDraft,
        image: Option<ImageRef>,
    ) -> Result<Listing, ListingError> {
        let mut listing = self.store.get(id).await?.ok_or(ListingError::NotFound)?;

        let geocode_query = format!("{},{}", draft.location, draft.country);
        let geometry = self
            .geocoder
            .forward(&geocode_query)
            .await
            .map_err(ListingError::Geocode)?;

        listing.title = draft.title;
        listing.description = draft.description;
        listing.price = draft.price;
        listing.location = draft.location;
        listing.country = draft.country;
        listing.category = draft.category;
        listing.geometry = geometry;
        if let Some(new_image) = image {
            listing.image = Some(new_image);
        }

        let updated = self
            .store
            .update(listing)
            .await?
            .ok_or(ListingError::NotFound)?;
        info!(id = %updated.id, "listing updated");
        Ok(updated)
    }

    pub async fn delete(&self, id: ListingId) -> Result<Listing, ListingError> {
        let deleted = self.store.delete(id).await?.ok_or(ListingError::NotFound)?;
        info!(id = %deleted.id, title = %deleted.title, "listing deleted");
        Ok(deleted)
    }

    /// Exact-category filter. An empty result is a recoverable outcome the
    /// caller turns into a user-facing message.
    pub async fn filter_by_category(&self, category: &str) -> Result<Vec<Listing>, ListingError> {
        let listings = self.store.find_by_category(category).await?;
        if listings.is_empty() {
            return Err(ListingError::NoneInCategory(category.to_string()));
        }
        Ok(listings)
    }
}

/// Asset-host URL for the 250x160 thumbnail shown on the edit form.
pub fn edit_thumbnail_url(listing: &Listing) -> Option<String> {
    listing
        .image
        .as_ref()
        .map(|image| image.url.replacen("/upload", "/upload/w_250,h_160", 1))
}
