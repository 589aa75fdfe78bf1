//! Integration tests for the listing CRUD service.

mod common;

use std::sync::Arc;

use common::{listing, owner};
use stay_scout::listings::{edit_thumbnail_url, ListingError, ListingService};
use stay_scout::models::{ImageRef, ListingDraft, ListingId};
use stay_scout::store::{ListingStore, MemoryStore};
use stay_scout::testing::StubGeocoder;

fn draft(title: &str, location: &str, country: &str, category: &str) -> ListingDraft {
    ListingDraft {
        title: title.to_string(),
        description: format!("{} description", title),
        price: 120,
        location: location.to_string(),
        country: country.to_string(),
        category: category.to_string(),
    }
}

#[tokio::test]
async fn create_geocodes_the_location_and_stores_the_listing() {
    let store = Arc::new(MemoryStore::new());
    let geocoder = Arc::new(StubGeocoder::with_point(18.0686, 59.3293));
    let service = ListingService::new(store.clone(), geocoder.clone());

    let created = service
        .create(
            draft("Old Town Apartment", "Stockholm", "Sweden", "Apartments"),
            owner("Erik Lund", "erik@example.com"),
            Some(ImageRef {
                url: "https://assets.example.com/upload/old-town.jpg".to_string(),
                filename: "old-town.jpg".to_string(),
            }),
        )
        .await
        .unwrap();

    assert_eq!(geocoder.queries(), vec!["Stockholm".to_string()]);
    let geometry = created.geometry.unwrap();
    assert_eq!(geometry.kind, "Point");
    assert_eq!(geometry.coordinates, [18.0686, 59.3293]);

    let stored = store.get(created.id).await.unwrap().unwrap();
    assert_eq!(stored.title, "Old Town Apartment");
    assert_eq!(stored.owner.email, "erik@example.com");
}

#[tokio::test]
async fn create_tolerates_a_geocoder_with_no_result() {
    let store = Arc::new(MemoryStore::new());
    let service = ListingService::new(store, Arc::new(StubGeocoder::empty()));

    let created = service
        .create(
            draft("Nowhere Hut", "Atlantis", "Atlantis", "Huts"),
            owner("No One", "noone@example.com"),
            None,
        )
        .await
        .unwrap();

    assert!(created.geometry.is_none());
}

#[tokio::test]
async fn update_regeocodes_location_and_country_together() {
    let store = Arc::new(MemoryStore::new());
    let existing = listing("Seaside Cabin", "Cabins", "Sweden", "Gotland", 95);
    store.insert(existing.clone()).await.unwrap();

    let geocoder = Arc::new(StubGeocoder::with_point(18.2948, 57.6348));
    let service = ListingService::new(store, geocoder.clone());

    let updated = service
        .update(
            existing.id,
            draft("Seaside Cabin", "Visby", "Sweden", "Cabins"),
            None,
        )
        .await
        .unwrap();

    assert_eq!(geocoder.queries(), vec!["Visby,Sweden".to_string()]);
    assert_eq!(updated.location, "Visby");
}

#[tokio::test]
async fn update_keeps_the_image_unless_replaced() {
    let store = Arc::new(MemoryStore::new());
    let mut existing = listing("Seaside Cabin", "Cabins", "Sweden", "Gotland", 95);
    existing.image = Some(ImageRef {
        url: "https://assets.example.com/upload/original.jpg".to_string(),
        filename: "original.jpg".to_string(),
    });
    store.insert(existing.clone()).await.unwrap();

    let service = ListingService::new(store.clone(), Arc::new(StubGeocoder::empty()));

    let updated = service
        .update(
            existing.id,
            draft("Seaside Cabin", "Gotland", "Sweden", "Cabins"),
            None,
        )
        .await
        .unwrap();
    assert_eq!(updated.image.unwrap().filename, "original.jpg");

    let replaced = service
        .update(
            existing.id,
            draft("Seaside Cabin", "Gotland", "Sweden", "Cabins"),
            Some(ImageRef {
                url: "https://assets.example.com/upload/new.jpg".to_string(),
                filename: "new.jpg".to_string(),
            }),
        )
        .await
        .unwrap();
    assert_eq!(replaced.image.unwrap().filename, "new.jpg");
}

#[tokio::test]
async fn show_and_delete_surface_not_found() {
    let store = Arc::new(MemoryStore::new());
    let service = ListingService::new(store, Arc::new(StubGeocoder::empty()));

    let missing = ListingId::new();
    assert!(matches!(
        service.show(missing).await,
        Err(ListingError::NotFound)
    ));
    assert!(matches!(
        service.delete(missing).await,
        Err(ListingError::NotFound)
    ));
}

#[tokio::test]
async fn delete_returns_the_removed_listing() {
    let store = Arc::new(MemoryStore::new());
    let existing = listing("Seaside Cabin", "Cabins", "Sweden", "Gotland", 95);
    store.insert(existing.clone()).await.unwrap();

    let service = ListingService::new(store.clone(), Arc::new(StubGeocoder::empty()));
    let deleted = service.delete(existing.id).await.unwrap();

    assert_eq!(deleted.id, existing.id);
    assert!(store.get(existing.id).await.unwrap().is_none());
}

#[tokio::test]
async fn category_filter_is_exact_match_only() {
    let store = Arc::new(MemoryStore::with_listings(vec![
        listing("Seaside Cabin", "Cabins", "Sweden", "Gotland", 95),
        listing("Forest Hut", "Cabins", "Sweden", "Dalarna", 80),
        listing("City Loft", "Lofts", "Sweden", "Stockholm", 300),
    ]));
    let service = ListingService::new(store, Arc::new(StubGeocoder::empty()));

    let cabins = service.filter_by_category("Cabins").await.unwrap();
    assert_eq!(cabins.len(), 2);

    // Substrings and case variants do not count for the filter
    let result = service.filter_by_category("cabin").await;
    assert!(matches!(result, Err(ListingError::NoneInCategory(name)) if name == "cabin"));
}

#[tokio::test]
async fn edit_thumbnail_rewrites_the_upload_segment() {
    let mut with_image = listing("Seaside Cabin", "Cabins", "Sweden", "Gotland", 95);
    with_image.image = Some(ImageRef {
        url: "https://assets.example.com/upload/v12/cabin.jpg".to_string(),
        filename: "cabin.jpg".to_string(),
    });

    assert_eq!(
        edit_thumbnail_url(&with_image).unwrap(),
        "https://assets.example.com/upload/w_250,h_160/v12/cabin.jpg"
    );

    let without_image = listing("Bare Listing", "Cabins", "Sweden", "Gotland", 95);
    assert!(edit_thumbnail_url(&without_image).is_none());
}
