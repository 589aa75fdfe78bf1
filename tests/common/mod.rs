//! Shared fixtures for the integration tests.

use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::Mutex;

use stay_scout::booking::BookingDetails;
use stay_scout::models::{Listing, ListingDraft, ListingId, Owner};
use stay_scout::store::{ListingStore, MemoryStore, ResultOrder, TextField};

pub fn owner(name: &str, email: &str) -> Owner {
    Owner {
        name: name.to_string(),
        email: email.to_string(),
    }
}

pub fn listing(
    title: &str,
    category: &str,
    country: &str,
    location: &str,
    price: i64,
) -> Listing {
    Listing::from_draft(
        ListingDraft {
            title: title.to_string(),
            description: format!("{} description", title),
            price,
            location: location.to_string(),
            country: country.to_string(),
            category: category.to_string(),
        },
        owner("Nora Berg", "nora@example.com"),
        None,
        None,
    )
}

pub fn booking_details() -> BookingDetails {
    BookingDetails {
        check_in: NaiveDate::from_ymd_opt(2026, 9, 12).unwrap(),
        check_out: NaiveDate::from_ymd_opt(2026, 9, 15).unwrap(),
        guests: 2,
        phone_number: "+46 70 123 45 67".to_string(),
        payment_method: "payAtHotel".to_string(),
        online_payment_option: None,
        special_requests: None,
    }
}

/// Store wrapper that records which probes ran, for asserting cascade
/// short-circuits.
pub struct RecordingStore {
    inner: MemoryStore,
    text_probes: Mutex<Vec<TextField>>,
    price_probes: Mutex<u32>,
}

impl RecordingStore {
    pub fn with_listings(listings: Vec<Listing>) -> Self {
        Self {
            inner: MemoryStore::with_listings(listings),
            text_probes: Mutex::new(Vec::new()),
            price_probes: Mutex::new(0),
        }
    }

    pub fn text_probes(&self) -> Vec<TextField> {
        self.text_probes.lock().unwrap().clone()
    }

    pub fn price_probes(&self) -> u32 {
        *self.price_probes.lock().unwrap()
    }

    pub fn probe_count(&self) -> usize {
        self.text_probes.lock().unwrap().len() + *self.price_probes.lock().unwrap() as usize
    }
}

#[async_trait]
impl ListingStore for RecordingStore {
    async fn all(&self) -> Result<Vec<Listing>> {
        self.inner.all().await
    }

    async fn get(&self, id: ListingId) -> Result<Option<Listing>> {
        self.inner.get(id).await
    }

    async fn insert(&self, listing: Listing) -> Result<()> {
        self.inner.insert(listing).await
    }

    async fn update(&self, listing: Listing) -> Result<Option<Listing>> {
        self.inner.update(listing).await
    }

    async fn delete(&self, id: ListingId) -> Result<Option<Listing>> {
        self.inner.delete(id).await
    }

    async fn find_text(
        &self,
        field: TextField,
        term: &str,
        order: ResultOrder,
    ) -> Result<Vec<Listing>> {
        self.text_probes.lock().unwrap().push(field);
        self.inner.find_text(field, term, order).await
    }

    async fn find_price_at_most(&self, ceiling: i64) -> Result<Vec<Listing>> {
        *self.price_probes.lock().unwrap() += 1;
        self.inner.find_price_at_most(ceiling).await
    }

    async fn find_by_category(&self, category: &str) -> Result<Vec<Listing>> {
        self.inner.find_by_category(category).await
    }
}
