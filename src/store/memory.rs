use crate::models::{Listing, ListingId};
use crate::store::{ListingStore, ResultOrder, TextField};
use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::RwLock;

/// In-process listing store.
///
/// Keeps listings in insertion order; that order is the store's natural
/// order for queries.
#[derive(Default)]
pub struct MemoryStore {
    listings: RwLock<Vec<Listing>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store pre-populated with listings, in the given order.
    pub fn with_listings(listings: Vec<Listing>) -> Self {
        Self {
            listings: RwLock::new(listings),
        }
    }

    fn field_value<'a>(listing: &'a Listing, field: TextField) -> &'a str {
        match field {
            TextField::Title => &listing.title,
            TextField::Category => &listing.category,
            TextField::Country => &listing.country,
            TextField::Location => &listing.location,
        }
    }
}

#[async_trait]
impl ListingStore for MemoryStore {
    async fn all(&self) -> Result<Vec<Listing>> {
        Ok(self.listings.read().await.clone())
    }

    async fn get(&self, id: ListingId) -> Result<Option<Listing>> {
        let listings = self.listings.read().await;
        Ok(listings.iter().find(|listing| listing.id == id).cloned())
    }

    async fn insert(&self, listing: Listing) -> Result<()> {
        self.listings.write().await.push(listing);
        Ok(())
    }

    async fn update(&self, listing: Listing) -> Result<Option<Listing>> {
        let mut listings = self.listings.write().await;
        match listings.iter_mut().find(|stored| stored.id == listing.id) {
            Some(stored) => {
                *stored = listing.clone();
                Ok(Some(listing))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, id: ListingId) -> Result<Option<Listing>> {
        let mut listings = self.listings.write().await;
        match listings.iter().position(|listing| listing.id == id) {
            Some(index) => Ok(Some(listings.remove(index))),
            None => Ok(None),
        }
    }

    async fn find_text(
        &self,
        field: TextField,
        term: &str,
        order: ResultOrder,
    ) -> Result<Vec<Listing>> {
        let needle = term.to_lowercase();
        let listings = self.listings.read().await;
        let mut matches: Vec<Listing> = listings
            .iter()
            .filter(|listing| {
                Self::field_value(listing, field)
                    .to_lowercase()
                    .contains(&needle)
            })
            .cloned()
            .collect();
        if order == ResultOrder::NewestFirst {
            matches.sort_by(|a, b| b.id.cmp(&a.id));
        }
        Ok(matches)
    }

    async fn find_price_at_most(&self, ceiling: i64) -> Result<Vec<Listing>> {
        let listings = self.listings.read().await;
        let mut matches: Vec<Listing> = listings
            .iter()
            .filter(|listing| listing.price <= ceiling)
            .cloned()
            .collect();
        matches.sort_by_key(|listing| listing.price);
        Ok(matches)
    }

    async fn find_by_category(&self, category: &str) -> Result<Vec<Listing>> {
        let listings = self.listings.read().await;
        Ok(listings
            .iter()
            .filter(|listing| listing.category == category)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ListingDraft, Owner};

    fn listing(title: &str, category: &str, price: i64) -> Listing {
        Listing::from_draft(
            ListingDraft {
                title: title.to_string(),
                description: format!("{} description", title),
                price,
                location: "Stockholm".to_string(),
                country: "Sweden".to_string(),
                category: category.to_string(),
            },
            Owner {
                name: "Test Owner".to_string(),
                email: "owner@example.com".to_string(),
            },
            None,
            None,
        )
    }

    #[tokio::test]
    async fn text_match_is_case_insensitive_substring() {
        let store = MemoryStore::with_listings(vec![listing("Seaside Cabin", "Cabins", 120)]);
        let matches = store
            .find_text(TextField::Title, "SIDE CAB", ResultOrder::Natural)
            .await
            .unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].title, "Seaside Cabin");
    }

    #[tokio::test]
    async fn newest_first_sorts_descending_by_id() {
        let older = listing("First Cabin", "Cabins", 100);
        std::thread::sleep(std::time::Duration::from_millis(2));
        let newer = listing("Second Cabin", "Cabins", 200);
        let store = MemoryStore::with_listings(vec![older.clone(), newer.clone()]);

        let matches = store
            .find_text(TextField::Category, "cabins", ResultOrder::NewestFirst)
            .await
            .unwrap();
        assert_eq!(matches[0].id, newer.id);
        assert_eq!(matches[1].id, older.id);
    }

    #[tokio::test]
    async fn price_query_is_inclusive_and_ascending() {
        let store = MemoryStore::with_listings(vec![
            listing("Loft", "Lofts", 300),
            listing("Room", "Rooms", 150),
            listing("Suite", "Suites", 200),
        ]);
        let matches = store.find_price_at_most(200).await.unwrap();
        let prices: Vec<i64> = matches.iter().map(|listing| listing.price).collect();
        assert_eq!(prices, vec![150, 200]);
    }

    #[tokio::test]
    async fn update_replaces_existing_listing_only() {
        let store = MemoryStore::new();
        let mut stored = listing("Old Title", "Cabins", 100);
        store.insert(stored.clone()).await.unwrap();

        stored.title = "New Title".to_string();
        let updated = store.update(stored.clone()).await.unwrap();
        assert_eq!(updated.unwrap().title, "New Title");

        let missing = store.update(listing("Ghost", "Cabins", 100)).await.unwrap();
        assert!(missing.is_none());
    }
}
