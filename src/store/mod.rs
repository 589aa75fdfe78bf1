pub mod memory;

pub use memory::MemoryStore;

use crate::models::{Listing, ListingId};
use anyhow::Result;
use async_trait::async_trait;

/// Text fields a listing can be queried by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextField {
    Title,
    Category,
    Country,
    Location,
}

/// Ordering of a text-query result set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultOrder {
    /// The store's natural (insertion) order
    Natural,
    /// Descending by listing id; v7 ids are time-ordered, so newest first
    NewestFirst,
}

/// Document store for listings.
///
/// Queries signal zero matches with an empty vec, never an error. Errors
/// mean the store itself is unavailable and are fatal to the caller.
#[async_trait]
pub trait ListingStore: Send + Sync {
    async fn all(&self) -> Result<Vec<Listing>>;

    async fn get(&self, id: ListingId) -> Result<Option<Listing>>;

    async fn insert(&self, listing: Listing) -> Result<()>;

    /// Replace the stored listing with the same id. Returns the stored
    /// listing, or `None` if no listing has that id.
    async fn update(&self, listing: Listing) -> Result<Option<Listing>>;

    /// Remove a listing, returning it if it existed.
    async fn delete(&self, id: ListingId) -> Result<Option<Listing>>;

    /// Case-insensitive substring match of `term` against one text field.
    async fn find_text(
        &self,
        field: TextField,
        term: &str,
        order: ResultOrder,
    ) -> Result<Vec<Listing>>;

    /// All listings priced at or below `ceiling`, ascending by price.
    async fn find_price_at_most(&self, ceiling: i64) -> Result<Vec<Listing>>;

    /// Exact category match, natural order.
    async fn find_by_category(&self, category: &str) -> Result<Vec<Listing>>;
}
