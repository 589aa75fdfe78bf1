use crate::models::Listing;
use crate::store::{ListingStore, ResultOrder, TextField};
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Field a search resolved against.
///
/// Variant order is the cascade's precedence order and is fixed: a match on
/// an earlier field stops the cascade before any later field is probed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchField {
    Title,
    Category,
    Country,
    Location,
    Price,
}

impl SearchField {
    /// User-facing field name ("Listings searched by Category!")
    pub fn label(&self) -> &'static str {
        match self {
            Self::Title => "Title",
            Self::Category => "Category",
            Self::Country => "Country",
            Self::Location => "Location",
            Self::Price => "Price",
        }
    }
}

/// Search outcomes that are expected results, not faults: the caller
/// surfaces them as user-visible messages. Store failures are fatal.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("empty search query")]
    EmptyQuery,
    #[error("no listings matched the query")]
    NoMatch,
    #[error("listing store error: {0}")]
    Store(#[from] anyhow::Error),
}

/// A resolved search: which field matched, and the listings it matched.
#[derive(Debug, Clone)]
pub struct SearchHit {
    pub field: SearchField,
    pub listings: Vec<Listing>,
}

/// Trim a raw query and collapse internal whitespace runs to single spaces.
pub fn collapse_whitespace(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum CaseState {
    StartOfWord,
    InWord,
}

/// Title-case a trimmed query: uppercase the first character and every
/// character that follows a space, lowercase the rest.
///
/// Two-state machine over the character sequence; the only transition back
/// to `StartOfWord` is emitting a space. Pure and idempotent.
pub fn normalize(query: &str) -> String {
    let mut term = String::with_capacity(query.len());
    let mut state = CaseState::StartOfWord;
    for ch in query.chars() {
        match state {
            CaseState::StartOfWord => term.extend(ch.to_uppercase()),
            CaseState::InWord => term.extend(ch.to_lowercase()),
        }
        state = if ch == ' ' {
            CaseState::StartOfWord
        } else {
            CaseState::InWord
        };
    }
    term
}

/// Resolves a free-text query against the listing store by probing fields
/// in precedence order: Title, Category, Country, Location, then a price
/// ceiling when the term is an integer.
pub struct SearchResolver {
    store: Arc<dyn ListingStore>,
}

impl SearchResolver {
    pub fn new(store: Arc<dyn ListingStore>) -> Self {
        Self { store }
    }

    /// Resolve a raw user query to the first field with matches.
    ///
    /// Title results keep the store's natural order; the other text fields
    /// come back newest first. The price probe runs only when every text
    /// probe was empty and the whole term parses as an integer; its results
    /// are ascending by price.
    pub async fn resolve(&self, raw_query: &str) -> Result<SearchHit, SearchError> {
        let cleaned = collapse_whitespace(raw_query);
        if cleaned.is_empty() {
            return Err(SearchError::EmptyQuery);
        }
        let term = normalize(&cleaned);
        debug!(%term, "resolving search query");

        const CASCADE: [(SearchField, TextField, ResultOrder); 4] = [
            (SearchField::Title, TextField::Title, ResultOrder::Natural),
            (
                SearchField::Category,
                TextField::Category,
                ResultOrder::NewestFirst,
            ),
            (
                SearchField::Country,
                TextField::Country,
                ResultOrder::NewestFirst,
            ),
            (
                SearchField::Location,
                TextField::Location,
                ResultOrder::NewestFirst,
            ),
        ];

        for (field, text_field, order) in CASCADE {
            let listings = self.store.find_text(text_field, &term, order).await?;
            if !listings.is_empty() {
                debug!(field = field.label(), hits = listings.len(), "cascade matched");
                return Ok(SearchHit { field, listings });
            }
        }

        // Strict whole-string parse: "123abc" falls through to NoMatch.
        if let Ok(ceiling) = term.parse::<i64>() {
            let listings = self.store.find_price_at_most(ceiling).await?;
            if !listings.is_empty() {
                debug!(ceiling, hits = listings.len(), "price fallback matched");
                return Ok(SearchHit {
                    field: SearchField::Price,
                    listings,
                });
            }
        }

        Err(SearchError::NoMatch)
    }
}
