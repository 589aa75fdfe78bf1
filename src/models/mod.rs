use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identity of a listing.
///
/// Backed by a v7 UUID, which is time-ordered: sorting ids descending
/// yields newest-created-first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ListingId(Uuid);

impl ListingId {
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for ListingId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ListingId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Person who owns a listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Owner {
    pub name: String,
    pub email: String,
}

/// Reference to an uploaded listing photo on the asset host
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageRef {
    pub url: String,
    pub filename: String,
}

/// GeoJSON-style point geometry from the geocoder
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Geometry {
    #[serde(rename = "type")]
    pub kind: String,
    /// [longitude, latitude]
    pub coordinates: [f64; 2],
}

impl Geometry {
    pub fn point(longitude: f64, latitude: f64) -> Self {
        Self {
            kind: "Point".to_string(),
            coordinates: [longitude, latitude],
        }
    }
}

/// Core lodging listing model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Listing {
    pub id: ListingId,
    pub title: String,
    pub description: String,
    pub image: Option<ImageRef>,
    /// Nightly price in whole currency units
    pub price: i64,
    pub location: String,
    pub country: String,
    pub category: String,
    pub geometry: Option<Geometry>,
    pub owner: Owner,
    pub created_at: DateTime<Utc>,
}

/// Caller-supplied listing fields, before geocoding and image attachment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingDraft {
    pub title: String,
    pub description: String,
    pub price: i64,
    pub location: String,
    pub country: String,
    pub category: String,
}

impl Listing {
    /// Build a listing from a draft with a fresh id and creation stamp.
    pub fn from_draft(
        draft: ListingDraft,
        owner: Owner,
        image: Option<ImageRef>,
        geometry: Option<Geometry>,
    ) -> Self {
        Self {
            id: ListingId::new(),
            title: draft.title,
            description: draft.description,
            image,
            price: draft.price,
            location: draft.location,
            country: draft.country,
            category: draft.category,
            geometry,
            owner,
            created_at: Utc::now(),
        }
    }
}
