use crate::models::Geometry;
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

/// Forward-geocoding collaborator: place text in, point geometry out.
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Best single feature for the query, `None` when the service finds
    /// nothing for it.
    async fn forward(&self, query: &str) -> Result<Option<Geometry>>;
}

/// Mapbox geocoding API client
pub struct MapboxGeocoder {
    access_token: String,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    features: Vec<GeocodeFeature>,
}

#[derive(Debug, Deserialize)]
struct GeocodeFeature {
    geometry: Geometry,
}

impl MapboxGeocoder {
    pub fn new(access_token: String) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            access_token,
            client,
        })
    }
}

#[async_trait]
impl Geocoder for MapboxGeocoder {
    async fn forward(&self, query: &str) -> Result<Option<Geometry>> {
        let url = format!(
            "https://api.mapbox.com/geocoding/v5/mapbox.places/{}.json",
            urlencoding::encode(query)
        );

        let response = self
            .client
            .get(&url)
            .query(&[("access_token", self.access_token.as_str()), ("limit", "1")])
            .send()
            .await
            .context("Failed to send geocoding request")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Geocoding API error {}: {}", status, body);
        }

        let geocoded: GeocodeResponse = response
            .json()
            .await
            .context("Failed to parse geocoding response")?;

        let geometry = geocoded.features.into_iter().next().map(|f| f.geometry);
        debug!(query, found = geometry.is_some(), "forward geocode");
        Ok(geometry)
    }
}
