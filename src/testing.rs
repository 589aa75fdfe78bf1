//! Recording fakes for the collaborator seams, for use in tests.

use crate::geo::Geocoder;
use crate::mail::{EmailMessage, EmailTransport};
use crate::models::Geometry;
use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

// =============================================================================
// Mock Mailer
// =============================================================================

/// Email transport that records every message instead of sending it, and
/// can be told to fail for specific recipient addresses.
pub struct MockMailer {
    sent: Arc<Mutex<Vec<EmailMessage>>>,
    failing_addresses: Arc<Mutex<HashSet<String>>>,
}

impl MockMailer {
    pub fn new() -> Self {
        Self {
            sent: Arc::new(Mutex::new(Vec::new())),
            failing_addresses: Arc::new(Mutex::new(HashSet::new())),
        }
    }

    /// Make every send to `address` fail.
    pub fn failing_for(self, address: &str) -> Self {
        self.failing_addresses
            .lock()
            .unwrap()
            .insert(address.to_string());
        self
    }

    /// All messages accepted so far, in send order.
    pub fn sent(&self) -> Vec<EmailMessage> {
        self.sent.lock().unwrap().clone()
    }

    /// The message delivered to `address`, if any.
    pub fn sent_to(&self, address: &str) -> Option<EmailMessage> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .find(|message| message.to == address)
            .cloned()
    }
}

impl Default for MockMailer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EmailTransport for MockMailer {
    async fn send(&self, message: &EmailMessage) -> Result<()> {
        if self.failing_addresses.lock().unwrap().contains(&message.to) {
            anyhow::bail!("simulated transport failure for {}", message.to);
        }
        self.sent.lock().unwrap().push(message.clone());
        Ok(())
    }
}

// =============================================================================
// Stub Geocoder
// =============================================================================

/// Geocoder that returns a fixed geometry (or nothing) and records the
/// queries it was asked to resolve.
pub struct StubGeocoder {
    geometry: Option<Geometry>,
    queries: Arc<Mutex<Vec<String>>>,
}

impl StubGeocoder {
    /// A geocoder that finds nothing.
    pub fn empty() -> Self {
        Self {
            geometry: None,
            queries: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// A geocoder that resolves every query to one point.
    pub fn with_point(longitude: f64, latitude: f64) -> Self {
        Self {
            geometry: Some(Geometry::point(longitude, latitude)),
            queries: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// All queries received, in call order.
    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl Geocoder for StubGeocoder {
    async fn forward(&self, query: &str) -> Result<Option<Geometry>> {
        self.queries.lock().unwrap().push(query.to_string());
        Ok(self.geometry.clone())
    }
}
