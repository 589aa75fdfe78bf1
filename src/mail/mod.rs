pub mod http;

pub use http::HttpMailer;

use anyhow::Result;
use async_trait::async_trait;

/// A rendered email, ready for the transport
#[derive(Debug, Clone)]
pub struct EmailMessage {
    pub to: String,
    pub from: String,
    pub subject: String,
    pub text_body: String,
    pub html_body: String,
}

/// Outbound email transport.
///
/// One call is one delivery attempt; retry policy belongs to the
/// implementation behind this seam, not to callers.
#[async_trait]
pub trait EmailTransport: Send + Sync {
    async fn send(&self, message: &EmailMessage) -> Result<()>;
}
