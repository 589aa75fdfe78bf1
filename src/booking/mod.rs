pub mod emails;

use crate::mail::{EmailMessage, EmailTransport};
use crate::models::ListingId;
use crate::store::ListingStore;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info};

/// Payment-method sentinel for on-site payment; anything else is an online
/// method named by `online_payment_option`.
pub const PAY_AT_HOTEL: &str = "payAtHotel";

/// Booking form fields, as supplied by the caller.
///
/// Dates are carried as-is; range validation happens upstream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingDetails {
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub guests: u32,
    pub phone_number: String,
    pub payment_method: String,
    pub online_payment_option: Option<String>,
    pub special_requests: Option<String>,
}

impl BookingDetails {
    /// Label rendered into both notification emails.
    ///
    /// `payAtHotel` maps to a fixed label; every other method must name a
    /// non-empty online payment option.
    pub fn payment_label(&self) -> Result<String, BookingError> {
        if self.payment_method == PAY_AT_HOTEL {
            return Ok("Pay at Hotel".to_string());
        }
        match self.online_payment_option.as_deref() {
            Some(option) if !option.trim().is_empty() => Ok(option.to_string()),
            _ => Err(BookingError::MissingPaymentOption),
        }
    }

    pub fn special_requests_label(&self) -> &str {
        self.special_requests
            .as_deref()
            .filter(|requests| !requests.is_empty())
            .unwrap_or("None")
    }
}

/// What happened to one recipient's notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecipientOutcome {
    Delivered,
    Failed { reason: String },
}

impl RecipientOutcome {
    pub fn is_delivered(&self) -> bool {
        matches!(self, Self::Delivered)
    }
}

/// Per-recipient outcome of one booking notification
#[derive(Debug, Clone)]
pub struct NotificationReport {
    pub booker: RecipientOutcome,
    pub owner: RecipientOutcome,
}

#[derive(Debug, Error)]
pub enum BookingError {
    #[error("listing not found")]
    ListingNotFound,
    #[error("online payment method requires a payment option")]
    MissingPaymentOption,
    #[error("listing store error: {0}")]
    Store(#[from] anyhow::Error),
}

/// Sends the two booking emails: a confirmation to the booker and a
/// notification to the listing owner.
///
/// Email is best-effort here: a failed send is logged and recorded in the
/// report, never raised, and never blocks the sibling send.
pub struct BookingNotifier {
    store: Arc<dyn ListingStore>,
    mailer: Arc<dyn EmailTransport>,
    from_address: String,
}

impl BookingNotifier {
    pub fn new(
        store: Arc<dyn ListingStore>,
        mailer: Arc<dyn EmailTransport>,
        from_address: String,
    ) -> Self {
        Self {
            store,
            mailer,
            from_address,
        }
    }

    /// Notify both parties of a confirmed booking.
    ///
    /// Fails fast if the listing does not exist or the payment details
    /// cannot render a label; after that point the call always succeeds and
    /// the report carries each recipient's outcome.
    pub async fn notify(
        &self,
        listing_id: ListingId,
        booker_email: &str,
        details: &BookingDetails,
    ) -> Result<NotificationReport, BookingError> {
        let listing = self
            .store
            .get(listing_id)
            .await?
            .ok_or(BookingError::ListingNotFound)?;
        let payment_label = details.payment_label()?;

        let booker_message = emails::booker_confirmation(
            &self.from_address,
            booker_email,
            &listing,
            details,
            &payment_label,
        );
        let owner_message = emails::owner_notification(
            &self.from_address,
            &listing,
            booker_email,
            details,
            &payment_label,
        );

        // The two sends are independent; neither waits on the other's result.
        let (booker, owner) = tokio::join!(
            self.dispatch("booker", booker_message),
            self.dispatch("owner", owner_message),
        );

        info!(
            listing = %listing.title,
            booker_delivered = booker.is_delivered(),
            owner_delivered = owner.is_delivered(),
            "booking notifications dispatched"
        );
        Ok(NotificationReport { booker, owner })
    }

    async fn dispatch(&self, recipient: &'static str, message: EmailMessage) -> RecipientOutcome {
        match self.mailer.send(&message).await {
            Ok(()) => RecipientOutcome::Delivered,
            Err(err) => {
                error!(recipient, to = %message.to, error = %err, "failed to send booking email");
                RecipientOutcome::Failed {
                    reason: err.to_string(),
                }
            }
        }
    }
}
