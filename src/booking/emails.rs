//! Rendering of the two booking notification emails.

use crate::mail::EmailMessage;
use crate::models::Listing;

use super::BookingDetails;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Confirmation email addressed to the booker.
pub fn booker_confirmation(
    from: &str,
    booker_email: &str,
    listing: &Listing,
    details: &BookingDetails,
    payment_label: &str,
) -> EmailMessage {
    let html_body = format!(
        r#"<html>
  <body>
    <div class="container">
      <h1>Booking Confirmation</h1>
      <p>Dear <strong>{booker_email}</strong>,</p>
      <p>Thank you for booking with us! Here are your booking details:</p>
      <p>Your booking for <strong>{title}</strong> has been confirmed.</p>
      <div class="details">
        <h2>Booking Details:</h2>
{fields}
        <p>We look forward to welcoming you!</p>
      </div>
      <p>If you have any questions, feel free to <a href="mailto:{from}">contact our support team</a>.</p>
    </div>
  </body>
</html>"#,
        title = listing.title,
        fields = details_list(None, details, payment_label),
    );

    EmailMessage {
        to: booker_email.to_string(),
        from: from.to_string(),
        subject: format!("Booking Confirmation - {}", listing.title),
        text_body: format!("Your booking for {} has been confirmed.", listing.title),
        html_body,
    }
}

/// Notification email addressed to the listing owner. Identifies the booker
/// by email address.
pub fn owner_notification(
    from: &str,
    listing: &Listing,
    booker_email: &str,
    details: &BookingDetails,
    payment_label: &str,
) -> EmailMessage {
    let html_body = format!(
        r#"<html>
  <body>
    <p>Dear {owner},</p>
    <p>You have received a new booking for <strong>{title}</strong>.</p>
    <h2>Booking Details:</h2>
{fields}
    <p>Thank you for using our service!</p>
  </body>
</html>"#,
        owner = listing.owner.name,
        title = listing.title,
        fields = details_list(Some(booker_email), details, payment_label),
    );

    EmailMessage {
        to: listing.owner.email.clone(),
        from: from.to_string(),
        subject: format!("New Booking for - {}", listing.title),
        text_body: format!("You have a new booking for {}.", listing.title),
        html_body,
    }
}

/// The shared field list. The owner's copy leads with the booker's email.
fn details_list(
    booker_email: Option<&str>,
    details: &BookingDetails,
    payment_label: &str,
) -> String {
    let mut items = Vec::new();
    if let Some(email) = booker_email {
        items.push(format!("<li><strong>User Email:</strong> {email}</li>"));
    }
    items.push(format!(
        "<li><strong>Check-in Date:</strong> {}</li>",
        details.check_in.format(DATE_FORMAT)
    ));
    items.push(format!(
        "<li><strong>Check-out Date:</strong> {}</li>",
        details.check_out.format(DATE_FORMAT)
    ));
    items.push(format!(
        "<li><strong>Number of Guests:</strong> {}</li>",
        details.guests
    ));
    items.push(format!(
        "<li><strong>Phone Number:</strong> {}</li>",
        details.phone_number
    ));
    items.push(format!(
        "<li><strong>Payment Method:</strong> {payment_label}</li>"
    ));
    items.push(format!(
        "<li><strong>Special Requests:</strong> {}</li>",
        details.special_requests_label()
    ));

    format!(
        "        <ul>\n          {}\n        </ul>",
        items.join("\n          ")
    )
}
