//! Bookings.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use sqlx::types::Json;
use uuid::Uuid;
use validator::Validate;

use crate::Document;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct GuestInfo {
    #[validate(email(message = "guest.email must be a valid email"))]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Any other contact fields the client sends, stored as given.
    #[serde(flatten)]
    pub extra: Document,
}

/// Body of `POST /bookings`. `host` is the host's email address.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewBooking {
    #[validate(nested)]
    pub guest: GuestInfo,
    #[validate(email(message = "host must be a valid email"))]
    pub host: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
    #[serde(flatten)]
    pub details: Document,
}

impl NewBooking {
    /// The full booking as it is stored, without any client-supplied `_id`.
    pub fn to_document(&self) -> Document {
        let mut document = match serde_json::to_value(self) {
            Ok(serde_json::Value::Object(map)) => map,
            _ => Document::new(),
        };
        document.remove("_id");
        document
    }
}

/// Row shape of the `bookings` table.
#[derive(Debug, FromRow)]
pub struct BookingRow {
    pub id: Uuid,
    pub guest_email: String,
    pub host_email: String,
    pub transaction_id: Option<String>,
    pub doc: Json<Document>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Booking {
    #[serde(rename = "_id")]
    pub id: Uuid,
    #[serde(flatten)]
    pub document: Document,
}

impl From<BookingRow> for Booking {
    fn from(row: BookingRow) -> Self {
        let mut document = row.doc.0;
        document.remove("_id");
        Self {
            id: row.id,
            document,
        }
    }
}

/// `?email=` filter of the booking listings. A missing email yields an empty list.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookingQuery {
    pub email: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_booking_document_keeps_client_fields() {
        let booking: NewBooking = serde_json::from_value(json!({
            "guest": { "email": "guest@x.com", "name": "Gus" },
            "host": "host@x.com",
            "transactionId": "pi_123",
            "price": 240,
            "roomId": "8f14e45f-ceea-467f-a0e6-7b1d0f4c3e2a"
        }))
        .unwrap();

        assert!(booking.validate().is_ok());
        assert_eq!(booking.transaction_id.as_deref(), Some("pi_123"));

        let document = booking.to_document();
        assert_eq!(document["guest"]["email"], "guest@x.com");
        assert_eq!(document["host"], "host@x.com");
        assert_eq!(document["transactionId"], "pi_123");
        assert_eq!(document["price"], 240);
        assert_eq!(document["roomId"], "8f14e45f-ceea-467f-a0e6-7b1d0f4c3e2a");
    }

    #[test]
    fn test_guest_contact_fields_survive() {
        let booking: NewBooking = serde_json::from_value(json!({
            "guest": { "email": "g@x.com", "name": "G", "phone": "777" },
            "host": "host@x.com"
        }))
        .unwrap();

        let document = booking.to_document();
        assert_eq!(
            document["guest"],
            json!({ "email": "g@x.com", "name": "G", "phone": "777" })
        );
    }

    #[test]
    fn test_booking_requires_valid_emails() {
        let booking: NewBooking = serde_json::from_value(json!({
            "guest": { "email": "guest@x.com" },
            "host": "nobody"
        }))
        .unwrap();
        assert!(booking.validate().is_err());
    }
}
