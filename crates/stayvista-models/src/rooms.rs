//! Room listings.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use sqlx::types::Json;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::Document;

/// Host summary embedded in a room document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct HostInfo {
    #[validate(email(message = "host.email must be a valid email"))]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Any other contact fields the client sends, stored as given.
    #[serde(flatten)]
    pub extra: Document,
}

/// Body of `POST /rooms`. Every field other than `host` and `booked` is kept verbatim.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewRoom {
    #[validate(nested)]
    pub host: HostInfo,
    #[serde(default)]
    pub booked: bool,
    #[serde(flatten)]
    pub details: Document,
}

impl NewRoom {
    /// Splits the body into the indexed host email, the booked flag and the stored document.
    pub fn into_parts(self) -> (String, bool, Document) {
        let mut document = self.details;
        document.remove("_id");
        let host_email = self.host.email.clone();
        document.insert(
            "host".to_string(),
            serde_json::to_value(self.host).unwrap_or_default(),
        );
        (host_email, self.booked, document)
    }
}

/// Row shape of the `rooms` table.
#[derive(Debug, FromRow)]
pub struct RoomRow {
    pub id: Uuid,
    pub host_email: String,
    pub booked: bool,
    pub doc: Json<Document>,
    pub created_at: DateTime<Utc>,
}

/// A room as returned to clients: the stored document plus `_id` and `booked`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Room {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub booked: bool,
    #[serde(flatten)]
    pub document: Document,
}

impl From<RoomRow> for Room {
    fn from(row: RoomRow) -> Self {
        let mut document = row.doc.0;
        document.remove("_id");
        document.remove("booked");
        Self {
            id: row.id,
            booked: row.booked,
            document,
        }
    }
}

/// Body of `PATCH /rooms/status/{id}`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct RoomStatusDto {
    pub status: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_room() -> NewRoom {
        serde_json::from_value(json!({
            "title": "Cabin by the lake",
            "price": 120,
            "_id": "client-supplied",
            "host": { "email": "host@x.com", "name": "Hana" }
        }))
        .unwrap()
    }

    #[test]
    fn test_into_parts_keeps_details_and_host() {
        let (host_email, booked, document) = sample_room().into_parts();

        assert_eq!(host_email, "host@x.com");
        assert!(!booked);
        assert_eq!(document["title"], "Cabin by the lake");
        assert_eq!(document["host"]["name"], "Hana");
        assert!(!document.contains_key("_id"));
    }

    #[test]
    fn test_into_parts_keeps_every_host_field() {
        let room: NewRoom = serde_json::from_value(json!({
            "title": "Loft",
            "host": { "email": "h@x.com", "name": "H", "image": "i", "phone": "555" }
        }))
        .unwrap();

        let (_, _, document) = room.into_parts();
        assert_eq!(
            document["host"],
            json!({ "email": "h@x.com", "name": "H", "image": "i", "phone": "555" })
        );
    }

    #[test]
    fn test_host_email_is_validated() {
        let room: NewRoom = serde_json::from_value(json!({
            "host": { "email": "not-an-email" }
        }))
        .unwrap();
        assert!(room.validate().is_err());
        assert!(sample_room().validate().is_ok());
    }

    #[test]
    fn test_room_response_shape() {
        let id = Uuid::new_v4();
        let (_, _, document) = sample_room().into_parts();
        let row = RoomRow {
            id,
            host_email: "host@x.com".to_string(),
            booked: true,
            doc: Json(document),
            created_at: Utc::now(),
        };

        let value = serde_json::to_value(Room::from(row)).unwrap();
        assert_eq!(value["_id"], id.to_string());
        assert_eq!(value["booked"], true);
        assert_eq!(value["price"], 120);
    }
}
