//! User records and the DTOs that write them.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use sqlx::types::Json;
use utoipa::ToSchema;

use crate::Document;
use crate::responses::{MessageResponse, WriteResult};
use crate::roles::Role;

/// Keys owned by the server that never land in a user's free-form profile.
const RESERVED_PROFILE_KEYS: [&str; 5] = ["_id", "email", "role", "status", "timestamp"];

/// A persisted user, keyed by email.
///
/// `role` is absent until the user first logs in; an absent role never
/// satisfies a role gate. `timestamp` is milliseconds since the Unix epoch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    pub email: String,
    pub role: Option<Role>,
    pub status: Option<String>,
    pub timestamp: Option<i64>,
    #[serde(flatten)]
    pub profile: Document,
}

impl UserRecord {
    pub fn new(email: impl Into<String>, role: Option<Role>) -> Self {
        Self {
            email: email.into(),
            role,
            status: None,
            timestamp: None,
            profile: Document::new(),
        }
    }
}

/// Row shape of the `users` table.
#[derive(Debug, FromRow)]
pub struct UserRow {
    pub email: String,
    pub role: Option<String>,
    pub status: Option<String>,
    pub timestamp: Option<i64>,
    pub profile: Json<Document>,
}

impl From<UserRow> for UserRecord {
    fn from(row: UserRow) -> Self {
        // The table constrains role to known values; anything else reads as no role.
        let role = row.role.as_deref().and_then(|r| r.parse().ok());

        Self {
            email: row.email,
            role,
            status: row.status,
            timestamp: row.timestamp,
            profile: row.profile.0,
        }
    }
}

/// Body of the public first-login upsert (`PUT /users/{email}`).
///
/// Only `status` and the free-form profile are honoured. A `role` in the body
/// is captured here so it cannot leak into the profile, then ignored.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpsertUserDto {
    pub status: Option<String>,
    #[serde(default)]
    #[schema(value_type = Option<Object>)]
    pub role: Option<serde_json::Value>,
    #[serde(flatten)]
    #[schema(value_type = Object)]
    pub profile: Document,
}

impl UpsertUserDto {
    /// Status sent by a guest asking to become a host.
    pub const HOST_REQUEST_STATUS: &'static str = "Requested";

    pub fn is_host_request(&self) -> bool {
        self.status.as_deref() == Some(Self::HOST_REQUEST_STATUS)
    }

    pub fn into_profile(self) -> Document {
        let mut profile = self.profile;
        for key in RESERVED_PROFILE_KEYS {
            profile.remove(key);
        }
        profile
    }
}

/// Body of the admin role update (`PUT /users/update/{email}`).
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateUserRoleDto {
    pub role: Option<Role>,
    pub status: Option<String>,
}

/// Response of the first-login upsert: either the write acknowledgement or
/// `{"message": "exist"}` when the user is already known.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum SaveUserResponse {
    Exists(MessageResponse),
    Written(WriteResult),
}

impl SaveUserResponse {
    pub fn exists() -> Self {
        Self::Exists(MessageResponse {
            message: "exist".to_string(),
        })
    }
}
