use serde::Serialize;
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi, ToSchema};

use stayvista_models::{
    InsertResult, MessageResponse, PaymentIntentRequest, PaymentIntentResponse, Role,
    RoomStatusDto, SuccessResponse, UpdateUserRoleDto, UpsertUserDto, WriteResult,
};

/// Body of every error response.
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::issue_token,
        crate::modules::auth::controller::logout,
        crate::modules::users::controller::save_user,
        crate::modules::users::controller::get_user,
        crate::modules::users::controller::get_users,
        crate::modules::users::controller::update_user_role,
        crate::modules::rooms::controller::get_rooms,
        crate::modules::rooms::controller::get_host_rooms,
        crate::modules::rooms::controller::get_room,
        crate::modules::rooms::controller::add_room,
        crate::modules::rooms::controller::update_room_status,
        crate::modules::bookings::controller::create_booking,
        crate::modules::bookings::controller::get_guest_bookings,
        crate::modules::bookings::controller::get_host_bookings,
        crate::modules::payments::controller::create_payment_intent,
    ),
    components(
        schemas(
            Role,
            UpsertUserDto,
            UpdateUserRoleDto,
            RoomStatusDto,
            PaymentIntentRequest,
            PaymentIntentResponse,
            InsertResult,
            WriteResult,
            MessageResponse,
            SuccessResponse,
            ErrorResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Session cookie issuance and logout"),
        (name = "Users", description = "User records and roles"),
        (name = "Rooms", description = "Room listings"),
        (name = "Bookings", description = "Bookings"),
        (name = "Payments", description = "Payment intents")
    ),
    info(
        title = "StayVista API",
        version = "0.1.0",
        description = "Vacation-rental backend: rooms, bookings, payments and role-gated administration.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "session_cookie",
                SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new("token"))),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_gated_routes_and_cookie_scheme() {
        let doc = ApiDoc::openapi();

        assert!(doc.paths.paths.contains_key("/rooms"));
        assert!(doc.paths.paths.contains_key("/users/update/{email}"));
        assert!(doc.paths.paths.contains_key("/create-payment-intent"));

        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("session_cookie"));
    }

    #[test]
    fn test_first_login_upsert_documents_its_body() {
        let doc = ApiDoc::openapi();

        let upsert = doc
            .paths
            .paths
            .get("/users/{email}")
            .and_then(|item| item.put.as_ref())
            .expect("PUT /users/{email}");
        assert!(upsert.request_body.is_some());

        let components = doc.components.expect("components");
        assert!(components.schemas.contains_key("UpsertUserDto"));
    }
}
