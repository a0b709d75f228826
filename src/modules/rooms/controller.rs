use crate::docs::ErrorResponse;
use crate::metrics::track_room_created;
use crate::middleware::auth::CurrentUser;
use crate::modules::rooms::service::RoomService;
use crate::state::AppState;
use crate::validator::ValidatedJson;
use axum::{
    Json,
    extract::{Path, State},
};
use stayvista_core::AppError;
use stayvista_models::{InsertResult, NewRoom, Room, RoomStatusDto, WriteResult};
use tracing::{info, instrument};
use uuid::Uuid;

/// List all rooms
#[utoipa::path(
    get,
    path = "/rooms",
    responses(
        (status = 200, description = "All room documents"),
        (status = 401, description = "No valid session", body = ErrorResponse)
    ),
    security(("session_cookie" = [])),
    tag = "Rooms"
)]
#[instrument(skip(state))]
pub async fn get_rooms(State(state): State<AppState>) -> Result<Json<Vec<Room>>, AppError> {
    let rooms = RoomService::get_rooms(&state.db).await?;
    Ok(Json(rooms))
}

/// List the rooms of one host
#[utoipa::path(
    get,
    path = "/rooms/{email}",
    params(("email" = String, Path, description = "Host email")),
    responses(
        (status = 200, description = "Room documents listed by the host"),
        (status = 401, description = "No valid session, or caller is not a host", body = ErrorResponse),
        (status = 503, description = "Role lookup unavailable", body = ErrorResponse)
    ),
    security(("session_cookie" = [])),
    tag = "Rooms"
)]
#[instrument(skip(state))]
pub async fn get_host_rooms(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<Vec<Room>>, AppError> {
    let rooms = RoomService::get_rooms_by_host(&state.db, &email).await?;
    Ok(Json(rooms))
}

/// Get one room
#[utoipa::path(
    get,
    path = "/room/{id}",
    params(("id" = Uuid, Path, description = "Room id")),
    responses(
        (status = 200, description = "Room document, or null"),
        (status = 400, description = "Malformed id")
    ),
    tag = "Rooms"
)]
#[instrument(skip(state))]
pub async fn get_room(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Option<Room>>, AppError> {
    let room = RoomService::get_room(&state.db, id).await?;
    Ok(Json(room))
}

/// List a new room
#[utoipa::path(
    post,
    path = "/rooms",
    responses(
        (status = 200, description = "Insert acknowledgement", body = InsertResult),
        (status = 401, description = "No valid session, or caller is not a host", body = ErrorResponse),
        (status = 422, description = "Invalid room document", body = ErrorResponse),
        (status = 503, description = "Role lookup unavailable", body = ErrorResponse)
    ),
    security(("session_cookie" = [])),
    tag = "Rooms"
)]
#[instrument(skip(state, room))]
pub async fn add_room(
    State(state): State<AppState>,
    host: CurrentUser,
    ValidatedJson(room): ValidatedJson<NewRoom>,
) -> Result<Json<InsertResult>, AppError> {
    let id = RoomService::create_room(&state.db, room).await?;

    track_room_created();
    info!(room.id = %id, user.email = %host.email(), "Room created");

    Ok(Json(InsertResult::new(id)))
}

/// Mark a room as booked or available
#[utoipa::path(
    patch,
    path = "/rooms/status/{id}",
    params(("id" = Uuid, Path, description = "Room id")),
    request_body = RoomStatusDto,
    responses(
        (status = 200, description = "Write acknowledgement", body = WriteResult),
        (status = 401, description = "No valid session", body = ErrorResponse)
    ),
    security(("session_cookie" = [])),
    tag = "Rooms"
)]
#[instrument(skip(state))]
pub async fn update_room_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(dto): Json<RoomStatusDto>,
) -> Result<Json<WriteResult>, AppError> {
    let result = RoomService::set_booked(&state.db, id, dto.status).await?;
    Ok(Json(result))
}
