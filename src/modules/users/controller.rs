use crate::audit_event;
use crate::docs::ErrorResponse;
use crate::metrics::{track_role_change, track_user_created};
use crate::middleware::auth::CurrentUser;
use crate::modules::users::service::UserService;
use crate::state::AppState;
use axum::{
    Json,
    extract::{Path, State},
};
use stayvista_core::AppError;
use stayvista_models::{
    Role, SaveUserResponse, UpdateUserRoleDto, UpsertUserDto, UserRecord, WriteResult,
};
use tracing::instrument;

/// Save a user on first login, or file a host request
#[utoipa::path(
    put,
    path = "/users/{email}",
    params(("email" = String, Path, description = "User email")),
    request_body = UpsertUserDto,
    responses(
        (status = 200, description = "Write acknowledgement, or {\"message\": \"exist\"} for a known user"),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Users"
)]
#[instrument(skip(state, dto))]
pub async fn save_user(
    State(state): State<AppState>,
    Path(email): Path<String>,
    Json(dto): Json<UpsertUserDto>,
) -> Result<Json<SaveUserResponse>, AppError> {
    let response = UserService::save_user(&state.db, &email, dto).await?;

    if let SaveUserResponse::Written(WriteResult {
        upserted_id: Some(_),
        ..
    }) = &response
    {
        track_user_created(Role::Guest.as_str());
    }

    Ok(Json(response))
}

/// Get one user by email
#[utoipa::path(
    get,
    path = "/user/{email}",
    params(("email" = String, Path, description = "User email")),
    responses(
        (status = 200, description = "User document, or null"),
        (status = 401, description = "No valid session", body = ErrorResponse)
    ),
    security(("session_cookie" = [])),
    tag = "Users"
)]
#[instrument(skip(state))]
pub async fn get_user(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<Option<UserRecord>>, AppError> {
    let user = UserService::get_user(&state.db, &email).await?;
    Ok(Json(user))
}

/// List all users
#[utoipa::path(
    get,
    path = "/users",
    responses(
        (status = 200, description = "All user documents"),
        (status = 401, description = "No valid session, or caller is not an admin", body = ErrorResponse),
        (status = 503, description = "Role lookup unavailable", body = ErrorResponse)
    ),
    security(("session_cookie" = [])),
    tag = "Users"
)]
#[instrument(skip(state))]
pub async fn get_users(State(state): State<AppState>) -> Result<Json<Vec<UserRecord>>, AppError> {
    let users = UserService::get_users(&state.db).await?;
    Ok(Json(users))
}

/// Change a user's role or status
#[utoipa::path(
    put,
    path = "/users/update/{email}",
    params(("email" = String, Path, description = "User email")),
    request_body = UpdateUserRoleDto,
    responses(
        (status = 200, description = "Write acknowledgement", body = WriteResult),
        (status = 401, description = "No valid session, or caller is not an admin", body = ErrorResponse),
        (status = 503, description = "Role lookup unavailable", body = ErrorResponse)
    ),
    security(("session_cookie" = [])),
    tag = "Users"
)]
#[instrument(skip(state, admin))]
pub async fn update_user_role(
    State(state): State<AppState>,
    admin: CurrentUser,
    Path(email): Path<String>,
    Json(dto): Json<UpdateUserRoleDto>,
) -> Result<Json<WriteResult>, AppError> {
    let role = dto.role;
    let result = UserService::update_role(&state.db, &email, dto).await?;

    if let Some(role) = role {
        track_role_change(role.as_str());
    }
    audit_event!(
        "user.role_update",
        "users",
        actor.email = %admin.email(),
        user.email = %email,
        role = ?role,
        "User role updated"
    );

    Ok(Json(result))
}
