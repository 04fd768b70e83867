use axum::Json;
use axum::extract::{Path, State};
use sea_orm::*;
use tracing::instrument;

use crate::entity::user;
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::CurrentUser;
use crate::extractors::json::AppJson;
use crate::models::user::{UpdateUserRequest, UserResponse, validate_update_user};
use crate::state::AppState;
use crate::utils::{hash, policy};

/// Return the current authenticated user's profile.
#[utoipa::path(
    get,
    path = "/me",
    tag = "Users",
    operation_id = "getCurrentUser",
    summary = "Get the current user",
    responses(
        (status = 200, description = "Current user", body = UserResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(current), fields(user_id = current.id()))]
pub async fn me(current: CurrentUser) -> Json<UserResponse> {
    Json(UserResponse::from(current.user))
}

/// Update the current user's profile. Only supplied fields are changed;
/// a supplied password is re-hashed and the plaintext dropped.
#[utoipa::path(
    put,
    path = "/me",
    tag = "Users",
    operation_id = "updateCurrentUser",
    summary = "Update the current user",
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "Updated user", body = UserResponse),
        (status = 400, description = "Validation error or email/username taken (VALIDATION_ERROR, ALREADY_EXISTS)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(current, state, payload), fields(user_id = current.id()))]
pub async fn update_me(
    current: CurrentUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<UpdateUserRequest>,
) -> Result<Json<UserResponse>, AppError> {
    validate_update_user(&payload)?;

    let mut active: user::ActiveModel = current.user.into();

    if let Some(email) = payload.email {
        active.email = Set(email.trim().to_string());
    }
    if let Some(username) = payload.username {
        active.username = Set(username.trim().to_string());
    }
    if let Some(full_name) = payload.full_name {
        active.full_name = Set(Some(full_name));
    }
    if let Some(ref password) = payload.password {
        let hashed = hash::hash_password(password)
            .map_err(|e| AppError::Internal(format!("Password hash error: {}", e)))?;
        active.hashed_password = Set(hashed);
    }
    active.updated_at = Set(Some(chrono::Utc::now()));

    let updated = active
        .update(&state.db)
        .await
        .map_err(|e| match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => {
                AppError::Conflict("A user with this email or username already exists".into())
            }
            _ => AppError::from(e),
        })?;

    Ok(Json(UserResponse::from(updated)))
}

/// Get a user by id. Non-admins may only fetch themselves; any other id
/// reads as absent, whether or not it exists.
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Users",
    operation_id = "getUser",
    summary = "Get a user by ID",
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "User", body = UserResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Not found, or not visible to the caller (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(current, state), fields(user_id = current.id(), target_id = id))]
pub async fn get_user(
    current: CurrentUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<UserResponse>, AppError> {
    policy::require_user_read(&current.user, id)?;

    if id == current.id() {
        return Ok(Json(UserResponse::from(current.user)));
    }

    let user = user::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".into()))?;

    Ok(Json(UserResponse::from(user)))
}

/// List all users. Admin only.
#[utoipa::path(
    get,
    path = "/",
    tag = "Users",
    operation_id = "listUsers",
    summary = "List all users",
    responses(
        (status = 200, description = "All users", body = [UserResponse]),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(current, state), fields(user_id = current.id()))]
pub async fn list_users(
    current: CurrentUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<UserResponse>>, AppError> {
    policy::require_admin(&current.user)?;

    let users = user::Entity::find()
        .order_by_asc(user::Column::Id)
        .all(&state.db)
        .await?;

    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}
