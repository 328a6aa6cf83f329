//! Handlers for the `/users` resource (user management).
//!
//! Everything except the assignment picker list is admin-only.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use focal_core::error::CoreError;
use focal_core::permissions::Action;
use focal_core::roles::Role;
use focal_core::types::DbId;
use focal_db::models::user::{CreateUser, UpdateUser, UserResponse};
use focal_db::repositories::UserRepo;
use serde::Deserialize;
use validator::Validate;

use crate::auth::password::{hash_password_async, validate_password_strength, MIN_PASSWORD_LENGTH};
use crate::error::{AppError, AppResult};
use crate::extract::Validated;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::{guard, Require};
use crate::response::MessageResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /users`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 1, message = "All fields are required."))]
    pub name: String,
    #[validate(email(message = "A valid email is required"))]
    pub email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters long"))]
    pub password: String,
    pub role: Role,
}

/// Request body for `PUT /users/{id}`.
///
/// A blank or missing password leaves the stored hash unchanged.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    #[validate(length(min = 1, message = "Name, email, and role are required."))]
    pub name: String,
    #[validate(email(message = "A valid email is required"))]
    pub email: String,
    pub role: Role,
    pub password: Option<String>,
    pub is_active: Option<bool>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/users
///
/// Every user, for assignment pickers.
pub async fn list_users(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<Vec<UserResponse>>> {
    auth.require(Action::ListUsers)?;
    let users = UserRepo::list(&state.pool).await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// GET /api/users/all
pub async fn list_all_users(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<Vec<UserResponse>>> {
    auth.require(Action::ListAllUsers)?;
    let users = UserRepo::list(&state.pool).await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// POST /api/users
pub async fn create_user(
    State(state): State<AppState>,
    Require { user: auth, .. }: Require<guard::CreateUser>,
    Validated(input): Validated<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    let password_hash = hash_password_async(input.password).await?;
    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            name: input.name,
            email: input.email,
            password_hash,
            role: input.role,
        },
    )
    .await?;

    tracing::info!(user_id = user.id, role = %user.role, admin_id = auth.user_id, "User created");
    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

/// GET /api/users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<UserResponse>> {
    auth.require(Action::ViewUser)?;
    let user = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;
    Ok(Json(UserResponse::from(user)))
}

/// PUT /api/users/{id}
pub async fn update_user(
    State(state): State<AppState>,
    Require { user: auth, .. }: Require<guard::UpdateUser>,
    Path(id): Path<DbId>,
    Validated(input): Validated<UpdateUserRequest>,
) -> AppResult<Json<UserResponse>> {
    let password_hash = match input.password.filter(|p| !p.trim().is_empty()) {
        Some(password) => {
            validate_password_strength(&password, MIN_PASSWORD_LENGTH)
                .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;
            Some(hash_password_async(password).await?)
        }
        None => None,
    };
    let password_changed = password_hash.is_some();

    let user = UserRepo::update(
        &state.pool,
        id,
        &UpdateUser {
            name: Some(input.name),
            email: Some(input.email),
            password_hash,
            role: Some(input.role),
            is_active: input.is_active,
        },
    )
    .await?
    .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;

    tracing::info!(user_id = id, password_changed, admin_id = auth.user_id, "User updated");
    Ok(Json(UserResponse::from(user)))
}

/// DELETE /api/users/{id}
///
/// Admins cannot delete themselves or other admins.
pub async fn delete_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<MessageResponse>> {
    auth.require(Action::DeleteUser)?;

    if id == auth.user_id {
        return Err(AppError::BadRequest("Cannot delete your own account.".into()));
    }

    let user = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;

    if user.role == Role::Admin.as_str() {
        return Err(AppError::BadRequest("Cannot delete admin users.".into()));
    }

    match UserRepo::delete(&state.pool, id).await {
        Ok(true) => {}
        Ok(false) => return Err(AppError::Core(CoreError::NotFound { entity: "User", id })),
        Err(sqlx::Error::Database(db_err)) if db_err.code().as_deref() == Some("23503") => {
            return Err(AppError::BadRequest(
                "Cannot delete a user who still manages projects.".into(),
            ));
        }
        Err(e) => return Err(e.into()),
    }

    tracing::info!(user_id = id, admin_id = auth.user_id, "User deleted");
    Ok(Json(MessageResponse::new("User deleted successfully")))
}
