//! Handlers for the `/admin` resource (user directory).
//!
//! All handlers require the manage-users capability via [`RequireManageUsers`].

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use wardroster_core::error::CoreError;
use wardroster_core::models::{CreateUser, UpdateUser, UserProfile};
use wardroster_core::roles::UserRole;
use wardroster_core::types::DbId;

use crate::auth::password::{hash_password, validate_password_strength, MIN_PASSWORD_LENGTH};
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireManageUsers;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /admin/users`.
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub password: String,
    pub full_name: String,
    pub role: UserRole,
    #[serde(default)]
    pub assigned_wards: Vec<DbId>,
}

/// Request body for `PUT /admin/users/{id}`. Absent fields are unchanged.
#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub username: Option<String>,
    pub password: Option<String>,
    pub full_name: Option<String>,
    pub role: Option<UserRole>,
    pub assigned_wards: Option<Vec<DbId>>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/admin/users
///
/// Validates password strength and stores only its Argon2id hash.
pub async fn create_user(
    State(state): State<AppState>,
    RequireManageUsers(admin): RequireManageUsers,
    Json(input): Json<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<UserProfile>>)> {
    let password_hash = checked_hash(&input.password)?;

    let user = state
        .roster
        .create_user(CreateUser {
            username: input.username,
            password_hash,
            full_name: input.full_name,
            role: input.role,
            assigned_wards: input.assigned_wards,
        })
        .await?;
    tracing::info!(admin_id = admin.user_id, user_id = user.id, "Admin created user");

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: user.profile(),
        }),
    ))
}

/// GET /api/v1/admin/users
pub async fn list_users(
    State(state): State<AppState>,
    RequireManageUsers(_admin): RequireManageUsers,
) -> AppResult<Json<DataResponse<Vec<UserProfile>>>> {
    let users = state.roster.list_users().await?;
    Ok(Json(DataResponse {
        data: users.iter().map(|u| u.profile()).collect(),
    }))
}

/// GET /api/v1/admin/users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    RequireManageUsers(_admin): RequireManageUsers,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<UserProfile>>> {
    let user = state.roster.find_user(id).await?;
    Ok(Json(DataResponse {
        data: user.profile(),
    }))
}

/// PUT /api/v1/admin/users/{id}
///
/// Partial update. A new password is validated and re-hashed.
pub async fn update_user(
    State(state): State<AppState>,
    RequireManageUsers(_admin): RequireManageUsers,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateUserRequest>,
) -> AppResult<Json<DataResponse<UserProfile>>> {
    let password_hash = input.password.as_deref().map(checked_hash).transpose()?;

    let user = state
        .roster
        .update_user(
            id,
            UpdateUser {
                username: input.username,
                password_hash,
                full_name: input.full_name,
                role: input.role,
                assigned_wards: input.assigned_wards,
            },
        )
        .await?;

    Ok(Json(DataResponse {
        data: user.profile(),
    }))
}

/// DELETE /api/v1/admin/users/{id}
///
/// Administrators cannot delete their own account.
pub async fn delete_user(
    State(state): State<AppState>,
    RequireManageUsers(admin): RequireManageUsers,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if admin.user_id == id {
        return Err(AppError::BadRequest(
            "Administrators cannot delete their own account".into(),
        ));
    }
    state.roster.delete_user(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn checked_hash(password: &str) -> AppResult<String> {
    validate_password_strength(password, MIN_PASSWORD_LENGTH)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;
    hash_password(password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))
}
