//! Handlers for a ward's staff roster.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use wardroster_core::error::CoreError;
use wardroster_core::models::{Staff, UserProfile};
use wardroster_core::roles::DutyRole;
use wardroster_core::roster::StaffRemoval;
use wardroster_core::types::DbId;
use wardroster_core::visibility;

use super::ward::ensure_ward_access;
use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::{RequireEditor, RequireStaffManager};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /wards/{id}/staff`.
#[derive(Debug, Deserialize)]
pub struct AddStaffRequest {
    pub name: String,
    pub role: DutyRole,
}

/// Request body for `POST /wards/{id}/staff/promote`.
#[derive(Debug, Deserialize)]
pub struct PromoteUserRequest {
    pub user_id: DbId,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/wards/{id}/staff
///
/// Filtered to the duty roles the caller may see.
pub async fn list(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(ward_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Staff>>>> {
    ensure_ward_access(&state, &auth_user, ward_id).await?;
    let staff = state
        .roster
        .list_visible_staff(ward_id, auth_user.role)
        .await?;
    Ok(Json(DataResponse { data: staff }))
}

/// POST /api/v1/wards/{id}/staff
pub async fn add(
    State(state): State<AppState>,
    RequireStaffManager(user): RequireStaffManager,
    Path(ward_id): Path<DbId>,
    Json(input): Json<AddStaffRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Staff>>)> {
    ensure_ward_access(&state, &user, ward_id).await?;
    let staff = state
        .roster
        .add_staff(ward_id, &input.name, input.role)
        .await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: staff })))
}

/// POST /api/v1/wards/{id}/staff/promote
///
/// Put a login user assigned to the ward on its roster.
pub async fn promote(
    State(state): State<AppState>,
    RequireStaffManager(user): RequireStaffManager,
    Path(ward_id): Path<DbId>,
    Json(input): Json<PromoteUserRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Staff>>)> {
    ensure_ward_access(&state, &user, ward_id).await?;
    let staff = state.roster.promote_user(ward_id, input.user_id).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: staff })))
}

/// DELETE /api/v1/staff/{id}
///
/// Removes the staff member and every cell they occupy. `data` is null when
/// the id was already gone.
pub async fn remove(
    State(state): State<AppState>,
    RequireStaffManager(user): RequireStaffManager,
    Path(staff_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Option<StaffRemoval>>>> {
    match state.roster.find_staff(staff_id).await {
        Ok(existing) => ensure_ward_access(&state, &user, existing.ward_id).await?,
        Err(CoreError::NotFound { .. }) => {}
        Err(e) => return Err(e.into()),
    }
    let removal = state.roster.remove_staff(staff_id).await?;
    Ok(Json(DataResponse { data: removal }))
}

/// GET /api/v1/my/staff
///
/// Staff across every ward assigned to the calling in-charge, filtered to
/// the duty roles they may see.
pub async fn list_mine(
    State(state): State<AppState>,
    RequireEditor(user): RequireEditor,
) -> AppResult<Json<DataResponse<Vec<Staff>>>> {
    let staff = state.roster.list_staff_for_user(user.user_id).await?;
    Ok(Json(DataResponse {
        data: visibility::visible_staff(&user.capabilities(), staff),
    }))
}

/// GET /api/v1/wards/{id}/users
///
/// Login users assigned to the ward, the candidates for promotion.
pub async fn list_ward_users(
    State(state): State<AppState>,
    RequireStaffManager(user): RequireStaffManager,
    Path(ward_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<UserProfile>>>> {
    ensure_ward_access(&state, &user, ward_id).await?;
    let users = state.roster.list_ward_users(ward_id).await?;
    Ok(Json(DataResponse {
        data: users.iter().map(|u| u.profile()).collect(),
    }))
}
