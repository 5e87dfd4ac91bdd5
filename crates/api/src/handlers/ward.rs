//! Handlers for the `/wards` directory.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use wardroster_core::error::CoreError;
use wardroster_core::models::Ward;
use wardroster_core::roles::UserRole;
use wardroster_core::roster::{select_current_ward, WardDeletion};
use wardroster_core::types::DbId;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireCreateWard;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Query parameters for `GET /wards`.
#[derive(Debug, Deserialize)]
pub struct WardListParams {
    /// The ward the client currently has selected, if any.
    pub current: Option<DbId>,
}

#[derive(Debug, Serialize)]
pub struct WardListResponse {
    pub wards: Vec<Ward>,
    /// `current` if it is still listed, else the first ward.
    pub current_ward_id: Option<DbId>,
}

/// Request body for `POST /wards`.
#[derive(Debug, Deserialize)]
pub struct CreateWardRequest {
    pub name: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/wards
///
/// Administrators see every ward. Everyone else sees the wards they are
/// assigned to, in assignment order.
pub async fn list(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Query(params): Query<WardListParams>,
) -> AppResult<Json<DataResponse<WardListResponse>>> {
    let all = state.roster.list_wards().await?;

    let wards = if auth_user.role == UserRole::Admin {
        all
    } else {
        let user = state.roster.find_user(auth_user.user_id).await?;
        user.assigned_wards
            .iter()
            .filter_map(|id| all.iter().find(|w| w.id == *id).cloned())
            .collect()
    };

    let current_ward_id = select_current_ward(&wards, params.current);
    Ok(Json(DataResponse {
        data: WardListResponse {
            wards,
            current_ward_id,
        },
    }))
}

/// POST /api/v1/wards
pub async fn create(
    State(state): State<AppState>,
    RequireCreateWard(_admin): RequireCreateWard,
    Json(input): Json<CreateWardRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Ward>>)> {
    let ward = state.roster.create_ward(&input.name).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: ward })))
}

/// DELETE /api/v1/wards/{id}
///
/// Cascades to the ward's assignments, requests, staff and user
/// assignments. Returns what was removed and the ward to select next.
pub async fn delete(
    State(state): State<AppState>,
    RequireCreateWard(admin): RequireCreateWard,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<WardDeletion>>> {
    let deletion = state.roster.delete_ward(id).await?;
    tracing::info!(admin_id = admin.user_id, ward_id = id, "Ward deleted via API");
    Ok(Json(DataResponse { data: deletion }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Reject callers who are neither administrators nor assigned to the ward.
pub(crate) async fn ensure_ward_access(
    state: &AppState,
    auth_user: &AuthUser,
    ward_id: DbId,
) -> AppResult<()> {
    if auth_user.role == UserRole::Admin {
        return Ok(());
    }
    let user = state.roster.find_user(auth_user.user_id).await?;
    if !user.is_assigned_to(ward_id) {
        return Err(AppError::Core(CoreError::Forbidden(
            "You are not assigned to this ward".into(),
        )));
    }
    Ok(())
}
