//! Handlers for the weekly assignment grid.

use axum::extract::{Path, Query, State};
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use wardroster_core::calendar::DateKey;
use wardroster_core::error::CoreError;
use wardroster_core::roster::WeekGrid;
use wardroster_core::shifts::Shift;
use wardroster_core::types::DbId;

use super::ward::ensure_ward_access;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireEditor;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Query parameters for `GET /wards/{id}/week`.
#[derive(Debug, Deserialize)]
pub struct WeekParams {
    /// Any date in the wanted week (default: today, UTC).
    pub anchor: Option<DateKey>,
}

#[derive(Debug, Serialize)]
pub struct CellResponse {
    pub date_key: DateKey,
    pub shift: Shift,
    pub staff_ids: Vec<DbId>,
}

#[derive(Debug, Serialize)]
pub struct AssignResponse {
    /// `false` when the staff member was already in the cell.
    pub created: bool,
}

#[derive(Debug, Serialize)]
pub struct UnassignResponse {
    /// `false` when the staff member was not in the cell.
    pub removed: bool,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/wards/{id}/week?anchor=YYYY-MM-DD
pub async fn week(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(ward_id): Path<DbId>,
    Query(params): Query<WeekParams>,
) -> AppResult<Json<DataResponse<WeekGrid>>> {
    ensure_ward_access(&state, &auth_user, ward_id).await?;
    let anchor = params
        .anchor
        .map(DateKey::date)
        .unwrap_or_else(|| Utc::now().date_naive());
    let grid = state
        .roster
        .week_grid(ward_id, anchor, auth_user.role)
        .await?;
    Ok(Json(DataResponse { data: grid }))
}

/// GET /api/v1/wards/{id}/cells/{date}/{shift}
pub async fn cell(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path((ward_id, date_key, shift)): Path<(DbId, DateKey, Shift)>,
) -> AppResult<Json<DataResponse<CellResponse>>> {
    ensure_ward_access(&state, &auth_user, ward_id).await?;
    let staff_ids = state
        .roster
        .list_visible_cell(ward_id, date_key, shift, auth_user.role)
        .await?;
    Ok(Json(DataResponse {
        data: CellResponse {
            date_key,
            shift,
            staff_ids,
        },
    }))
}

/// PUT /api/v1/wards/{id}/cells/{date}/{shift}/staff/{staff_id}
///
/// The staff member must be on this ward's roster and visible to the caller.
pub async fn assign(
    State(state): State<AppState>,
    RequireEditor(user): RequireEditor,
    Path((ward_id, date_key, shift, staff_id)): Path<(DbId, DateKey, Shift, DbId)>,
) -> AppResult<Json<DataResponse<AssignResponse>>> {
    ensure_ward_access(&state, &user, ward_id).await?;

    let staff = state.roster.find_staff(staff_id).await?;
    if staff.ward_id != ward_id {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Staff {staff_id} is not on this ward's roster"
        ))));
    }
    if !user.capabilities().can_see(staff.role) {
        return Err(AppError::Core(CoreError::Forbidden(format!(
            "Your role cannot assign {} staff",
            staff.role.label()
        ))));
    }

    let created = state
        .roster
        .assign(ward_id, date_key, shift, staff_id)
        .await?;
    Ok(Json(DataResponse {
        data: AssignResponse { created },
    }))
}

/// DELETE /api/v1/wards/{id}/cells/{date}/{shift}/staff/{staff_id}
pub async fn unassign(
    State(state): State<AppState>,
    RequireEditor(user): RequireEditor,
    Path((ward_id, date_key, shift, staff_id)): Path<(DbId, DateKey, Shift, DbId)>,
) -> AppResult<Json<DataResponse<UnassignResponse>>> {
    ensure_ward_access(&state, &user, ward_id).await?;
    let removed = state
        .roster
        .unassign(ward_id, date_key, shift, staff_id)
        .await?;
    Ok(Json(DataResponse {
        data: UnassignResponse { removed },
    }))
}
