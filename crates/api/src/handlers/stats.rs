//! Handlers for duty statistics.

use axum::extract::{Path, Query, State};
use axum::Json;
use chrono::{Datelike, Utc};
use serde::Deserialize;
use wardroster_core::calendar::parse_month_key;
use wardroster_core::stats::{UserDutyProfile, WardDutyStats};
use wardroster_core::types::DbId;

use super::ward::ensure_ward_access;
use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireEditor;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for `GET /wards/{id}/analytics`.
#[derive(Debug, Deserialize)]
pub struct AnalyticsParams {
    /// `YYYY-MM` (default: the current month, UTC).
    pub month: Option<String>,
}

/// GET /api/v1/wards/{id}/analytics?month=YYYY-MM
pub async fn ward_analytics(
    State(state): State<AppState>,
    RequireEditor(user): RequireEditor,
    Path(ward_id): Path<DbId>,
    Query(params): Query<AnalyticsParams>,
) -> AppResult<Json<DataResponse<WardDutyStats>>> {
    ensure_ward_access(&state, &user, ward_id).await?;
    let (year, month) = match params.month.as_deref() {
        Some(raw) => parse_month_key(raw)?,
        None => {
            let today = Utc::now().date_naive();
            (today.year(), today.month())
        }
    };
    let stats = state.roster.ward_duty_stats(ward_id, year, month).await?;
    Ok(Json(DataResponse { data: stats }))
}

/// GET /api/v1/wards/{id}/profile
///
/// The caller's own duty counts. `data` is null when no roster entry on
/// the ward matches the caller.
pub async fn my_profile(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(ward_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Option<UserDutyProfile>>>> {
    ensure_ward_access(&state, &auth_user, ward_id).await?;
    let profile = state
        .roster
        .user_duty_profile(ward_id, auth_user.user_id, Utc::now().date_naive())
        .await?;
    Ok(Json(DataResponse { data: profile }))
}
