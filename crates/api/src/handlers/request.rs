//! Handlers for duty change requests.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use wardroster_core::calendar::DateKey;
use wardroster_core::models::{ChangeRequest, Requester};
use wardroster_core::roster::ApprovalOutcome;
use wardroster_core::types::DbId;

use super::ward::ensure_ward_access;
use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::{RequireApprover, RequireRestricted};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /wards/{id}/requests`.
#[derive(Debug, Deserialize)]
pub struct SubmitRequest {
    pub date_key: DateKey,
    /// Shift label or id, e.g. `"Night"`.
    pub shift: String,
    pub reason: String,
}

#[derive(Debug, Serialize)]
pub struct PendingCount {
    pub pending: usize,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/wards/{id}/requests
///
/// Newest first. Roles without edit rights see only their own requests.
pub async fn list(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(ward_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<ChangeRequest>>>> {
    ensure_ward_access(&state, &auth_user, ward_id).await?;
    let mut requests = state.roster.list_requests(ward_id).await?;
    if auth_user.capabilities().is_restricted() {
        requests.retain(|r| r.requested_by == auth_user.user_id);
    }
    Ok(Json(DataResponse { data: requests }))
}

/// POST /api/v1/wards/{id}/requests
///
/// File a pending request in the caller's name.
pub async fn submit(
    State(state): State<AppState>,
    RequireRestricted(auth_user): RequireRestricted,
    Path(ward_id): Path<DbId>,
    Json(input): Json<SubmitRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<ChangeRequest>>)> {
    ensure_ward_access(&state, &auth_user, ward_id).await?;
    let user = state.roster.find_user(auth_user.user_id).await?;
    let request = state
        .roster
        .submit(
            ward_id,
            &Requester::from(&user),
            input.date_key,
            &input.shift,
            &input.reason,
        )
        .await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: request })))
}

/// GET /api/v1/wards/{id}/requests/pending-count
pub async fn pending_count(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(ward_id): Path<DbId>,
) -> AppResult<Json<DataResponse<PendingCount>>> {
    ensure_ward_access(&state, &auth_user, ward_id).await?;
    let pending = state.roster.count_pending(ward_id).await?;
    Ok(Json(DataResponse {
        data: PendingCount { pending },
    }))
}

/// POST /api/v1/requests/{id}/approve
///
/// Approves and, when the requester is on the roster, assigns them. The
/// `effect` field reports whether the assignment happened.
pub async fn approve(
    State(state): State<AppState>,
    RequireApprover(user): RequireApprover,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<ApprovalOutcome>>> {
    let request = state.roster.find_request(id).await?;
    ensure_ward_access(&state, &user, request.ward_id).await?;
    let outcome = state.roster.approve(id).await?;
    tracing::info!(approver_id = user.user_id, request_id = id, "Change request approved");
    Ok(Json(DataResponse { data: outcome }))
}

/// POST /api/v1/requests/{id}/reject
pub async fn reject(
    State(state): State<AppState>,
    RequireApprover(user): RequireApprover,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<ChangeRequest>>> {
    let request = state.roster.find_request(id).await?;
    ensure_ward_access(&state, &user, request.ward_id).await?;
    let request = state.roster.reject(id).await?;
    tracing::info!(approver_id = user.user_id, request_id = id, "Change request rejected");
    Ok(Json(DataResponse { data: request }))
}
