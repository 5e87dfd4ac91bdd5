//! Route definitions for the `/wards` resource and its sub-resources.

use axum::routing::{delete, get, post, put};
use axum::Router;

use crate::handlers::{grid, request, staff, stats, ward};
use crate::state::AppState;

/// Routes mounted at `/wards`.
///
/// ```text
/// GET    /                                               -> ward::list
/// POST   /                                               -> ward::create
/// DELETE /{id}                                           -> ward::delete
/// GET    /{id}/staff                                     -> staff::list
/// POST   /{id}/staff                                     -> staff::add
/// POST   /{id}/staff/promote                             -> staff::promote
/// GET    /{id}/users                                     -> staff::list_ward_users
/// GET    /{id}/week                                      -> grid::week
/// GET    /{id}/cells/{date}/{shift}                      -> grid::cell
/// PUT    /{id}/cells/{date}/{shift}/staff/{staff_id}     -> grid::assign
/// DELETE /{id}/cells/{date}/{shift}/staff/{staff_id}     -> grid::unassign
/// GET    /{id}/requests                                  -> request::list
/// POST   /{id}/requests                                  -> request::submit
/// GET    /{id}/requests/pending-count                    -> request::pending_count
/// GET    /{id}/analytics                                 -> stats::ward_analytics
/// GET    /{id}/profile                                   -> stats::my_profile
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(ward::list).post(ward::create))
        .route("/{id}", delete(ward::delete))
        .route("/{id}/staff", get(staff::list).post(staff::add))
        .route("/{id}/staff/promote", post(staff::promote))
        .route("/{id}/users", get(staff::list_ward_users))
        .route("/{id}/week", get(grid::week))
        .route("/{id}/cells/{date}/{shift}", get(grid::cell))
        .route(
            "/{id}/cells/{date}/{shift}/staff/{staff_id}",
            put(grid::assign).delete(grid::unassign),
        )
        .route("/{id}/requests", get(request::list).post(request::submit))
        .route("/{id}/requests/pending-count", get(request::pending_count))
        .route("/{id}/analytics", get(stats::ward_analytics))
        .route("/{id}/profile", get(stats::my_profile))
}
