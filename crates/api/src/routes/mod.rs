pub mod admin;
pub mod auth;
pub mod health;
pub mod my;
pub mod requests;
pub mod staff;
pub mod wards;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                                      login (public)
/// /auth/me                                         current user
///
/// /admin/users                                     list, create (manage users)
/// /admin/users/{id}                                get, update, delete
///
/// /wards                                           list, create (create ward)
/// /wards/{id}                                      delete (create ward)
/// /wards/{id}/staff                                list (visibility-filtered), add
/// /wards/{id}/staff/promote                        promote a login user
/// /wards/{id}/users                                ward login users (edit or add staff)
/// /wards/{id}/week                                 weekly grid
/// /wards/{id}/cells/{date}/{shift}                 one cell
/// /wards/{id}/cells/{date}/{shift}/staff/{sid}     assign (PUT), unassign (DELETE)
/// /wards/{id}/requests                             list, submit (restricted roles)
/// /wards/{id}/requests/pending-count               pending count
/// /wards/{id}/analytics                            monthly duty stats (edit)
/// /wards/{id}/profile                              caller's duty profile
///
/// /staff/{id}                                      remove staff
///
/// /requests/{id}/approve                           approve (approve)
/// /requests/{id}/reject                            reject (approve)
///
/// /my/staff                                        staff across my wards (edit)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Authentication.
        .nest("/auth", auth::router())
        // User directory.
        .nest("/admin", admin::router())
        // Wards and everything scoped to one ward.
        .nest("/wards", wards::router())
        .nest("/staff", staff::router())
        // Change request workflow.
        .nest("/requests", requests::router())
        // Caller-scoped views.
        .nest("/my", my::router())
}
