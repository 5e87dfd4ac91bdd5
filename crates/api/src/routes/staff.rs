//! Route definitions for the `/staff` resource.

use axum::routing::delete;
use axum::Router;

use crate::handlers::staff;
use crate::state::AppState;

/// Routes mounted at `/staff`.
///
/// ```text
/// DELETE /{id}   -> remove (edit or add-staff)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/{id}", delete(staff::remove))
}
