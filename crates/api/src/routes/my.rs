//! Route definitions for caller-scoped views under `/my`.

use axum::routing::get;
use axum::Router;

use crate::handlers::staff;
use crate::state::AppState;

/// Routes mounted at `/my`.
///
/// ```text
/// GET /staff   -> staff::list_mine (edit)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/staff", get(staff::list_mine))
}
