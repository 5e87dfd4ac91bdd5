//! Route definitions for the `/requests` resource.

use axum::routing::post;
use axum::Router;

use crate::handlers::request;
use crate::state::AppState;

/// Routes mounted at `/requests`.
///
/// ```text
/// POST /{id}/approve   -> approve
/// POST /{id}/reject    -> reject
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{id}/approve", post(request::approve))
        .route("/{id}/reject", post(request::reject))
}
