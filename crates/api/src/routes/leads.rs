//! Route definitions for the `/leads` resource.

use axum::routing::{get, patch};
use axum::Router;

use crate::handlers::lead;
use crate::state::AppState;

/// Routes mounted at `/leads`.
///
/// ```text
/// GET    /                   -> list
/// POST   /                   -> create
/// GET    /{id}               -> get_by_id
/// PUT    /{id}               -> update
/// DELETE /{id}               -> delete
/// PATCH  /{id}/status        -> update_status
/// GET    /{id}/contacts      -> list_contacts
/// GET    /{id}/activities    -> list_activities
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(lead::list).post(lead::create))
        .route(
            "/{id}",
            get(lead::get_by_id).put(lead::update).delete(lead::delete),
        )
        .route("/{id}/status", patch(lead::update_status))
        .route("/{id}/contacts", get(lead::list_contacts))
        .route("/{id}/activities", get(lead::list_activities))
}
