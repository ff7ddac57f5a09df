//! Route definitions for lead-capture forms.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::lead_form;
use crate::state::AppState;

/// Routes mounted at `/forms`.
///
/// ```text
/// GET    /              -> list
/// POST   /              -> create
/// GET    /{id}          -> get_by_id
/// PUT    /{id}          -> update
/// DELETE /{id}          -> delete
/// POST   /{id}/submit   -> submit (public)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(lead_form::list).post(lead_form::create))
        .route(
            "/{id}",
            get(lead_form::get_by_id)
                .put(lead_form::update)
                .delete(lead_form::delete),
        )
        .route("/{id}/submit", post(lead_form::submit))
}
