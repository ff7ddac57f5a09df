use axum::routing::get;
use axum::Router;

use crate::handlers::pipeline;
use crate::state::AppState;

/// Routes mounted at `/pipeline`.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(pipeline::board))
}
