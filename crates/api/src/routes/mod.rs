pub mod activities;
pub mod auth;
pub mod contacts;
pub mod dashboard;
pub mod forms;
pub mod health;
pub mod leads;
pub mod pipeline;

use axum::routing::get;
use axum::Router;

use crate::state::AppState;
use crate::ws;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /ws                              WebSocket change feed (?token=)
///
/// /auth/signup                     sign up (public)
/// /auth/login                      login (public)
/// /auth/refresh                    refresh (public)
/// /auth/logout                     logout
/// /auth/me                         current user
///
/// /leads                           list, create
/// /leads/{id}                      get, update, delete
/// /leads/{id}/status               pipeline stage change (PATCH)
/// /leads/{id}/contacts             contacts linked to the lead
/// /leads/{id}/activities           activities for the lead
///
/// /contacts                        list, create
/// /contacts/{id}                   get, update, delete
///
/// /activities                      list (?lead_id=&completed=), create
/// /activities/{id}                 get, update, delete
/// /activities/{id}/complete        set completed flag (POST)
///
/// /forms                           list, create
/// /forms/{id}                      get, update, delete
/// /forms/{id}/submit               public submission (POST)
///
/// /pipeline                        kanban board
/// /dashboard/stats                 aggregated statistics
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // WebSocket change feed.
        .route("/ws", get(ws::ws_handler))
        // Authentication routes.
        .nest("/auth", auth::router())
        // CRM resources.
        .nest("/leads", leads::router())
        .nest("/contacts", contacts::router())
        .nest("/activities", activities::router())
        .nest("/forms", forms::router())
        // Aggregate views.
        .nest("/pipeline", pipeline::router())
        .nest("/dashboard", dashboard::router())
}
