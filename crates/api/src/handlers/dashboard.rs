//! Dashboard statistics handler.

use axum::extract::State;
use axum::Json;
use salesdesk_core::dashboard::{compute_stats, DashboardStats, LeadFacts};
use salesdesk_db::repositories::LeadRepo;

use crate::error::AppResult;
use crate::handlers::pipeline::stage_of;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// GET /api/v1/dashboard/stats
pub async fn stats(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<DashboardStats>> {
    let leads = LeadRepo::list_all(&state.pool, user.user_id).await?;
    let facts: Vec<LeadFacts<'_>> = leads
        .iter()
        .map(|lead| LeadFacts {
            status: stage_of(lead),
            source: &lead.source,
            specialization: lead.specialization.as_deref(),
            value_cents: lead.value_cents,
        })
        .collect();

    Ok(Json(compute_stats(&facts)))
}
