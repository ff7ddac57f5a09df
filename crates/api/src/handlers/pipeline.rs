//! Kanban board handler.

use axum::extract::State;
use axum::Json;
use salesdesk_core::lead::LeadStatus;
use salesdesk_core::pipeline::{build_board, PipelineColumn};
use salesdesk_db::models::lead::Lead;
use salesdesk_db::repositories::LeadRepo;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/pipeline
///
/// One column per status in pipeline order, newest lead first within each.
pub async fn board(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<DataResponse<Vec<PipelineColumn<Lead>>>>> {
    let leads = LeadRepo::list_all(&state.pool, user.user_id).await?;
    let columns = build_board(leads, stage_of, |lead| lead.value_cents);
    Ok(Json(DataResponse { data: columns }))
}

/// Pipeline stage for a stored lead.
///
/// The `ck_leads_status` constraint keeps unknown tags out of the table, so
/// the fallback only fires if the constraint and [`LeadStatus`] drift apart.
pub(crate) fn stage_of(lead: &Lead) -> LeadStatus {
    lead.status.parse().unwrap_or_else(|_| {
        tracing::warn!(lead_id = lead.id, status = %lead.status, "Unknown lead status in database");
        LeadStatus::New
    })
}
