//! Handlers for the `/leads` resource.
//!
//! Every call is scoped to the authenticated user; another owner's lead is
//! reported as not found.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use salesdesk_core::error::CoreError;
use salesdesk_core::lead::{
    normalize_source, validate_description, validate_full_name, validate_value_cents, LeadStatus,
    ENTITY_LEAD,
};
use salesdesk_core::listing::{build_ilike_pattern, order_by_clause, LeadSort, SortOrder};
use salesdesk_core::types::DbId;
use salesdesk_core::validation::{
    normalize_optional_email, patch_str, trim_nullable, trimmed, validate_phone,
};
use salesdesk_db::models::activity::Activity;
use salesdesk_db::models::contact::Contact;
use salesdesk_db::models::lead::{CreateLead, Lead, LeadListFilter, UpdateLead};
use salesdesk_db::repositories::{ActivityRepo, ContactRepo, LeadRepo};
use salesdesk_events::{ChangeEvent, ChangeTable};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Query parameters for `GET /leads`.
#[derive(Debug, Default, Deserialize)]
pub struct LeadListParams {
    pub status: Option<String>,
    pub source: Option<String>,
    pub search: Option<String>,
    pub sort: Option<String>,
    pub order: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Request body for `PATCH /leads/{id}/status`.
#[derive(Debug, Deserialize)]
pub struct StatusChangeRequest {
    pub status: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/leads
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
    Query(params): Query<LeadListParams>,
) -> AppResult<Json<DataResponse<Vec<Lead>>>> {
    let filter = build_list_filter(&params)?;
    let leads = LeadRepo::list(&state.pool, user.user_id, &filter).await?;
    Ok(Json(DataResponse { data: leads }))
}

/// POST /api/v1/leads
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(mut input): Json<CreateLead>,
) -> AppResult<(StatusCode, Json<Lead>)> {
    normalize_create(&mut input)?;
    let lead = LeadRepo::create(&state.pool, user.user_id, &input).await?;

    tracing::info!(user_id = user.user_id, lead_id = lead.id, "Lead created");
    state.notify(ChangeEvent::inserted(ChangeTable::Leads, lead.id, user.user_id));
    Ok((StatusCode::CREATED, Json(lead)))
}

/// GET /api/v1/leads/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Lead>> {
    let lead = LeadRepo::find_by_id(&state.pool, user.user_id, id)
        .await?
        .ok_or_else(|| AppError::not_found(ENTITY_LEAD, id))?;
    Ok(Json(lead))
}

/// PUT /api/v1/leads/{id}
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(mut input): Json<UpdateLead>,
) -> AppResult<Json<Lead>> {
    normalize_update(&mut input)?;
    let lead = LeadRepo::update(&state.pool, user.user_id, id, &input)
        .await?
        .ok_or_else(|| AppError::not_found(ENTITY_LEAD, id))?;

    state.notify(ChangeEvent::updated(ChangeTable::Leads, lead.id, user.user_id));
    Ok(Json(lead))
}

/// PATCH /api/v1/leads/{id}/status
///
/// Pipeline drag-and-drop. Any status may replace any other; no conflict
/// detection is performed, so the last write wins.
pub async fn update_status(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<StatusChangeRequest>,
) -> AppResult<Json<Lead>> {
    let status: LeadStatus = input.status.trim().parse()?;
    let lead = LeadRepo::update_status(&state.pool, user.user_id, id, status.as_str())
        .await?
        .ok_or_else(|| AppError::not_found(ENTITY_LEAD, id))?;

    tracing::info!(
        user_id = user.user_id,
        lead_id = id,
        status = %status,
        "Lead moved to pipeline stage"
    );
    state.notify(ChangeEvent::updated(ChangeTable::Leads, lead.id, user.user_id));
    Ok(Json(lead))
}

/// DELETE /api/v1/leads/{id}
///
/// Also announces the activities removed and contacts unlinked with it.
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = LeadRepo::delete(&state.pool, user.user_id, id)
        .await?
        .ok_or_else(|| AppError::not_found(ENTITY_LEAD, id))?;
    tracing::info!(
        user_id = user.user_id,
        lead_id = id,
        contacts_unlinked = deleted.contact_ids.len(),
        activities_removed = deleted.activity_ids.len(),
        "Lead deleted"
    );

    state.notify(ChangeEvent::deleted(ChangeTable::Leads, id, user.user_id));
    for contact_id in deleted.contact_ids {
        state.notify(ChangeEvent::updated(ChangeTable::Contacts, contact_id, user.user_id));
    }
    for activity_id in deleted.activity_ids {
        state.notify(ChangeEvent::deleted(ChangeTable::Activities, activity_id, user.user_id));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/leads/{id}/contacts
pub async fn list_contacts(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Contact>>>> {
    ensure_lead_exists(&state, user.user_id, id).await?;
    let contacts = ContactRepo::list_by_lead(&state.pool, user.user_id, id).await?;
    Ok(Json(DataResponse { data: contacts }))
}

/// GET /api/v1/leads/{id}/activities
pub async fn list_activities(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Query(page): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<Vec<Activity>>>> {
    ensure_lead_exists(&state, user.user_id, id).await?;
    let (limit, offset) = page.resolve();
    let activities =
        ActivityRepo::list(&state.pool, user.user_id, Some(id), None, limit, offset).await?;
    Ok(Json(DataResponse { data: activities }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// 404 unless `lead_id` exists for `owner_id`.
pub(crate) async fn ensure_lead_exists(
    state: &AppState,
    owner_id: DbId,
    lead_id: DbId,
) -> AppResult<()> {
    if LeadRepo::exists(&state.pool, owner_id, lead_id).await? {
        Ok(())
    } else {
        Err(AppError::not_found(ENTITY_LEAD, lead_id))
    }
}

/// Validate a referenced lead for contacts and activities.
///
/// A reference to a lead the caller does not own is a validation error,
/// not a 404, because the referring row is what is being written.
pub(crate) async fn validate_lead_reference(
    state: &AppState,
    owner_id: DbId,
    lead_id: Option<DbId>,
) -> AppResult<()> {
    let Some(lead_id) = lead_id else {
        return Ok(());
    };
    if LeadRepo::exists(&state.pool, owner_id, lead_id).await? {
        Ok(())
    } else {
        Err(AppError::Core(CoreError::Validation(format!(
            "lead_id {lead_id} does not refer to an existing lead"
        ))))
    }
}

fn build_list_filter(params: &LeadListParams) -> Result<LeadListFilter, CoreError> {
    let status = trimmed(params.status.as_deref())
        .map(|s| s.parse::<LeadStatus>())
        .transpose()?
        .map(|s| s.as_str().to_string());
    let sort = LeadSort::parse(params.sort.as_deref())?;
    let order = SortOrder::parse(params.order.as_deref())?;
    let (limit, offset) = PaginationParams {
        limit: params.limit,
        offset: params.offset,
    }
    .resolve();

    Ok(LeadListFilter {
        status,
        source: trimmed(params.source.as_deref()).map(str::to_string),
        search_pattern: build_ilike_pattern(params.search.as_deref()),
        order_by: order_by_clause(sort, order),
        limit,
        offset,
    })
}

fn normalize_create(input: &mut CreateLead) -> Result<(), CoreError> {
    validate_full_name(&input.full_name)?;
    input.full_name = input.full_name.trim().to_string();
    input.source = Some(normalize_source(input.source.as_deref())?);
    if let Some(status) = input.status.as_deref() {
        input.status = Some(status.trim().parse::<LeadStatus>()?.as_str().to_string());
    }
    if let Some(value) = input.value_cents {
        validate_value_cents(value)?;
    }
    validate_description(input.description.as_deref())?;
    input.email = normalize_optional_email(input.email.as_deref())?;
    validate_phone(input.phone.as_deref())?;
    Ok(())
}

fn normalize_update(input: &mut UpdateLead) -> Result<(), CoreError> {
    if let Some(name) = input.full_name.as_deref() {
        validate_full_name(name)?;
        input.full_name = Some(name.trim().to_string());
    }
    if input.source.is_some() {
        input.source = Some(normalize_source(input.source.as_deref())?);
    }
    if let Some(status) = input.status.as_deref() {
        input.status = Some(status.trim().parse::<LeadStatus>()?.as_str().to_string());
    }
    if let Some(value) = input.value_cents {
        validate_value_cents(value)?;
    }
    input.description = trim_nullable(input.description.take());
    validate_description(patch_str(&input.description))?;
    input.specialization = trim_nullable(input.specialization.take());
    input.job_title = trim_nullable(input.job_title.take());
    if let Some(email) = input.email.take() {
        input.email = Some(normalize_optional_email(email.as_deref())?);
    }
    input.phone = trim_nullable(input.phone.take());
    validate_phone(patch_str(&input.phone))?;
    Ok(())
}
