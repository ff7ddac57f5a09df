//! Handlers for lead-capture forms (`/forms`).
//!
//! Forms are managed by their owner like any other resource. The one public
//! endpoint is [`submit`], which turns a submission into a `new` lead owned
//! by the form's owner.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use salesdesk_core::error::CoreError;
use salesdesk_core::lead::{
    normalize_source, validate_description, validate_full_name, LeadStatus,
};
use salesdesk_core::lead_form::{
    validate_form_title, validate_submission_reachable, DEFAULT_FORM_SOURCE, ENTITY_LEAD_FORM,
};
use salesdesk_core::types::DbId;
use salesdesk_core::validation::{
    normalize_optional_email, patch_str, trim_nullable, trimmed, validate_phone,
};
use salesdesk_db::models::lead::{CreateLead, Lead};
use salesdesk_db::models::lead_form::{CreateLeadForm, FormSubmission, LeadForm, UpdateLeadForm};
use salesdesk_db::repositories::{LeadFormRepo, LeadRepo};
use salesdesk_events::{ChangeEvent, ChangeTable};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/forms
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<DataResponse<Vec<LeadForm>>>> {
    let forms = LeadFormRepo::list(&state.pool, user.user_id).await?;
    Ok(Json(DataResponse { data: forms }))
}

/// POST /api/v1/forms
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(mut input): Json<CreateLeadForm>,
) -> AppResult<(StatusCode, Json<LeadForm>)> {
    validate_form_title(&input.title)?;
    input.title = input.title.trim().to_string();
    input.source = Some(match trimmed(input.source.as_deref()) {
        Some(source) => normalize_source(Some(source))?,
        None => DEFAULT_FORM_SOURCE.to_string(),
    });
    validate_description(input.description.as_deref())?;

    let form = LeadFormRepo::create(&state.pool, user.user_id, &input).await?;
    tracing::info!(user_id = user.user_id, form_id = form.id, "Lead form created");
    state.notify(ChangeEvent::inserted(
        ChangeTable::LeadForms,
        form.id,
        user.user_id,
    ));
    Ok((StatusCode::CREATED, Json(form)))
}

/// GET /api/v1/forms/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<LeadForm>> {
    let form = LeadFormRepo::find_by_id(&state.pool, user.user_id, id)
        .await?
        .ok_or_else(|| AppError::not_found(ENTITY_LEAD_FORM, id))?;
    Ok(Json(form))
}

/// PUT /api/v1/forms/{id}
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(mut input): Json<UpdateLeadForm>,
) -> AppResult<Json<LeadForm>> {
    if let Some(title) = input.title.as_deref() {
        validate_form_title(title)?;
        input.title = Some(title.trim().to_string());
    }
    if input.source.is_some() {
        input.source = Some(normalize_source(input.source.as_deref())?);
    }
    input.description = trim_nullable(input.description.take());
    validate_description(patch_str(&input.description))?;

    let form = LeadFormRepo::update(&state.pool, user.user_id, id, &input)
        .await?
        .ok_or_else(|| AppError::not_found(ENTITY_LEAD_FORM, id))?;
    state.notify(ChangeEvent::updated(
        ChangeTable::LeadForms,
        form.id,
        user.user_id,
    ));
    Ok(Json(form))
}

/// DELETE /api/v1/forms/{id}
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !LeadFormRepo::delete(&state.pool, user.user_id, id).await? {
        return Err(AppError::not_found(ENTITY_LEAD_FORM, id));
    }
    state.notify(ChangeEvent::deleted(ChangeTable::LeadForms, id, user.user_id));
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/forms/{id}/submit
///
/// Public. Inactive and unknown forms are both 404.
pub async fn submit(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(submission): Json<FormSubmission>,
) -> AppResult<(StatusCode, Json<Lead>)> {
    let form = LeadFormRepo::find_active(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(ENTITY_LEAD_FORM, id))?;

    let input = lead_from_submission(&form, submission)?;
    let lead = LeadRepo::create(&state.pool, form.owner_id, &input).await?;

    tracing::info!(
        form_id = form.id,
        owner_id = form.owner_id,
        lead_id = lead.id,
        "Lead captured from form"
    );
    state.notify(ChangeEvent::inserted(
        ChangeTable::Leads,
        lead.id,
        form.owner_id,
    ));
    Ok((StatusCode::CREATED, Json(lead)))
}

fn lead_from_submission(form: &LeadForm, s: FormSubmission) -> Result<CreateLead, CoreError> {
    validate_full_name(&s.full_name)?;
    validate_submission_reachable(s.email.as_deref(), s.phone.as_deref())?;
    validate_phone(s.phone.as_deref())?;
    validate_description(s.notes.as_deref())?;

    Ok(CreateLead {
        full_name: s.full_name.trim().to_string(),
        source: Some(form.source.clone()),
        status: Some(LeadStatus::New.as_str().to_string()),
        value_cents: Some(0),
        description: trimmed(s.notes.as_deref()).map(str::to_string),
        specialization: trimmed(s.specialization.as_deref()).map(str::to_string),
        batch_date: s.batch_date,
        job_title: trimmed(s.job_title.as_deref()).map(str::to_string),
        email: normalize_optional_email(s.email.as_deref())?,
        phone: trimmed(s.phone.as_deref()).map(str::to_string),
    })
}
