//! Handlers for the `/activities` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use salesdesk_core::activity::{validate_activity_notes, validate_activity_type, ENTITY_ACTIVITY};
use salesdesk_core::types::DbId;
use salesdesk_core::validation::{patch_str, trim_nullable};
use salesdesk_db::models::activity::{Activity, CreateActivity, UpdateActivity};
use salesdesk_db::repositories::ActivityRepo;
use salesdesk_events::{ChangeEvent, ChangeTable};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::handlers::lead::validate_lead_reference;
use crate::middleware::auth::AuthUser;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for `GET /activities`.
#[derive(Debug, Default, Deserialize)]
pub struct ActivityListParams {
    pub lead_id: Option<DbId>,
    pub completed: Option<bool>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Request body for `POST /activities/{id}/complete`.
#[derive(Debug, Deserialize)]
pub struct CompleteRequest {
    #[serde(default = "default_completed")]
    pub completed: bool,
}

fn default_completed() -> bool {
    true
}

/// GET /api/v1/activities
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
    Query(params): Query<ActivityListParams>,
) -> AppResult<Json<DataResponse<Vec<Activity>>>> {
    let (limit, offset) = PaginationParams {
        limit: params.limit,
        offset: params.offset,
    }
    .resolve();
    let activities = ActivityRepo::list(
        &state.pool,
        user.user_id,
        params.lead_id,
        params.completed,
        limit,
        offset,
    )
    .await?;
    Ok(Json(DataResponse { data: activities }))
}

/// POST /api/v1/activities
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(mut input): Json<CreateActivity>,
) -> AppResult<(StatusCode, Json<Activity>)> {
    input.activity_type = input.activity_type.trim().to_lowercase();
    validate_activity_type(&input.activity_type)?;
    validate_activity_notes(input.notes.as_deref())?;
    validate_lead_reference(&state, user.user_id, input.lead_id).await?;

    let activity = ActivityRepo::create(&state.pool, user.user_id, &input).await?;
    tracing::debug!(
        user_id = user.user_id,
        activity_id = activity.id,
        activity_type = %activity.activity_type,
        "Activity logged"
    );
    state.notify(ChangeEvent::inserted(
        ChangeTable::Activities,
        activity.id,
        user.user_id,
    ));
    Ok((StatusCode::CREATED, Json(activity)))
}

/// GET /api/v1/activities/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Activity>> {
    let activity = ActivityRepo::find_by_id(&state.pool, user.user_id, id)
        .await?
        .ok_or_else(|| AppError::not_found(ENTITY_ACTIVITY, id))?;
    Ok(Json(activity))
}

/// PUT /api/v1/activities/{id}
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(mut input): Json<UpdateActivity>,
) -> AppResult<Json<Activity>> {
    if let Some(t) = input.activity_type.as_deref() {
        let t = t.trim().to_lowercase();
        validate_activity_type(&t)?;
        input.activity_type = Some(t);
    }
    input.notes = trim_nullable(input.notes.take());
    validate_activity_notes(patch_str(&input.notes))?;
    validate_lead_reference(&state, user.user_id, input.lead_id.flatten()).await?;

    let activity = ActivityRepo::update(&state.pool, user.user_id, id, &input)
        .await?
        .ok_or_else(|| AppError::not_found(ENTITY_ACTIVITY, id))?;
    state.notify(ChangeEvent::updated(
        ChangeTable::Activities,
        activity.id,
        user.user_id,
    ));
    Ok(Json(activity))
}

/// POST /api/v1/activities/{id}/complete
///
/// Toggle the completion flag. An empty body marks the activity complete.
pub async fn complete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    body: Option<Json<CompleteRequest>>,
) -> AppResult<Json<Activity>> {
    let completed = body.map_or(true, |Json(b)| b.completed);
    let activity = ActivityRepo::set_completed(&state.pool, user.user_id, id, completed)
        .await?
        .ok_or_else(|| AppError::not_found(ENTITY_ACTIVITY, id))?;
    state.notify(ChangeEvent::updated(
        ChangeTable::Activities,
        activity.id,
        user.user_id,
    ));
    Ok(Json(activity))
}

/// DELETE /api/v1/activities/{id}
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !ActivityRepo::delete(&state.pool, user.user_id, id).await? {
        return Err(AppError::not_found(ENTITY_ACTIVITY, id));
    }
    state.notify(ChangeEvent::deleted(ChangeTable::Activities, id, user.user_id));
    Ok(StatusCode::NO_CONTENT)
}
