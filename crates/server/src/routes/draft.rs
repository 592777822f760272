use crate::{
    dtos::occurrence::{CreateDraftRequest, DraftResponse, EditOccurrenceRequest, EditOutcomeResponse},
    routes::{ApiError, changes_from_request, edit_error, error, locked, store_error},
    state::AppState,
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use models::{lesson_draft::LessonDraft, study_group::Subgroup};
use scheduling::{
    error::{EditError, ScheduleError},
    workflow,
};
use store::contracts::{CatalogStore, ScheduleStore};
use uuid::Uuid;

/// Register an incomplete occurrence as a draft
#[utoipa::path(
    post,
    path = "/schedules/{id}/drafts",
    params(("id" = Uuid, Path, description = "Schedule ID")),
    request_body = CreateDraftRequest,
    responses(
        (status = 201, description = "Draft registered, not conflict-checked", body = DraftResponse),
        (status = 400, description = "Unknown period or subgroup without a group"),
        (status = 404, description = "Schedule or teacher not found"),
        (status = 409, description = "Occurrence id already in use")
    ),
    tag = "Drafts"
)]
pub async fn create_draft(
    State(state): State<AppState>,
    Path(schedule_id): Path<Uuid>,
    Json(req): Json<CreateDraftRequest>,
) -> Result<(StatusCode, Json<DraftResponse>), ApiError> {
    let mut store = locked(&state)?;
    let mut schedule = store.load_schedule(schedule_id).map_err(store_error)?;

    let mut draft = LessonDraft::new(req.id.unwrap_or_else(Uuid::new_v4));
    draft.subject = req.subject.as_deref().map(|n| store.subject_by_name(n));
    draft.lesson_number = match req.period {
        Some(period) => Some(schedule.lesson_number(period).cloned().ok_or_else(|| {
            error(
                StatusCode::BAD_REQUEST,
                ScheduleError::UnknownLessonNumber(period),
            )
        })?),
        None => None,
    };
    draft.teacher = match req.teacher_id {
        Some(id) => Some(store.teacher(id).map_err(store_error)?),
        None => None,
    };
    draft.study_group = req.study_group.as_deref().map(|n| store.study_group_by_name(n));
    draft.subgroup = match &req.subgroup {
        Some(name) => {
            let owner = req.study_group.as_deref().ok_or_else(|| {
                error(StatusCode::BAD_REQUEST, "a subgroup requires a study group")
            })?;
            Some(Subgroup::new(name.as_str(), owner))
        }
        None => None,
    };
    draft.classroom = req
        .classroom
        .as_deref()
        .map(|n| store.classroom_by_name(n, req.classroom_description.as_deref()));
    draft.comment = req.comment;

    let response = match schedule.add_draft(draft) {
        Ok(draft) => DraftResponse::from_draft(draft),
        Err(err) => return Err(error(StatusCode::CONFLICT, err)),
    };

    store.persist_schedule(schedule);
    Ok((StatusCode::CREATED, Json(response)))
}

/// Edit a draft; promotes it when every required binding is present
#[utoipa::path(
    patch,
    path = "/schedules/{id}/drafts/{draft_id}",
    params(
        ("id" = Uuid, Path, description = "Schedule ID"),
        ("draft_id" = Uuid, Path, description = "Draft ID")
    ),
    request_body = EditOccurrenceRequest,
    responses(
        (status = 200, description = "Edit applied; the occurrence was promoted or stays a draft", body = EditOutcomeResponse),
        (status = 400, description = "Invalid change set"),
        (status = 404, description = "Schedule, draft or teacher not found")
    ),
    tag = "Drafts"
)]
pub async fn edit_draft(
    State(state): State<AppState>,
    Path((schedule_id, draft_id)): Path<(Uuid, Uuid)>,
    Json(req): Json<EditOccurrenceRequest>,
) -> Result<Json<EditOutcomeResponse>, ApiError> {
    let mut store = locked(&state)?;
    let mut schedule = store.load_schedule(schedule_id).map_err(store_error)?;

    let current_group = schedule
        .draft(draft_id)
        .and_then(|d| d.study_group.as_ref().map(|g| g.name.clone()));
    let changes = changes_from_request(&mut store, &schedule, current_group, req)?;

    let outcome = workflow::edit_draft(&mut schedule, draft_id, changes).map_err(edit_error)?;
    let response = EditOutcomeResponse::from_outcome(&outcome);

    store.persist_schedule(schedule);
    Ok(Json(response))
}

/// Delete a draft permanently
#[utoipa::path(
    delete,
    path = "/schedules/{id}/drafts/{draft_id}",
    params(
        ("id" = Uuid, Path, description = "Schedule ID"),
        ("draft_id" = Uuid, Path, description = "Draft ID")
    ),
    responses(
        (status = 204, description = "Draft deleted"),
        (status = 404, description = "Schedule or draft not found")
    ),
    tag = "Drafts"
)]
pub async fn delete_draft(
    State(state): State<AppState>,
    Path((schedule_id, draft_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, ApiError> {
    let mut store = locked(&state)?;
    let mut schedule = store.load_schedule(schedule_id).map_err(store_error)?;

    if schedule.remove_draft(draft_id).is_none() {
        return Err(edit_error(EditError::DraftNotFound(draft_id)));
    }

    store.persist_schedule(schedule);
    Ok(StatusCode::NO_CONTENT)
}
