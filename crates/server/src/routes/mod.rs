pub mod draft;
pub mod health;
pub mod lesson;
pub mod root;
pub mod schedule;
pub mod teacher;

use crate::{dtos::occurrence::EditOccurrenceRequest, state::AppState};
use axum::{Json, http::StatusCode};
use models::study_group::Subgroup;
use scheduling::{
    error::{EditError, ScheduleError},
    schedule::Schedule,
    workflow::{Change, OccurrenceChanges},
};
use serde_json::{Value, json};
use std::{fmt::Display, sync::MutexGuard};
use store::{contracts::CatalogStore, error::StoreError, memory::MemoryStore};

pub(crate) type ApiError = (StatusCode, Json<Value>);

pub(crate) fn error(status: StatusCode, message: impl Display) -> ApiError {
    (status, Json(json!({ "error": message.to_string() })))
}

/// Both store failures are lookups by id.
pub(crate) fn store_error(err: StoreError) -> ApiError {
    error(StatusCode::NOT_FOUND, err)
}

/// Not-found is the user's problem; a foreign subgroup reaching the
/// workflow means this server built inconsistent changes.
pub(crate) fn edit_error(err: EditError) -> ApiError {
    match err {
        EditError::DraftNotFound(_) | EditError::LessonNotFound(_) => {
            error(StatusCode::NOT_FOUND, err)
        }
        EditError::ForeignSubgroup { .. } => error(StatusCode::INTERNAL_SERVER_ERROR, err),
    }
}

pub(crate) fn locked(state: &AppState) -> Result<MutexGuard<'_, MemoryStore>, ApiError> {
    state
        .store
        .lock()
        .map_err(|_| error(StatusCode::INTERNAL_SERVER_ERROR, "state lock poisoned"))
}

/// Resolves an edit request into typed field changes: names become catalog
/// values, the period becomes one of the schedule's lesson numbers, and a
/// subgroup is owned by the requested group (or the occurrence's current
/// one). `clear` entries win over supplied values.
pub(crate) fn changes_from_request(
    store: &mut MemoryStore,
    schedule: &Schedule,
    current_group: Option<String>,
    req: EditOccurrenceRequest,
) -> Result<OccurrenceChanges, ApiError> {
    let mut changes = OccurrenceChanges::default();

    if let Some(name) = &req.subject {
        changes.subject = Change::Set(store.subject_by_name(name));
    }
    if let Some(period) = req.period {
        let number = schedule.lesson_number(period).cloned().ok_or_else(|| {
            error(
                StatusCode::BAD_REQUEST,
                ScheduleError::UnknownLessonNumber(period),
            )
        })?;
        changes.lesson_number = Change::Set(number);
    }
    if let Some(id) = req.teacher_id {
        changes.teacher = Change::Set(store.teacher(id).map_err(store_error)?);
    }
    if let Some(name) = &req.study_group {
        changes.study_group = Change::Set(store.study_group_by_name(name));
    }
    if let Some(name) = &req.subgroup {
        let owner = req
            .study_group
            .clone()
            .or(current_group)
            .ok_or_else(|| error(StatusCode::BAD_REQUEST, "a subgroup requires a study group"))?;
        changes.subgroup = Change::Set(Subgroup::new(name.as_str(), owner));
    }
    if let Some(name) = &req.classroom {
        changes.classroom = Change::Set(
            store.classroom_by_name(name, req.classroom_description.as_deref()),
        );
    }
    if let Some(comment) = &req.comment {
        changes.comment = Change::Set(comment.clone());
    }

    for field in &req.clear {
        match field.as_str() {
            "subject" => changes.subject = Change::Clear,
            "period" => changes.lesson_number = Change::Clear,
            "teacher" => changes.teacher = Change::Clear,
            "study_group" => changes.study_group = Change::Clear,
            "subgroup" => changes.subgroup = Change::Clear,
            "classroom" => changes.classroom = Change::Clear,
            "comment" => changes.comment = Change::Clear,
            other => {
                return Err(error(
                    StatusCode::BAD_REQUEST,
                    format!("unknown field '{other}' in clear"),
                ));
            }
        }
    }

    Ok(changes)
}
