use crate::{
    dtos::occurrence::{AddLessonRequest, EditOccurrenceRequest, EditOutcomeResponse, LessonResponse},
    routes::{ApiError, changes_from_request, edit_error, error, locked, store_error},
    state::AppState,
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use scheduling::{
    error::{EditError, ScheduleError},
    schedule::NewLesson,
    workflow,
};
use store::contracts::{CatalogStore, ScheduleStore};
use uuid::Uuid;

/// Insert a committed lesson and conflict-evaluate it
#[utoipa::path(
    post,
    path = "/schedules/{id}/lessons",
    params(("id" = Uuid, Path, description = "Schedule ID")),
    request_body = AddLessonRequest,
    responses(
        (status = 201, description = "Lesson inserted, warning classification assigned", body = LessonResponse),
        (status = 400, description = "Missing study group or unknown period"),
        (status = 404, description = "Schedule or teacher not found"),
        (status = 409, description = "Occurrence id already in use")
    ),
    tag = "Lessons"
)]
pub async fn add_lesson(
    State(state): State<AppState>,
    Path(schedule_id): Path<Uuid>,
    Json(req): Json<AddLessonRequest>,
) -> Result<(StatusCode, Json<LessonResponse>), ApiError> {
    let mut store = locked(&state)?;
    let mut schedule = store.load_schedule(schedule_id).map_err(store_error)?;

    let teacher = match req.teacher_id {
        Some(id) => Some(store.teacher(id).map_err(store_error)?),
        None => None,
    };

    // Named values are catalog-canonical on every insertion path; the
    // stored room wins over a divergent description in the request.
    let subject_name = req.subject.as_deref().map(|n| store.subject_by_name(n).name);
    let study_group_name = req
        .study_group
        .as_deref()
        .map(|n| store.study_group_by_name(n).name);
    let (classroom_name, classroom_description) = match req.classroom.as_deref() {
        Some(n) => {
            let room = store.classroom_by_name(n, req.classroom_description.as_deref());
            (Some(room.name), room.description)
        }
        None => (None, None),
    };

    let new = NewLesson {
        id: req.id.unwrap_or_else(Uuid::new_v4),
        subject_name,
        period: req.period,
        teacher,
        study_group_name,
        subgroup_name: req.subgroup,
        classroom_name,
        classroom_description,
        comment: req.comment,
    };

    let response = match schedule.add_lesson(new) {
        Ok(lesson) => LessonResponse::from_lesson(lesson),
        Err(err @ ScheduleError::DuplicateOccurrence(_)) => {
            return Err(error(StatusCode::CONFLICT, err));
        }
        Err(err) => return Err(error(StatusCode::BAD_REQUEST, err)),
    };

    store.persist_schedule(schedule);
    Ok((StatusCode::CREATED, Json(response)))
}

/// Edit a committed lesson; may downgrade it to a draft
#[utoipa::path(
    patch,
    path = "/schedules/{id}/lessons/{lesson_id}",
    params(
        ("id" = Uuid, Path, description = "Schedule ID"),
        ("lesson_id" = Uuid, Path, description = "Lesson ID")
    ),
    request_body = EditOccurrenceRequest,
    responses(
        (status = 200, description = "Edit applied; the occurrence is committed or a draft again", body = EditOutcomeResponse),
        (status = 400, description = "Invalid change set"),
        (status = 404, description = "Schedule, lesson or teacher not found")
    ),
    tag = "Lessons"
)]
pub async fn edit_lesson(
    State(state): State<AppState>,
    Path((schedule_id, lesson_id)): Path<(Uuid, Uuid)>,
    Json(req): Json<EditOccurrenceRequest>,
) -> Result<Json<EditOutcomeResponse>, ApiError> {
    let mut store = locked(&state)?;
    let mut schedule = store.load_schedule(schedule_id).map_err(store_error)?;

    let current_group = schedule
        .lesson(lesson_id)
        .and_then(|l| l.study_group.as_ref().map(|g| g.name.clone()));
    let changes = changes_from_request(&mut store, &schedule, current_group, req)?;

    let outcome = workflow::edit_lesson(&mut schedule, lesson_id, changes).map_err(edit_error)?;
    let response = EditOutcomeResponse::from_outcome(&outcome);

    store.persist_schedule(schedule);
    Ok(Json(response))
}

/// Delete a committed lesson and re-scan the remaining set
#[utoipa::path(
    delete,
    path = "/schedules/{id}/lessons/{lesson_id}",
    params(
        ("id" = Uuid, Path, description = "Schedule ID"),
        ("lesson_id" = Uuid, Path, description = "Lesson ID")
    ),
    responses(
        (status = 204, description = "Lesson deleted"),
        (status = 404, description = "Schedule or lesson not found")
    ),
    tag = "Lessons"
)]
pub async fn delete_lesson(
    State(state): State<AppState>,
    Path((schedule_id, lesson_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, ApiError> {
    let mut store = locked(&state)?;
    let mut schedule = store.load_schedule(schedule_id).map_err(store_error)?;

    if schedule.remove_lesson(lesson_id).is_none() {
        return Err(edit_error(EditError::LessonNotFound(lesson_id)));
    }

    store.persist_schedule(schedule);
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        dtos::{
            occurrence::CreateDraftRequest,
            schedule::{CreateScheduleRequest, PeriodRequest},
            teacher::TeacherRequest,
        },
        routes::{draft, schedule, teacher},
    };
    use models::lesson::WarningType;

    async fn state_with_schedule_and_teacher() -> (AppState, Uuid, Uuid) {
        let state = AppState::default();

        let req = CreateScheduleRequest {
            name: "fall".to_string(),
            periods: (1..=4)
                .map(|number| PeriodRequest {
                    number,
                    begin: None,
                    end: None,
                })
                .collect(),
        };
        let (_, Json(created)) = schedule::create_schedule(State(state.clone()), Json(req))
            .await
            .unwrap();

        let req = TeacherRequest {
            name: "Anna".to_string(),
            surname: "Ivanova".to_string(),
            patronymic: "Petrovna".to_string(),
            description: None,
            subjects: vec!["Math".to_string()],
            groups: vec![],
        };
        let (_, Json(registered)) = teacher::create_teacher(State(state.clone()), Json(req))
            .await
            .unwrap();

        (state, created.id, registered.id)
    }

    #[tokio::test]
    async fn test_promoted_draft_collides_with_directly_added_lesson() {
        let (state, schedule_id, teacher_id) = state_with_schedule_and_teacher().await;

        let (_, Json(lesson)) = add_lesson(
            State(state.clone()),
            Path(schedule_id),
            Json(AddLessonRequest {
                id: None,
                subject: Some("Math".to_string()),
                period: 1,
                teacher_id: Some(teacher_id),
                study_group: Some("10-A".to_string()),
                subgroup: None,
                classroom: Some("101".to_string()),
                classroom_description: Some("physics lab".to_string()),
                comment: None,
            }),
        )
        .await
        .unwrap();
        assert_eq!(lesson.warning, "Normal");

        let (_, Json(created)) = draft::create_draft(
            State(state.clone()),
            Path(schedule_id),
            Json(CreateDraftRequest {
                subject: Some("Math".to_string()),
                period: Some(1),
                teacher_id: Some(teacher_id),
                study_group: Some("10-B".to_string()),
                ..CreateDraftRequest::default()
            }),
        )
        .await
        .unwrap();

        // The room is supplied by name only; it must resolve to the same
        // catalog value (description included) the first lesson carries.
        let Json(outcome) = draft::edit_draft(
            State(state.clone()),
            Path((schedule_id, created.id)),
            Json(EditOccurrenceRequest {
                classroom: Some("101".to_string()),
                ..EditOccurrenceRequest::default()
            }),
        )
        .await
        .unwrap();

        match outcome {
            EditOutcomeResponse::Committed { lesson: promoted } => {
                assert_eq!(promoted.warning, "Warning");
            }
            other => panic!("expected promotion, got {other:?}"),
        }

        let store = state.store.lock().unwrap();
        let stored = store.load_schedule(schedule_id).unwrap();
        assert_eq!(
            stored.lesson(lesson.id).unwrap().warning(),
            WarningType::Warning
        );
    }
}
