use crate::{
    dtos::teacher::{TeacherRequest, TeacherResponse},
    routes::{ApiError, locked, store_error},
    state::AppState,
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use models::{study_group::StudyGroup, subject::Subject, teacher::Teacher};
use store::{contracts::CatalogStore, memory::MemoryStore};
use uuid::Uuid;

fn resolve_lists(
    store: &mut MemoryStore,
    req: &TeacherRequest,
) -> (Vec<Subject>, Vec<StudyGroup>) {
    let subjects = req
        .subjects
        .iter()
        .map(|name| store.subject_by_name(name))
        .collect();
    let groups = req
        .groups
        .iter()
        .map(|name| store.study_group_by_name(name))
        .collect();
    (subjects, groups)
}

/// Register a teacher with their subjects and groups
#[utoipa::path(
    post,
    path = "/teachers",
    request_body = TeacherRequest,
    responses(
        (status = 201, description = "Teacher registered", body = TeacherResponse)
    ),
    tag = "Teachers"
)]
pub async fn create_teacher(
    State(state): State<AppState>,
    Json(req): Json<TeacherRequest>,
) -> Result<(StatusCode, Json<TeacherResponse>), ApiError> {
    let mut store = locked(&state)?;
    let (subjects, groups) = resolve_lists(&mut store, &req);

    let mut teacher = Teacher::new(Uuid::new_v4(), req.name, req.surname, req.patronymic);
    teacher.description = req.description;
    teacher.subjects = subjects;
    teacher.groups = groups;

    let response = TeacherResponse::from_teacher(&teacher);
    store.save_teacher(teacher);

    Ok((StatusCode::CREATED, Json(response)))
}

/// List the teacher roster
#[utoipa::path(
    get,
    path = "/teachers",
    responses(
        (status = 200, description = "Teacher roster", body = Vec<TeacherResponse>)
    ),
    tag = "Teachers"
)]
pub async fn get_teachers(
    State(state): State<AppState>,
) -> Result<Json<Vec<TeacherResponse>>, ApiError> {
    let store = locked(&state)?;
    let teachers = store
        .teachers()
        .iter()
        .map(TeacherResponse::from_teacher)
        .collect();

    Ok(Json(teachers))
}

/// Get a teacher by ID
#[utoipa::path(
    get,
    path = "/teachers/{id}",
    params(("id" = Uuid, Path, description = "Teacher ID")),
    responses(
        (status = 200, description = "Teacher found", body = TeacherResponse),
        (status = 404, description = "Teacher not found")
    ),
    tag = "Teachers"
)]
pub async fn get_teacher(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<TeacherResponse>, ApiError> {
    let store = locked(&state)?;
    let teacher = store.teacher(id).map_err(store_error)?;

    Ok(Json(TeacherResponse::from_teacher(&teacher)))
}

/// Replace a teacher's mutable fields wholesale
#[utoipa::path(
    put,
    path = "/teachers/{id}",
    params(("id" = Uuid, Path, description = "Teacher ID")),
    request_body = TeacherRequest,
    responses(
        (status = 200, description = "Teacher updated", body = TeacherResponse),
        (status = 404, description = "Teacher not found")
    ),
    tag = "Teachers"
)]
pub async fn update_teacher(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<TeacherRequest>,
) -> Result<Json<TeacherResponse>, ApiError> {
    let mut store = locked(&state)?;
    let mut teacher = store.teacher(id).map_err(store_error)?;
    let (subjects, groups) = resolve_lists(&mut store, &req);

    teacher.update(
        req.name,
        req.surname,
        req.patronymic,
        req.description,
        subjects,
        groups,
    );

    let response = TeacherResponse::from_teacher(&teacher);
    store.save_teacher(teacher);

    Ok(Json(response))
}
