use crate::{
    dtos::schedule::{
        CreateScheduleRequest, ScheduleResponse, ScheduleSummaryResponse, TimetableResponse,
    },
    routes::{ApiError, error, locked, store_error},
    state::AppState,
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use models::lesson_number::{LessonNumber, TimeRange};
use scheduling::schedule::Schedule;
use store::contracts::ScheduleStore;
use uuid::Uuid;

/// Create a schedule with its lesson-number catalog
#[utoipa::path(
    post,
    path = "/schedules",
    request_body = CreateScheduleRequest,
    responses(
        (status = 201, description = "Schedule created", body = ScheduleResponse),
        (status = 400, description = "Invalid period definition")
    ),
    tag = "Schedules"
)]
pub async fn create_schedule(
    State(state): State<AppState>,
    Json(req): Json<CreateScheduleRequest>,
) -> Result<(StatusCode, Json<ScheduleResponse>), ApiError> {
    let mut numbers = Vec::new();
    for period in &req.periods {
        let mut number = LessonNumber::new(period.number)
            .ok_or_else(|| error(StatusCode::BAD_REQUEST, "period numbers are 1-based"))?;

        if let (Some(begin), Some(end)) = (&period.begin, &period.end) {
            let time = TimeRange::from_strings(begin, end).ok_or_else(|| {
                error(
                    StatusCode::BAD_REQUEST,
                    format!("invalid time slot for period {}", period.number),
                )
            })?;
            number = number.with_time(time);
        }

        numbers.push(number);
    }

    let schedule = Schedule::new(Uuid::new_v4(), req.name, numbers);
    let response = ScheduleResponse::from_schedule(&schedule);
    locked(&state)?.persist_schedule(schedule);

    Ok((StatusCode::CREATED, Json(response)))
}

/// List all schedules
#[utoipa::path(
    get,
    path = "/schedules",
    responses(
        (status = 200, description = "Schedule listing", body = Vec<ScheduleSummaryResponse>)
    ),
    tag = "Schedules"
)]
pub async fn get_schedules(
    State(state): State<AppState>,
) -> Result<Json<Vec<ScheduleSummaryResponse>>, ApiError> {
    let store = locked(&state)?;
    let summaries = store
        .list_schedules()
        .iter()
        .map(ScheduleSummaryResponse::from_summary)
        .collect();

    Ok(Json(summaries))
}

/// Get a schedule with its lessons and drafts
#[utoipa::path(
    get,
    path = "/schedules/{id}",
    params(("id" = Uuid, Path, description = "Schedule ID")),
    responses(
        (status = 200, description = "Schedule found", body = ScheduleResponse),
        (status = 404, description = "Schedule not found")
    ),
    tag = "Schedules"
)]
pub async fn get_schedule(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ScheduleResponse>, ApiError> {
    let store = locked(&state)?;
    let schedule = store.load_schedule(id).map_err(store_error)?;

    Ok(Json(ScheduleResponse::from_schedule(&schedule)))
}

/// Delete a schedule permanently
#[utoipa::path(
    delete,
    path = "/schedules/{id}",
    params(("id" = Uuid, Path, description = "Schedule ID")),
    responses(
        (status = 204, description = "Schedule deleted"),
        (status = 404, description = "Schedule not found")
    ),
    tag = "Schedules"
)]
pub async fn delete_schedule(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    locked(&state)?.delete_schedule(id).map_err(store_error)?;
    Ok(StatusCode::NO_CONTENT)
}

/// The sparse timetable grid of committed lessons
#[utoipa::path(
    get,
    path = "/schedules/{id}/table",
    params(("id" = Uuid, Path, description = "Schedule ID")),
    responses(
        (status = 200, description = "Timetable grid", body = TimetableResponse),
        (status = 404, description = "Schedule not found")
    ),
    tag = "Schedules"
)]
pub async fn get_timetable(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<TimetableResponse>, ApiError> {
    let store = locked(&state)?;
    let schedule = store.load_schedule(id).map_err(store_error)?;

    Ok(Json(TimetableResponse::from_schedule(&schedule)))
}
