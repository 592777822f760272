use crate::routes::{draft, health, lesson, root, schedule, teacher};
use utoipa::OpenApi;

/// API Documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        root::root,
        health::health,
        schedule::get_schedules,
        schedule::create_schedule,
        schedule::get_schedule,
        schedule::delete_schedule,
        schedule::get_timetable,
        lesson::add_lesson,
        lesson::edit_lesson,
        lesson::delete_lesson,
        draft::create_draft,
        draft::edit_draft,
        draft::delete_draft,
        teacher::get_teachers,
        teacher::create_teacher,
        teacher::get_teacher,
        teacher::update_teacher,
    ),
    tags(
        (name = "Schedules", description = "Timetable aggregates and the export grid"),
        (name = "Lessons", description = "Committed lessons and their warning classification"),
        (name = "Drafts", description = "Incomplete occurrences and promotion"),
        (name = "Teachers", description = "Teacher roster"),
        (name = "Health", description = "Service health"),
    ),
    info(
        title = "Timetable API",
        version = "1.0.0",
        description = "School timetable API",
        license(
            name = "MIT OR Apache-2.0",
        )
    )
)]
pub struct ApiDoc;
