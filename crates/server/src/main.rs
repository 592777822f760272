mod doc;
mod dtos;
mod routes;
mod state;
mod utils;

use crate::{doc::ApiDoc, state::AppState, utils::shutdown::shutdown_signal};
use axum::{
    Router,
    routing::{get, patch, post},
};
use log::info;
use std::env;
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    env_logger::init();

    let state = AppState::default();

    let app = Router::new()
        .route("/", get(routes::root::root))
        .route("/health", get(routes::health::health))
        .route(
            "/schedules",
            get(routes::schedule::get_schedules).post(routes::schedule::create_schedule),
        )
        .route(
            "/schedules/{id}",
            get(routes::schedule::get_schedule).delete(routes::schedule::delete_schedule),
        )
        .route("/schedules/{id}/table", get(routes::schedule::get_timetable))
        .route("/schedules/{id}/lessons", post(routes::lesson::add_lesson))
        .route(
            "/schedules/{id}/lessons/{lesson_id}",
            patch(routes::lesson::edit_lesson).delete(routes::lesson::delete_lesson),
        )
        .route("/schedules/{id}/drafts", post(routes::draft::create_draft))
        .route(
            "/schedules/{id}/drafts/{draft_id}",
            patch(routes::draft::edit_draft).delete(routes::draft::delete_draft),
        )
        .route(
            "/teachers",
            get(routes::teacher::get_teachers).post(routes::teacher::create_teacher),
        )
        .route(
            "/teachers/{id}",
            get(routes::teacher::get_teacher).put(routes::teacher::update_teacher),
        )
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(ServiceBuilder::new().layer(CompressionLayer::new()))
        .with_state(state);

    let addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();
    info!("Running axum on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .unwrap();
}
