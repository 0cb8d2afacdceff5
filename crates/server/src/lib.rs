pub mod auth;
pub mod config;
pub mod doc;
pub mod dtos;
pub mod error;
pub mod routes;
pub mod state;
pub mod utils;

use crate::{
    doc::ApiDoc,
    routes::{auth as login, course, directory, health, hod, root, student},
    state::AppState,
};
use axum::{
    Router,
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Builds the router with every route, the API docs and compression
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(root::root))
        .route("/health", get(health::health))
        .route("/login", post(login::login))
        .route(
            "/student/dashboard",
            get(student::dashboard).post(student::update_enrollment),
        )
        .route("/student/reports", get(student::reports))
        .route("/student/register", post(student::register))
        .route("/hod/dashboard", get(hod::dashboard).post(hod::upload_courses))
        .route("/hod/students/bulk-upload", post(hod::upload_students))
        .route("/hod/reports/{id}/approve", post(hod::approve_report))
        .route("/hod/reports/{id}/reject", post(hod::reject_report))
        .route("/hod/course-status/{id}/grade", post(hod::grade_course))
        .route("/hod/register", post(hod::register))
        .route(
            "/departments",
            get(directory::list_departments).post(directory::create_department),
        )
        .route(
            "/programs",
            get(directory::list_programs).post(directory::create_program),
        )
        .route(
            "/batches",
            get(directory::list_batches).post(directory::create_batch),
        )
        .route("/courses", get(course::list_courses).post(course::create_course))
        .route("/courses/{id}", get(course::get_course))
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(ServiceBuilder::new().layer(CompressionLayer::new()))
        .with_state(state)
}
