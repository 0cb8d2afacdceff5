use crate::{
    auth::Auth,
    dtos::course::{CourseDetailResponse, CourseQueryParams, CourseResponse, CreateCourseRequest},
    error::ApiResult,
    routes::parse_semester,
    state::AppState,
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use database::services::catalog::{CatalogService, CourseFilter, NewCourse};

/// List courses, by default those of the caller's department
#[utoipa::path(
    get,
    path = "/courses",
    params(CourseQueryParams),
    responses(
        (status = 200, description = "Courses", body = Vec<CourseResponse>),
        (status = 400, description = "Invalid semester")
    ),
    security(("token" = [])),
    tag = "Courses"
)]
pub async fn list_courses(
    State(state): State<AppState>,
    Auth(principal): Auth,
    Query(params): Query<CourseQueryParams>,
) -> ApiResult<Json<Vec<CourseResponse>>> {
    let filter = CourseFilter {
        department_id: params.department.or(principal.department_id()),
        program_id: params.program,
        semester: params.semester.as_deref().map(parse_semester).transpose()?,
    };

    let courses = CatalogService::find_courses(&state.db, filter).await?;
    Ok(Json(courses.into_iter().map(Into::into).collect()))
}

/// Get a course with the batches it is offered to
#[utoipa::path(
    get,
    path = "/courses/{id}",
    params(("id" = i32, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Course found", body = CourseDetailResponse),
        (status = 404, description = "Course not found")
    ),
    security(("token" = [])),
    tag = "Courses"
)]
pub async fn get_course(
    State(state): State<AppState>,
    _auth: Auth,
    Path(id): Path<i32>,
) -> ApiResult<Json<CourseDetailResponse>> {
    let course = CatalogService::get_course(&state.db, id).await?;
    let batches = CatalogService::batches_of_course(&state.db, &course).await?;

    Ok(Json(CourseDetailResponse {
        course: course.into(),
        batches: batches.into_iter().map(Into::into).collect(),
    }))
}

/// Create a course in the caller's department (heads of department only)
#[utoipa::path(
    post,
    path = "/courses",
    request_body = CreateCourseRequest,
    responses(
        (status = 201, description = "Course created", body = CourseDetailResponse),
        (status = 400, description = "Invalid fields or duplicate code"),
        (status = 403, description = "Caller is not a head of department"),
        (status = 404, description = "Unknown program or batch")
    ),
    security(("token" = [])),
    tag = "Courses"
)]
pub async fn create_course(
    State(state): State<AppState>,
    Auth(principal): Auth,
    Json(request): Json<CreateCourseRequest>,
) -> ApiResult<(StatusCode, Json<CourseDetailResponse>)> {
    let course = NewCourse {
        name: request.name,
        code: request.code,
        is_elective: request.is_elective,
        credit: request.credit,
        semester: parse_semester(&request.semester)?,
        program_id: request.program,
        batch_ids: request.batches,
    };

    let course = CatalogService::create_course(&state.db, &principal, course).await?;
    let batches = CatalogService::batches_of_course(&state.db, &course).await?;

    Ok((
        StatusCode::CREATED,
        Json(CourseDetailResponse {
            course: course.into(),
            batches: batches.into_iter().map(Into::into).collect(),
        }),
    ))
}
