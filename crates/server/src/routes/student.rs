use crate::{
    auth::Auth,
    dtos::{
        enrollment::{EnrollmentRequest, EnrollmentResponse, ReportResponse, StudentDashboard},
        registration::{RegisterStudentRequest, RegisteredResponse},
    },
    error::{ApiError, ApiResult},
    routes::parse_semester,
    state::AppState,
};
use axum::{Json, extract::State, http::StatusCode};
use database::services::{
    directory::DirectoryService, enrollment::EnrollmentService, identity::IdentityService,
};
use models::enrollment::{EnrollmentAction, Outcome, ReportState};

/// Profile, current report and selectable courses of the logged in student
#[utoipa::path(
    get,
    path = "/student/dashboard",
    responses(
        (status = 200, description = "Dashboard", body = StudentDashboard),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Caller is not a student")
    ),
    security(("token" = [])),
    tag = "Students"
)]
pub async fn dashboard(
    State(state): State<AppState>,
    auth: Auth,
) -> ApiResult<Json<StudentDashboard>> {
    let db = &state.db;
    let student = IdentityService::get_student(db, auth.student_id()?).await?;
    let user = IdentityService::get_user(db, student.user_id).await?;
    let department = DirectoryService::get_department(db, student.department_id).await?;
    let program = DirectoryService::get_program(db, student.program_id).await?;
    let batch = DirectoryService::get_batch(db, student.batch_id).await?;

    let report = match EnrollmentService::find_report(db, student.id, student.semester).await? {
        Some(report) => Some(EnrollmentService::report_detail(db, report).await?),
        None => None,
    };
    let status = match &report {
        Some(detail) => detail
            .state()
            .message(detail.report.rejection_reason.as_deref()),
        None => ReportState::Empty.message(None),
    };
    let available_courses = EnrollmentService::available_courses(db, &student).await?;

    Ok(Json(StudentDashboard {
        department: department.into(),
        program: program.into(),
        batch: batch.into(),
        username: user.username,
        first_name: user.first_name,
        last_name: user.last_name,
        email: user.email,
        semester: student.semester.as_str().to_string(),
        report: report.map(Into::into),
        available_courses: available_courses.into_iter().map(Into::into).collect(),
        status,
    }))
}

/// Enroll in or drop courses of the current semester
///
/// Responds 200 when every course was applied, 207 when only some were and
/// 400 when none were.
#[utoipa::path(
    post,
    path = "/student/dashboard",
    request_body = EnrollmentRequest,
    responses(
        (status = 200, description = "All courses applied", body = EnrollmentResponse),
        (status = 207, description = "Some courses applied", body = EnrollmentResponse),
        (status = 400, description = "No course applied, report locked or invalid request", body = EnrollmentResponse),
        (status = 403, description = "Caller is not a student")
    ),
    security(("token" = [])),
    tag = "Students"
)]
pub async fn update_enrollment(
    State(state): State<AppState>,
    auth: Auth,
    Json(request): Json<EnrollmentRequest>,
) -> ApiResult<(StatusCode, Json<EnrollmentResponse>)> {
    let student = IdentityService::get_student(&state.db, auth.student_id()?).await?;

    let action: EnrollmentAction = request
        .action
        .as_deref()
        .ok_or_else(|| ApiError::bad_request("Missing request type."))?
        .parse()
        .map_err(ApiError::bad_request)?;
    let semester = match request.semester.as_deref() {
        Some(label) => parse_semester(label)?,
        None => student.semester,
    };

    let result =
        EnrollmentService::apply(&state.db, &student, semester, &request.course_ids, action)
            .await?;

    let status = match result.results.outcome() {
        Outcome::Complete => StatusCode::OK,
        Outcome::Partial => StatusCode::MULTI_STATUS,
        Outcome::Failed => StatusCode::BAD_REQUEST,
    };

    Ok((
        status,
        Json(EnrollmentResponse {
            report: result.report.into(),
            message: result.results.message,
            errors: result.results.errors,
        }),
    ))
}

/// Every semester report of the logged in student, oldest first
#[utoipa::path(
    get,
    path = "/student/reports",
    responses(
        (status = 200, description = "Semester history", body = Vec<ReportResponse>),
        (status = 403, description = "Caller is not a student")
    ),
    security(("token" = [])),
    tag = "Students"
)]
pub async fn reports(
    State(state): State<AppState>,
    auth: Auth,
) -> ApiResult<Json<Vec<ReportResponse>>> {
    let history = EnrollmentService::semester_history(&state.db, auth.student_id()?).await?;

    Ok(Json(history.into_iter().map(Into::into).collect()))
}

/// Register a student; heads of department only inside their department
#[utoipa::path(
    post,
    path = "/student/register",
    request_body = RegisterStudentRequest,
    responses(
        (status = 201, description = "Student created", body = RegisteredResponse),
        (status = 400, description = "Invalid or taken username"),
        (status = 403, description = "Program is outside the caller's department"),
        (status = 404, description = "Unknown program or batch")
    ),
    security(("token" = [])),
    tag = "Registration"
)]
pub async fn register(
    State(state): State<AppState>,
    Auth(principal): Auth,
    Json(request): Json<RegisterStudentRequest>,
) -> ApiResult<(StatusCode, Json<RegisteredResponse>)> {
    let semester = parse_semester(&request.semester)?;
    let (student, user) = IdentityService::register_student(
        &state.db,
        &principal,
        request.account.into(),
        request.program,
        request.batch,
        semester,
    )
    .await?;
    let department = DirectoryService::get_department(&state.db, student.department_id).await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisteredResponse {
            message: "Student created successfully.".to_string(),
            id: student.id,
            username: user.username,
            department: department.name,
        }),
    ))
}
