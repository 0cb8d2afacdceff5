use crate::{
    auth::Auth,
    dtos::{
        enrollment::ReportSummary,
        hod::{GradeRequest, GradeResponse, HodDashboard, RejectReportRequest},
        import::{CourseUploadForm, ImportResponse, StudentUploadForm},
        registration::{RegisterHodRequest, RegisteredResponse},
    },
    error::{ApiError, ApiResult},
    routes::parse_semester,
    state::AppState,
};
use axum::{
    Json,
    extract::{Multipart, Path, State},
    http::StatusCode,
};
use database::services::{
    catalog::{CatalogService, CourseFilter},
    directory::DirectoryService,
    enrollment::EnrollmentService,
    identity::IdentityService,
    import::{CourseImport, StudentImport, ensure_csv, run_import},
};
use log::info;
use models::course_status::CourseStatusKind;
use std::collections::HashMap;

const BULK_COURSE_UPLOAD: &str = "BulkCourseUpload";

/// Text fields and the file part of a multipart upload
#[derive(Default)]
struct UploadForm {
    fields: HashMap<String, String>,
    file: Option<Vec<u8>>,
}

impl UploadForm {
    async fn read(mut multipart: Multipart) -> ApiResult<Self> {
        let mut form = Self::default();

        while let Some(field) = multipart.next_field().await? {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };

            if name == "file" {
                ensure_csv(field.file_name(), field.content_type())?;
                form.file = Some(field.bytes().await?.to_vec());
            } else {
                form.fields.insert(name, field.text().await?);
            }
        }

        Ok(form)
    }

    fn field(&self, name: &str) -> ApiResult<&str> {
        self.fields
            .get(name)
            .map(|value| value.trim())
            .filter(|value| !value.is_empty())
            .ok_or_else(|| ApiError::bad_request(format!("Missing field: {name}")))
    }

    fn id(&self, name: &str) -> ApiResult<i32> {
        let value = self.field(name)?;
        value
            .parse()
            .map_err(|_| ApiError::bad_request(format!("Invalid {name}: {value}")))
    }

    fn file(&self) -> ApiResult<&[u8]> {
        self.file
            .as_deref()
            .ok_or_else(|| ApiError::bad_request("No file uploaded."))
    }
}

/// Department overview for the logged in head of department
#[utoipa::path(
    get,
    path = "/hod/dashboard",
    responses(
        (status = 200, description = "Dashboard", body = HodDashboard),
        (status = 403, description = "Caller is not a head of department")
    ),
    security(("token" = [])),
    tag = "Heads of department"
)]
pub async fn dashboard(State(state): State<AppState>, auth: Auth) -> ApiResult<Json<HodDashboard>> {
    let db = &state.db;
    let department_id = auth.hod_department()?;

    let user = IdentityService::get_user(db, auth.0.user_id()).await?;
    let department = DirectoryService::get_department(db, department_id).await?;
    let programs = DirectoryService::list_programs(db, Some(department_id)).await?;
    let students = IdentityService::students_of_department(db, department_id).await?;
    let courses = CatalogService::find_courses(db, CourseFilter::department(department_id)).await?;
    let batches = DirectoryService::list_batches(db).await?;
    let pending_reports = EnrollmentService::pending_reports(db, department_id).await?;

    Ok(Json(HodDashboard {
        department: department.into(),
        username: user.username,
        first_name: user.first_name,
        last_name: user.last_name,
        email: user.email,
        programs: programs.into_iter().map(Into::into).collect(),
        students: students.into_iter().map(Into::into).collect(),
        courses: courses.into_iter().map(Into::into).collect(),
        batches: batches.into_iter().map(Into::into).collect(),
        pending_reports: pending_reports.into_iter().map(Into::into).collect(),
    }))
}

/// Bulk create courses in the caller's department from a CSV file
#[utoipa::path(
    post,
    path = "/hod/dashboard",
    request_body(content = CourseUploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Rows processed", body = ImportResponse),
        (status = 400, description = "Unknown request type, missing file or not a CSV file"),
        (status = 403, description = "Caller is not a head of department")
    ),
    security(("token" = [])),
    tag = "Heads of department"
)]
pub async fn upload_courses(
    State(state): State<AppState>,
    Auth(principal): Auth,
    multipart: Multipart,
) -> ApiResult<Json<ImportResponse>> {
    let importer = CourseImport::for_principal(&principal)?;
    let form = UploadForm::read(multipart).await?;

    let kind = form.field("type")?;
    if kind != BULK_COURSE_UPLOAD {
        return Err(ApiError::bad_request(format!("Invalid request type: {kind}")));
    }

    let report = run_import(&state.db, &importer, form.file()?).await?;
    info!(
        "Course upload into department {}: {} created",
        importer.department_id,
        report.created.len()
    );

    Ok(Json(report.into()))
}

/// Bulk register students into one program, batch and semester
#[utoipa::path(
    post,
    path = "/hod/students/bulk-upload",
    request_body(content = StudentUploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Rows processed", body = ImportResponse),
        (status = 400, description = "Missing field, missing file or not a CSV file"),
        (status = 403, description = "Program is outside the caller's department"),
        (status = 404, description = "Unknown program or batch")
    ),
    security(("token" = [])),
    tag = "Heads of department"
)]
pub async fn upload_students(
    State(state): State<AppState>,
    Auth(principal): Auth,
    multipart: Multipart,
) -> ApiResult<Json<ImportResponse>> {
    let form = UploadForm::read(multipart).await?;
    let semester = parse_semester(form.field("semester")?)?;

    let importer = StudentImport::prepare(
        &state.db,
        &principal,
        form.id("program")?,
        form.id("batch")?,
        semester,
    )
    .await?;
    let report = run_import(&state.db, &importer, form.file()?).await?;

    Ok(Json(report.into()))
}

/// Approve a semester report; it can no longer change afterwards
#[utoipa::path(
    post,
    path = "/hod/reports/{id}/approve",
    params(("id" = i32, Path, description = "Report ID")),
    responses(
        (status = 200, description = "Report approved", body = ReportSummary),
        (status = 403, description = "Report is outside the caller's department"),
        (status = 404, description = "Report not found")
    ),
    security(("token" = [])),
    tag = "Heads of department"
)]
pub async fn approve_report(
    State(state): State<AppState>,
    Auth(principal): Auth,
    Path(id): Path<i32>,
) -> ApiResult<Json<ReportSummary>> {
    let report = EnrollmentService::approve_report(&state.db, &principal, id).await?;
    Ok(Json(report.into()))
}

/// Send a report back to the student with a reason
#[utoipa::path(
    post,
    path = "/hod/reports/{id}/reject",
    params(("id" = i32, Path, description = "Report ID")),
    request_body = RejectReportRequest,
    responses(
        (status = 200, description = "Report rejected", body = ReportSummary),
        (status = 400, description = "Report already approved or no reason given"),
        (status = 403, description = "Report is outside the caller's department"),
        (status = 404, description = "Report not found")
    ),
    security(("token" = [])),
    tag = "Heads of department"
)]
pub async fn reject_report(
    State(state): State<AppState>,
    Auth(principal): Auth,
    Path(id): Path<i32>,
    Json(request): Json<RejectReportRequest>,
) -> ApiResult<Json<ReportSummary>> {
    let report =
        EnrollmentService::reject_report(&state.db, &principal, id, &request.reason).await?;
    Ok(Json(report.into()))
}

/// Record a pass or fail for one course attempt
#[utoipa::path(
    post,
    path = "/hod/course-status/{id}/grade",
    params(("id" = i32, Path, description = "Course status ID")),
    request_body = GradeRequest,
    responses(
        (status = 200, description = "Course graded", body = GradeResponse),
        (status = 400, description = "Status is not Pass or Fail"),
        (status = 403, description = "Student is outside the caller's department"),
        (status = 404, description = "Course status not found")
    ),
    security(("token" = [])),
    tag = "Heads of department"
)]
pub async fn grade_course(
    State(state): State<AppState>,
    Auth(principal): Auth,
    Path(id): Path<i32>,
    Json(request): Json<GradeRequest>,
) -> ApiResult<Json<GradeResponse>> {
    let grade: CourseStatusKind = request
        .status
        .trim()
        .parse()
        .map_err(|_| ApiError::bad_request(format!("Invalid status: {}", request.status)))?;

    let status = EnrollmentService::grade_course(&state.db, &principal, id, grade).await?;
    Ok(Json(status.into()))
}

/// Register the head of a department (administrators only)
#[utoipa::path(
    post,
    path = "/hod/register",
    request_body = RegisterHodRequest,
    responses(
        (status = 201, description = "Head of department created", body = RegisteredResponse),
        (status = 400, description = "Invalid or taken username, or department already has a head"),
        (status = 403, description = "Caller is not an administrator"),
        (status = 404, description = "Department not found")
    ),
    security(("token" = [])),
    tag = "Registration"
)]
pub async fn register(
    State(state): State<AppState>,
    Auth(principal): Auth,
    Json(request): Json<RegisterHodRequest>,
) -> ApiResult<(StatusCode, Json<RegisteredResponse>)> {
    let (hod, user) = IdentityService::register_hod(
        &state.db,
        &principal,
        request.account.into(),
        request.department,
    )
    .await?;
    let department = DirectoryService::get_department(&state.db, hod.department_id).await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisteredResponse {
            message: "HOD created successfully.".to_string(),
            id: hod.id,
            username: user.username,
            department: department.name,
        }),
    ))
}
