use crate::{
    auth::Auth,
    dtos::directory::{
        BatchResponse, CreateBatchRequest, CreateDepartmentRequest, CreateProgramRequest,
        DepartmentResponse, ProgramQueryParams, ProgramResponse,
    },
    error::ApiResult,
    state::AppState,
};
use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use database::services::directory::DirectoryService;

/// List all departments
#[utoipa::path(
    get,
    path = "/departments",
    responses(
        (status = 200, description = "Departments", body = Vec<DepartmentResponse>),
        (status = 401, description = "Missing or invalid token")
    ),
    security(("token" = [])),
    tag = "Directory"
)]
pub async fn list_departments(
    State(state): State<AppState>,
    _auth: Auth,
) -> ApiResult<Json<Vec<DepartmentResponse>>> {
    let departments = DirectoryService::list_departments(&state.db).await?;
    Ok(Json(departments.into_iter().map(Into::into).collect()))
}

/// Create a department (administrators only)
#[utoipa::path(
    post,
    path = "/departments",
    request_body = CreateDepartmentRequest,
    responses(
        (status = 201, description = "Department created", body = DepartmentResponse),
        (status = 403, description = "Caller is not an administrator")
    ),
    security(("token" = [])),
    tag = "Directory"
)]
pub async fn create_department(
    State(state): State<AppState>,
    Auth(principal): Auth,
    Json(request): Json<CreateDepartmentRequest>,
) -> ApiResult<(StatusCode, Json<DepartmentResponse>)> {
    let department =
        DirectoryService::create_department(&state.db, &principal, &request.name).await?;
    Ok((StatusCode::CREATED, Json(department.into())))
}

/// List programs, optionally of one department
#[utoipa::path(
    get,
    path = "/programs",
    params(ProgramQueryParams),
    responses(
        (status = 200, description = "Programs", body = Vec<ProgramResponse>)
    ),
    security(("token" = [])),
    tag = "Directory"
)]
pub async fn list_programs(
    State(state): State<AppState>,
    _auth: Auth,
    Query(params): Query<ProgramQueryParams>,
) -> ApiResult<Json<Vec<ProgramResponse>>> {
    let programs = DirectoryService::list_programs(&state.db, params.department).await?;
    Ok(Json(programs.into_iter().map(Into::into).collect()))
}

/// Create a program in a department the caller manages
#[utoipa::path(
    post,
    path = "/programs",
    request_body = CreateProgramRequest,
    responses(
        (status = 201, description = "Program created", body = ProgramResponse),
        (status = 400, description = "Invalid duration or duplicate name"),
        (status = 403, description = "Department is not managed by the caller")
    ),
    security(("token" = [])),
    tag = "Directory"
)]
pub async fn create_program(
    State(state): State<AppState>,
    Auth(principal): Auth,
    Json(request): Json<CreateProgramRequest>,
) -> ApiResult<(StatusCode, Json<ProgramResponse>)> {
    let program = DirectoryService::create_program(
        &state.db,
        &principal,
        request.department,
        &request.name,
        request.duration,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(program.into())))
}

/// List all batches, newest first
#[utoipa::path(
    get,
    path = "/batches",
    responses(
        (status = 200, description = "Batches", body = Vec<BatchResponse>)
    ),
    security(("token" = [])),
    tag = "Directory"
)]
pub async fn list_batches(
    State(state): State<AppState>,
    _auth: Auth,
) -> ApiResult<Json<Vec<BatchResponse>>> {
    let batches = DirectoryService::list_batches(&state.db).await?;
    Ok(Json(batches.into_iter().map(Into::into).collect()))
}

/// Create a batch
#[utoipa::path(
    post,
    path = "/batches",
    request_body = CreateBatchRequest,
    responses(
        (status = 201, description = "Batch created", body = BatchResponse),
        (status = 400, description = "Start year is not before end year"),
        (status = 403, description = "Caller is a student"),
        (status = 409, description = "A batch with these years exists")
    ),
    security(("token" = [])),
    tag = "Directory"
)]
pub async fn create_batch(
    State(state): State<AppState>,
    Auth(principal): Auth,
    Json(request): Json<CreateBatchRequest>,
) -> ApiResult<(StatusCode, Json<BatchResponse>)> {
    let batch =
        DirectoryService::create_batch(&state.db, &principal, request.start_year, request.end_year)
            .await?;
    Ok((StatusCode::CREATED, Json(batch.into())))
}
