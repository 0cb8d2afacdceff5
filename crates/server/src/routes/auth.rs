use crate::{
    dtos::auth::{LoginRequest, LoginResponse},
    error::ApiResult,
    state::AppState,
};
use axum::{Json, extract::State};
use database::services::identity::IdentityService;

/// Exchange a username and password for a bearer token
#[utoipa::path(
    post,
    path = "/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in", body = LoginResponse),
        (status = 400, description = "Invalid credentials")
    ),
    tag = "Authentication"
)]
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let session = IdentityService::login(&state.db, &request.username, &request.password).await?;

    Ok(Json(LoginResponse {
        user_type: session.principal.role().as_str().to_string(),
        token: session.token,
        id: session.user.id,
        username: session.user.username,
    }))
}
