use crate::{
    error::{ApiError, ApiResult},
    state::AppState,
};
use axum::{extract::State, http::StatusCode};
use log::error;

/// Returns "OK" once the database answers a ping
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", content_type = "text/plain", body = String),
        (status = 503, description = "Database is unreachable")
    ),
    tag = "Health"
)]
pub async fn health(State(state): State<AppState>) -> ApiResult<(StatusCode, &'static str)> {
    state.db.ping().await.map_err(|err| {
        error!("Health check failed: {err}");
        ApiError::new(StatusCode::SERVICE_UNAVAILABLE, "Database unavailable")
    })?;

    Ok((StatusCode::OK, "OK"))
}
