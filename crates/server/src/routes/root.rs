use axum::http::StatusCode;

/// Liveness check kept at the root for load balancers
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Service is running", content_type = "text/plain", body = String)
    ),
    tag = "Health"
)]
pub async fn root() -> (StatusCode, &'static str) {
    (StatusCode::OK, "OK")
}
