use axum::{
    Json,
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use database::error::ServiceError;
use log::error;
use serde_json::json;

/// An error rendered as `{"error": message}` with a status code
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    /// Missing or unknown credentials
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    /// Authenticated, but the role does not allow the action
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, message)
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        let status = match &err {
            ServiceError::InvalidCredentials
            | ServiceError::Validation(_)
            | ServiceError::ReportLocked(_)
            | ServiceError::AlreadyEnrolled(_)
            | ServiceError::NotEnrolled(_) => StatusCode::BAD_REQUEST,
            ServiceError::DuplicateBatch { .. } => StatusCode::CONFLICT,
            ServiceError::NotFound { .. } | ServiceError::CourseNotFound(_) => {
                StatusCode::NOT_FOUND
            }
            ServiceError::Unauthorized(_) => StatusCode::FORBIDDEN,
            ServiceError::Database(db_err) => {
                error!("Database error: {db_err}");
                return Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error");
            }
            ServiceError::PasswordHash(hash_err) => {
                error!("Password hashing failed: {hash_err}");
                return Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error");
            }
        };

        Self::new(status, err.to_string())
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        Self::bad_request(format!("Invalid upload: {}", err.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use models::semester::Semester;

    #[test]
    fn test_service_error_status() {
        let cases = [
            (ServiceError::InvalidCredentials, StatusCode::BAD_REQUEST),
            (ServiceError::ReportLocked(Semester::First), StatusCode::BAD_REQUEST),
            (
                ServiceError::DuplicateBatch {
                    start: 2020,
                    end: 2024,
                },
                StatusCode::CONFLICT,
            ),
            (ServiceError::CourseNotFound(4), StatusCode::NOT_FOUND),
            (ServiceError::unauthorized("no"), StatusCode::FORBIDDEN),
            (
                ServiceError::Database(sea_orm::DbErr::Custom("boom".to_string())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(ApiError::from(err).status, status);
        }
    }

    #[test]
    fn test_database_message_hidden() {
        let err = ApiError::from(ServiceError::Database(sea_orm::DbErr::Custom(
            "password=hunter2".to_string(),
        )));
        assert_eq!(err.message, "Internal server error");
    }
}
