use argon2::password_hash;
use models::semester::Semester;
use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

/// Failures surfaced by the services to their callers
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Invalid credentials.")]
    InvalidCredentials,
    #[error("{entity} {id} does not exist")]
    NotFound { entity: &'static str, id: String },
    #[error("Course {0} does not exist")]
    CourseNotFound(i32),
    #[error("Semester {} report is approved and can no longer be changed", .0.as_str())]
    ReportLocked(Semester),
    #[error("Already enrolled in {0}")]
    AlreadyEnrolled(String),
    #[error("Not enrolled in {0}")]
    NotEnrolled(String),
    #[error("A batch for {start}-{end} already exists")]
    DuplicateBatch { start: i32, end: i32 },
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("database error: {0}")]
    Database(#[from] DbErr),
    #[error("password hashing failed: {0}")]
    PasswordHash(#[from] password_hash::Error),
}

impl ServiceError {
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized(message.into())
    }

    /// Whether the error rejects a single item rather than the whole request
    pub fn is_item_error(&self) -> bool {
        matches!(
            self,
            Self::CourseNotFound(_) | Self::AlreadyEnrolled(_) | Self::NotEnrolled(_)
        )
    }
}

/// Whether a storage error was raised by a unique index
pub fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            ServiceError::ReportLocked(Semester::Third).to_string(),
            "Semester 3 report is approved and can no longer be changed"
        );
        assert_eq!(
            ServiceError::not_found("Program", 12).to_string(),
            "Program 12 does not exist"
        );
        assert_eq!(
            ServiceError::DuplicateBatch {
                start: 2020,
                end: 2024
            }
            .to_string(),
            "A batch for 2020-2024 already exists"
        );
    }

    #[test]
    fn test_item_errors() {
        assert!(ServiceError::CourseNotFound(4).is_item_error());
        assert!(ServiceError::AlreadyEnrolled("Networks".into()).is_item_error());
        assert!(!ServiceError::ReportLocked(Semester::First).is_item_error());
        assert!(!ServiceError::InvalidCredentials.is_item_error());
    }
}
