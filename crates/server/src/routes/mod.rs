pub mod auth;
pub mod course;
pub mod directory;
pub mod health;
pub mod hod;
pub mod root;
pub mod student;

use crate::error::ApiError;
use models::semester::Semester;

/// Parses a "1" through "8" semester label from a request
fn parse_semester(value: &str) -> Result<Semester, ApiError> {
    Semester::parse_label(value)
        .ok_or_else(|| ApiError::bad_request(format!("Invalid semester: {value}")))
}
