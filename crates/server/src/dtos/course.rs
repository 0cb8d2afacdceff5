use crate::dtos::directory::BatchResponse;
use database::entities::courses;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CourseResponse {
    pub id: i32,
    pub name: String,
    pub code: String,
    pub is_elective: bool,
    pub credit: i32,
    /// "1" through "8"
    pub semester: String,
    pub department: i32,
    pub program: i32,
}

impl From<courses::Model> for CourseResponse {
    fn from(course: courses::Model) -> Self {
        Self {
            id: course.id,
            semester: course.semester.as_str().to_string(),
            name: course.name,
            code: course.code,
            is_elective: course.is_elective,
            credit: course.credit,
            department: course.department_id,
            program: course.program_id,
        }
    }
}

/// A course with the batches it is offered to
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CourseDetailResponse {
    #[serde(flatten)]
    pub course: CourseResponse,
    pub batches: Vec<BatchResponse>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct CourseQueryParams {
    /// Defaults to the caller's department
    pub department: Option<i32>,
    pub program: Option<i32>,
    pub semester: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateCourseRequest {
    pub name: String,
    pub code: String,
    #[serde(default)]
    pub is_elective: bool,
    pub credit: i32,
    pub semester: String,
    pub program: i32,
    #[serde(default)]
    pub batches: Vec<i32>,
}
