use crate::dtos::{
    course::CourseResponse,
    directory::{BatchResponse, DepartmentResponse, ProgramResponse},
    enrollment::ReportSummary,
};
use chrono::NaiveDate;
use database::entities::{course_statuses, students, users};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StudentSummary {
    pub id: i32,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub program: i32,
    pub batch: i32,
    pub semester: String,
}

impl From<(students::Model, users::Model)> for StudentSummary {
    fn from((student, user): (students::Model, users::Model)) -> Self {
        Self {
            id: student.id,
            username: user.username,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            program: student.program_id,
            batch: student.batch_id,
            semester: student.semester.as_str().to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HodDashboard {
    pub department: DepartmentResponse,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub programs: Vec<ProgramResponse>,
    pub students: Vec<StudentSummary>,
    pub courses: Vec<CourseResponse>,
    pub batches: Vec<BatchResponse>,
    /// Reports waiting for approval
    pub pending_reports: Vec<ReportSummary>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct RejectReportRequest {
    pub reason: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct GradeRequest {
    /// `Pass` or `Fail`
    pub status: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct GradeResponse {
    pub id: i32,
    pub course: i32,
    pub status: String,
    pub completed_on: Option<NaiveDate>,
}

impl From<course_statuses::Model> for GradeResponse {
    fn from(status: course_statuses::Model) -> Self {
        Self {
            id: status.id,
            course: status.course_id,
            status: status.status.as_str().to_string(),
            completed_on: status.completed_on,
        }
    }
}
