use crate::dtos::{
    course::CourseResponse,
    directory::{BatchResponse, DepartmentResponse, ProgramResponse},
};
use chrono::NaiveDate;
use database::{
    entities::{course_statuses, courses, sem_reports},
    services::enrollment::ReportDetail,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub struct EnrollmentRequest {
    /// `enroll` or `unenroll`
    #[serde(rename = "type")]
    pub action: Option<String>,
    #[serde(rename = "CourseIDs", default)]
    pub course_ids: Vec<i32>,
    /// Defaults to the student's current semester
    pub semester: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CourseStatusResponse {
    pub id: i32,
    pub course: CourseResponse,
    /// `Enrolled`, `Pass` or `Fail`
    pub status: String,
    pub semester: String,
    pub enrolled_on: NaiveDate,
    pub completed_on: Option<NaiveDate>,
}

impl From<(course_statuses::Model, courses::Model)> for CourseStatusResponse {
    fn from((status, course): (course_statuses::Model, courses::Model)) -> Self {
        Self {
            id: status.id,
            course: course.into(),
            status: status.status.as_str().to_string(),
            semester: status.semester.as_str().to_string(),
            enrolled_on: status.enrolled_on,
            completed_on: status.completed_on,
        }
    }
}

/// A report without its courses
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ReportSummary {
    pub id: i32,
    pub student: i32,
    pub semester: String,
    pub is_approved: bool,
    pub rejection_reason: Option<String>,
}

impl From<sem_reports::Model> for ReportSummary {
    fn from(report: sem_reports::Model) -> Self {
        Self {
            id: report.id,
            student: report.student_id,
            semester: report.semester.as_str().to_string(),
            is_approved: report.is_approved,
            rejection_reason: report.rejection_reason,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ReportResponse {
    pub id: i32,
    pub semester: String,
    pub is_approved: bool,
    pub rejection_reason: Option<String>,
    pub courses: Vec<CourseStatusResponse>,
}

impl From<ReportDetail> for ReportResponse {
    fn from(detail: ReportDetail) -> Self {
        Self {
            id: detail.report.id,
            semester: detail.report.semester.as_str().to_string(),
            is_approved: detail.report.is_approved,
            rejection_reason: detail.report.rejection_reason,
            courses: detail.entries.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct EnrollmentResponse {
    pub report: ReportResponse,
    /// Names of the courses that changed
    pub message: Vec<String>,
    pub errors: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StudentDashboard {
    pub department: DepartmentResponse,
    pub program: ProgramResponse,
    pub batch: BatchResponse,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub semester: String,
    /// The current semester's report, once one exists
    pub report: Option<ReportResponse>,
    pub available_courses: Vec<CourseResponse>,
    pub status: String,
}
