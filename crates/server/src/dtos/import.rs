use models::import::ImportReport;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ImportResponse {
    /// Labels of the rows that were stored
    pub created: Vec<String>,
    /// `"<row label>: <reason>"` for every rejected row
    pub errors: Vec<String>,
}

impl From<ImportReport> for ImportResponse {
    fn from(report: ImportReport) -> Self {
        Self {
            created: report.created,
            errors: report.errors,
        }
    }
}

// Multipart bodies, only described for the API docs

#[derive(Deserialize, ToSchema)]
#[allow(dead_code)]
pub struct CourseUploadForm {
    /// Must be `BulkCourseUpload`
    #[serde(rename = "type")]
    pub kind: String,
    #[schema(value_type = String, format = Binary)]
    pub file: Vec<u8>,
}

#[derive(Deserialize, ToSchema)]
#[allow(dead_code)]
pub struct StudentUploadForm {
    pub program: i32,
    pub batch: i32,
    pub semester: String,
    #[schema(value_type = String, format = Binary)]
    pub file: Vec<u8>,
}
