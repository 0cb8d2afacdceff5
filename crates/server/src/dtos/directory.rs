use database::entities::{batches, departments, programs};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DepartmentResponse {
    pub id: i32,
    pub name: String,
}

impl From<departments::Model> for DepartmentResponse {
    fn from(department: departments::Model) -> Self {
        Self {
            id: department.id,
            name: department.name,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProgramResponse {
    pub id: i32,
    pub name: String,
    pub department: i32,
    /// Length of the program in years
    pub duration: i32,
}

impl From<programs::Model> for ProgramResponse {
    fn from(program: programs::Model) -> Self {
        Self {
            id: program.id,
            name: program.name,
            department: program.department_id,
            duration: program.duration,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BatchResponse {
    pub id: i32,
    pub start_year: i32,
    pub end_year: i32,
}

impl From<batches::Model> for BatchResponse {
    fn from(batch: batches::Model) -> Self {
        Self {
            id: batch.id,
            start_year: batch.start_year,
            end_year: batch.end_year,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateDepartmentRequest {
    pub name: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateProgramRequest {
    pub name: String,
    pub department: i32,
    pub duration: i32,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateBatchRequest {
    pub start_year: i32,
    pub end_year: i32,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct ProgramQueryParams {
    /// Only programs of this department
    pub department: Option<i32>,
}
