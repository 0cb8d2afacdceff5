//! Row shapes accepted by the bulk upload endpoints.
//!
//! Cells are read as text and validated here so that a bad cell is reported
//! against its row instead of failing the whole upload.

use crate::semester::Semester;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Validation failure for a single cell of an uploaded row
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RowError {
    #[error("missing value for {0}")]
    Missing(&'static str),
    #[error("invalid {field}: {value}")]
    Invalid { field: &'static str, value: String },
}

/// Outcome of a bulk upload, one entry per row
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportReport {
    pub created: Vec<String>,
    pub errors: Vec<String>,
}

impl ImportReport {
    pub fn created(&mut self, label: impl Into<String>) {
        self.created.push(label.into());
    }

    pub fn failed(&mut self, label: &str, reason: impl std::fmt::Display) {
        self.errors.push(format!("{label}: {reason}"));
    }
}

/// Enrollment years of a batch, written as "2020-2024" in spreadsheets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BatchSpan {
    pub start_year: i32,
    pub end_year: i32,
}

impl BatchSpan {
    pub fn new(start_year: i32, end_year: i32) -> Result<Self, RowError> {
        if start_year >= end_year {
            return Err(RowError::Invalid {
                field: "Batch",
                value: format!("{start_year}-{end_year}"),
            });
        }

        Ok(Self {
            start_year,
            end_year,
        })
    }
}

impl FromStr for BatchSpan {
    type Err = RowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || RowError::Invalid {
            field: "Batch",
            value: s.to_string(),
        };

        let (start, end) = s.trim().split_once('-').ok_or_else(invalid)?;
        let start = start.trim().parse().map_err(|_| invalid())?;
        let end = end.trim().parse().map_err(|_| invalid())?;

        Self::new(start, end)
    }
}

fn required<'a>(field: &'static str, value: &'a str) -> Result<&'a str, RowError> {
    let value = value.trim();
    if value.is_empty() {
        Err(RowError::Missing(field))
    } else {
        Ok(value)
    }
}

fn parse_number<T: FromStr>(field: &'static str, value: &str) -> Result<T, RowError> {
    let value = required(field, value)?;
    // Spreadsheet exports write whole numbers as "3.0"
    let value = value.strip_suffix(".0").unwrap_or(value);
    value.parse().map_err(|_| RowError::Invalid {
        field,
        value: value.to_string(),
    })
}

fn parse_yes_no(field: &'static str, value: &str) -> Result<bool, RowError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "yes" | "y" | "true" => Ok(true),
        "no" | "n" | "false" | "" => Ok(false),
        _ => Err(RowError::Invalid {
            field,
            value: value.to_string(),
        }),
    }
}

/// A raw course row as it appears in the upload
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CourseRow {
    #[serde(rename = "Program", default)]
    pub program: String,
    #[serde(rename = "Semester", default)]
    pub semester: String,
    #[serde(rename = "Batch", default)]
    pub batch: String,
    #[serde(rename = "Subject Name", default)]
    pub name: String,
    #[serde(rename = "Subject Code", default)]
    pub code: String,
    #[serde(rename = "Course Credit", default)]
    pub credit: String,
    #[serde(rename = "Is Optional", default)]
    pub is_optional: String,
}

/// A course row whose cells have all been validated
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseRecord {
    pub program_id: i32,
    pub semester: Semester,
    pub batch: BatchSpan,
    pub name: String,
    pub code: String,
    pub credit: i32,
    pub is_elective: bool,
}

impl CourseRow {
    /// Identifies the row in upload reports
    pub fn label(&self, row_number: usize) -> String {
        let code = self.code.trim();
        if code.is_empty() {
            format!("row {row_number}")
        } else {
            code.to_string()
        }
    }

    pub fn validate(&self) -> Result<CourseRecord, RowError> {
        let credit: i32 = parse_number("Course Credit", &self.credit)?;
        if credit <= 0 {
            return Err(RowError::Invalid {
                field: "Course Credit",
                value: credit.to_string(),
            });
        }

        let semester = required("Semester", &self.semester)?;

        Ok(CourseRecord {
            program_id: parse_number("Program", &self.program)?,
            semester: Semester::parse_label(semester).ok_or_else(|| RowError::Invalid {
                field: "Semester",
                value: semester.to_string(),
            })?,
            batch: required("Batch", &self.batch)?.parse()?,
            name: required("Subject Name", &self.name)?.to_string(),
            code: required("Subject Code", &self.code)?.to_string(),
            credit,
            is_elective: parse_yes_no("Is Optional", &self.is_optional)?,
        })
    }
}

/// A raw student row as it appears in the upload
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StudentRow {
    #[serde(rename = "Username", default)]
    pub username: String,
    #[serde(rename = "Email", default)]
    pub email: String,
    #[serde(rename = "Password", default)]
    pub password: String,
    #[serde(rename = "First Name", default)]
    pub first_name: String,
    #[serde(rename = "Last Name", default)]
    pub last_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentRecord {
    pub username: String,
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

impl StudentRow {
    pub fn label(&self, row_number: usize) -> String {
        let username = self.username.trim();
        if username.is_empty() {
            format!("row {row_number}")
        } else {
            username.to_string()
        }
    }

    pub fn validate(&self) -> Result<StudentRecord, RowError> {
        let email = self.email.trim();
        if !email.is_empty() && !email.contains('@') {
            return Err(RowError::Invalid {
                field: "Email",
                value: email.to_string(),
            });
        }

        Ok(StudentRecord {
            username: required("Username", &self.username)?.to_string(),
            email: email.to_string(),
            password: required("Password", &self.password)?.to_string(),
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
        })
    }
}
