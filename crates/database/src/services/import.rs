//! Bulk upload of courses and students from CSV files.
//!
//! Every row is validated and committed on its own; a bad row is reported by
//! its label and never stops the rows after it.

use crate::{
    entities::programs,
    error::ServiceError,
    services::{
        catalog::{CatalogService, NewCourse},
        directory::DirectoryService,
        identity::{IdentityService, NewAccount},
    },
};
use csv::{ReaderBuilder, Trim};
use log::{info, warn};
use models::{
    identity::Principal,
    import::{CourseRow, ImportReport, RowError, StudentRow},
    semester::Semester,
};
use sea_orm::{DatabaseConnection, TransactionTrait};
use serde::de::DeserializeOwned;
use std::future::Future;

/// Turns one parsed row into stored records
pub trait RowMapper: Sync {
    type Row: DeserializeOwned + Send;

    /// Columns that must be present in the header row
    const REQUIRED_HEADERS: &'static [&'static str];

    fn label(row: &Self::Row, row_number: usize) -> String;

    fn apply(
        &self,
        db: &DatabaseConnection,
        row: Self::Row,
    ) -> impl Future<Output = Result<(), ServiceError>> + Send;
}

fn row_error(err: RowError) -> ServiceError {
    ServiceError::Validation(err.to_string())
}

/// Rejects files that are not CSV by extension or content type
pub fn ensure_csv(file_name: Option<&str>, content_type: Option<&str>) -> Result<(), ServiceError> {
    let by_name = file_name.map(|name| name.to_ascii_lowercase().ends_with(".csv"));
    let by_type = content_type.map(|mime| mime.starts_with("text/csv"));

    match (by_name, by_type) {
        (Some(true), _) | (None, Some(true)) => Ok(()),
        _ => Err(ServiceError::validation("Only CSV files are supported.")),
    }
}

/// Parses `data` as CSV and feeds each row through `mapper`
pub async fn run_import<M: RowMapper>(
    db: &DatabaseConnection,
    mapper: &M,
    data: &[u8],
) -> Result<ImportReport, ServiceError> {
    let mut reader = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_reader(data);

    let headers = reader
        .headers()
        .map_err(|err| ServiceError::validation(format!("Could not read header row: {err}")))?
        .clone();
    let missing: Vec<&str> = M::REQUIRED_HEADERS
        .iter()
        .copied()
        .filter(|required| !headers.iter().any(|header| header == *required))
        .collect();
    if !missing.is_empty() {
        return Err(ServiceError::validation(format!(
            "Missing columns: {}",
            missing.join(", ")
        )));
    }

    let mut report = ImportReport::default();
    for (index, row) in reader.deserialize::<M::Row>().enumerate() {
        // Header is line 1
        let row_number = index + 2;

        let row = match row {
            Ok(row) => row,
            Err(err) => {
                report.failed(&format!("row {row_number}"), err);
                continue;
            }
        };

        let label = M::label(&row, row_number);
        match mapper.apply(db, row).await {
            Ok(()) => report.created(label),
            Err(ServiceError::Database(err)) => {
                warn!("Row {row_number} ({label}) failed to save: {err}");
                report.failed(&label, "could not be saved");
            }
            Err(err) => report.failed(&label, err),
        }
    }

    info!(
        "Import finished: {} created, {} rejected",
        report.created.len(),
        report.errors.len()
    );
    Ok(report)
}

/// Creates courses in one department
#[derive(Debug, Clone, Copy)]
pub struct CourseImport {
    pub department_id: i32,
}

impl CourseImport {
    /// Only heads of department import courses, always into their own department
    pub fn for_principal(principal: &Principal) -> Result<Self, ServiceError> {
        match principal {
            Principal::Hod { department_id, .. } => Ok(Self {
                department_id: *department_id,
            }),
            _ => Err(ServiceError::unauthorized(
                "User is not associated with a department.",
            )),
        }
    }
}

impl RowMapper for CourseImport {
    type Row = CourseRow;

    const REQUIRED_HEADERS: &'static [&'static str] = &[
        "Program",
        "Semester",
        "Batch",
        "Subject Name",
        "Subject Code",
        "Course Credit",
        "Is Optional",
    ];

    fn label(row: &CourseRow, row_number: usize) -> String {
        row.label(row_number)
    }

    async fn apply(&self, db: &DatabaseConnection, row: CourseRow) -> Result<(), ServiceError> {
        let record = row.validate().map_err(row_error)?;

        let txn = db.begin().await?;
        let batch = DirectoryService::find_batch_by_span(&txn, record.batch)
            .await?
            .ok_or_else(|| {
                ServiceError::validation(format!(
                    "Batch {}-{} does not exist",
                    record.batch.start_year, record.batch.end_year
                ))
            })?;

        CatalogService::insert_course(
            &txn,
            self.department_id,
            NewCourse {
                name: record.name,
                code: record.code,
                is_elective: record.is_elective,
                credit: record.credit,
                semester: record.semester,
                program_id: record.program_id,
                batch_ids: vec![batch.id],
            },
        )
        .await?;
        txn.commit().await?;

        Ok(())
    }
}

/// Registers students into one program, batch and semester
#[derive(Debug, Clone)]
pub struct StudentImport {
    pub program: programs::Model,
    pub batch_id: i32,
    pub semester: Semester,
}

impl StudentImport {
    /// Resolves the target program and batch and checks the principal manages them
    pub async fn prepare(
        db: &DatabaseConnection,
        principal: &Principal,
        program_id: i32,
        batch_id: i32,
        semester: Semester,
    ) -> Result<Self, ServiceError> {
        let program = DirectoryService::get_program(db, program_id).await?;
        if !principal.manages_department(program.department_id) {
            return Err(ServiceError::unauthorized(
                "You can only import students into your own department.",
            ));
        }
        DirectoryService::get_batch(db, batch_id).await?;

        Ok(Self {
            program,
            batch_id,
            semester,
        })
    }
}

impl RowMapper for StudentImport {
    type Row = StudentRow;

    const REQUIRED_HEADERS: &'static [&'static str] =
        &["Username", "Email", "Password", "First Name", "Last Name"];

    fn label(row: &StudentRow, row_number: usize) -> String {
        row.label(row_number)
    }

    async fn apply(&self, db: &DatabaseConnection, row: StudentRow) -> Result<(), ServiceError> {
        let record = row.validate().map_err(row_error)?;
        let account = NewAccount {
            username: record.username,
            password: record.password,
            email: record.email,
            first_name: record.first_name,
            last_name: record.last_name,
        };

        let txn = db.begin().await?;
        IdentityService::create_student(&txn, account, &self.program, self.batch_id, self.semester)
            .await?;
        txn.commit().await?;

        Ok(())
    }
}
