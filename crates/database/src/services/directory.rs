use crate::{
    entities::{batches, departments, programs},
    error::{ServiceError, is_unique_violation},
};
use log::info;
use models::{identity::Principal, import::BatchSpan};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, EntityTrait, NotSet,
    QueryFilter, QueryOrder,
};

/// Allowed program durations, in years
const PROGRAM_DURATION: std::ops::RangeInclusive<i32> = 2..=5;

pub struct DirectoryService;

impl DirectoryService {
    pub async fn get_department<C: ConnectionTrait>(
        db: &C,
        department_id: i32,
    ) -> Result<departments::Model, ServiceError> {
        departments::Entity::find_by_id(department_id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::not_found("Department", department_id))
    }

    pub async fn get_program<C: ConnectionTrait>(
        db: &C,
        program_id: i32,
    ) -> Result<programs::Model, ServiceError> {
        programs::Entity::find_by_id(program_id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::not_found("Program", program_id))
    }

    pub async fn get_batch<C: ConnectionTrait>(
        db: &C,
        batch_id: i32,
    ) -> Result<batches::Model, ServiceError> {
        batches::Entity::find_by_id(batch_id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::not_found("Batch", batch_id))
    }

    /// Finds the batch with exactly these start and end years
    pub async fn find_batch_by_span<C: ConnectionTrait>(
        db: &C,
        span: BatchSpan,
    ) -> Result<Option<batches::Model>, ServiceError> {
        let batch = batches::Entity::find()
            .filter(batches::Column::StartYear.eq(span.start_year))
            .filter(batches::Column::EndYear.eq(span.end_year))
            .one(db)
            .await?;

        Ok(batch)
    }

    pub async fn list_departments<C: ConnectionTrait>(
        db: &C,
    ) -> Result<Vec<departments::Model>, ServiceError> {
        let departments = departments::Entity::find()
            .order_by_asc(departments::Column::Name)
            .all(db)
            .await?;

        Ok(departments)
    }

    /// Lists programs, optionally restricted to one department
    pub async fn list_programs<C: ConnectionTrait>(
        db: &C,
        department_id: Option<i32>,
    ) -> Result<Vec<programs::Model>, ServiceError> {
        let mut query = programs::Entity::find();
        if let Some(department_id) = department_id {
            query = query.filter(programs::Column::DepartmentId.eq(department_id));
        }

        let programs = query.order_by_asc(programs::Column::Name).all(db).await?;
        Ok(programs)
    }

    pub async fn list_batches<C: ConnectionTrait>(
        db: &C,
    ) -> Result<Vec<batches::Model>, ServiceError> {
        let batches = batches::Entity::find()
            .order_by_desc(batches::Column::StartYear)
            .order_by_desc(batches::Column::EndYear)
            .all(db)
            .await?;

        Ok(batches)
    }

    pub async fn create_department<C: ConnectionTrait>(
        db: &C,
        principal: &Principal,
        name: &str,
    ) -> Result<departments::Model, ServiceError> {
        if !matches!(principal, Principal::Admin { .. }) {
            return Err(ServiceError::unauthorized(
                "Only administrators can create departments.",
            ));
        }

        let name = name.trim();
        if name.is_empty() {
            return Err(ServiceError::validation("Department name is required."));
        }

        let department = departments::ActiveModel {
            id: NotSet,
            name: Set(name.to_string()),
        }
        .insert(db)
        .await?;

        info!("Created department {} ({})", department.name, department.id);
        Ok(department)
    }

    pub async fn create_program<C: ConnectionTrait>(
        db: &C,
        principal: &Principal,
        department_id: i32,
        name: &str,
        duration: i32,
    ) -> Result<programs::Model, ServiceError> {
        if !principal.manages_department(department_id) {
            return Err(ServiceError::unauthorized(
                "You can only create programs in your own department.",
            ));
        }

        let name = name.trim();
        if name.is_empty() {
            return Err(ServiceError::validation("Program name is required."));
        }
        if !PROGRAM_DURATION.contains(&duration) {
            return Err(ServiceError::validation(format!(
                "Program duration must be between {} and {} years.",
                PROGRAM_DURATION.start(),
                PROGRAM_DURATION.end()
            )));
        }

        Self::get_department(db, department_id).await?;

        let program = programs::ActiveModel {
            id: NotSet,
            name: Set(name.to_string()),
            department_id: Set(department_id),
            duration: Set(duration),
        }
        .insert(db)
        .await
        .map_err(|err| {
            if is_unique_violation(&err) {
                ServiceError::validation(format!(
                    "Program {name} already exists in this department."
                ))
            } else {
                err.into()
            }
        })?;

        info!(
            "Created program {} ({}) in department {}",
            program.name, program.id, department_id
        );
        Ok(program)
    }

    /// Creates a batch, rejecting a second batch with the same years
    pub async fn create_batch<C: ConnectionTrait>(
        db: &C,
        principal: &Principal,
        start_year: i32,
        end_year: i32,
    ) -> Result<batches::Model, ServiceError> {
        if matches!(principal, Principal::Student { .. }) {
            return Err(ServiceError::unauthorized("Students cannot create batches."));
        }

        let span = BatchSpan::new(start_year, end_year)
            .map_err(|err| ServiceError::validation(err.to_string()))?;
        let duplicate = ServiceError::DuplicateBatch {
            start: start_year,
            end: end_year,
        };

        if Self::find_batch_by_span(db, span).await?.is_some() {
            return Err(duplicate);
        }

        let batch = batches::ActiveModel {
            id: NotSet,
            start_year: Set(span.start_year),
            end_year: Set(span.end_year),
        }
        .insert(db)
        .await
        .map_err(|err| {
            if is_unique_violation(&err) {
                duplicate
            } else {
                err.into()
            }
        })?;

        info!("Created batch {}-{} ({})", batch.start_year, batch.end_year, batch.id);
        Ok(batch)
    }
}
