use crate::{
    entities::{batches, course_batches, courses},
    error::{ServiceError, is_unique_violation},
    services::directory::DirectoryService,
};
use log::info;
use models::{identity::Principal, semester::Semester};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, Condition, ConnectionTrait,
    DatabaseConnection, EntityTrait, ModelTrait, NotSet, QueryFilter, QueryOrder,
    TransactionTrait,
};

/// Which courses to list
#[derive(Debug, Clone, Copy, Default)]
pub struct CourseFilter {
    pub department_id: Option<i32>,
    pub program_id: Option<i32>,
    pub semester: Option<Semester>,
}

impl CourseFilter {
    pub fn department(department_id: i32) -> Self {
        Self {
            department_id: Some(department_id),
            ..Default::default()
        }
    }

    pub fn program(mut self, program_id: i32) -> Self {
        self.program_id = Some(program_id);
        self
    }

    pub fn semester(mut self, semester: Semester) -> Self {
        self.semester = Some(semester);
        self
    }

    fn condition(&self) -> Condition {
        let mut condition = Condition::all();

        if let Some(department_id) = self.department_id {
            condition = condition.add(courses::Column::DepartmentId.eq(department_id));
        }
        if let Some(program_id) = self.program_id {
            condition = condition.add(courses::Column::ProgramId.eq(program_id));
        }
        if let Some(semester) = self.semester {
            condition = condition.add(courses::Column::Semester.eq(semester));
        }

        condition
    }
}

/// Fields of a course being created, already scoped to a department
#[derive(Debug, Clone)]
pub struct NewCourse {
    pub name: String,
    pub code: String,
    pub is_elective: bool,
    pub credit: i32,
    pub semester: Semester,
    pub program_id: i32,
    pub batch_ids: Vec<i32>,
}

pub struct CatalogService;

impl CatalogService {
    pub async fn get_course<C: ConnectionTrait>(
        db: &C,
        course_id: i32,
    ) -> Result<courses::Model, ServiceError> {
        courses::Entity::find_by_id(course_id)
            .one(db)
            .await?
            .ok_or(ServiceError::CourseNotFound(course_id))
    }

    pub async fn find_courses<C: ConnectionTrait>(
        db: &C,
        filter: CourseFilter,
    ) -> Result<Vec<courses::Model>, ServiceError> {
        let courses = courses::Entity::find()
            .filter(filter.condition())
            .order_by_asc(courses::Column::Semester)
            .order_by_asc(courses::Column::Code)
            .all(db)
            .await?;

        Ok(courses)
    }

    /// Batches a course is offered to
    pub async fn batches_of_course<C: ConnectionTrait>(
        db: &C,
        course: &courses::Model,
    ) -> Result<Vec<batches::Model>, ServiceError> {
        let batches = course
            .find_related(batches::Entity)
            .order_by_asc(batches::Column::StartYear)
            .all(db)
            .await?;

        Ok(batches)
    }

    /// Creates a course in the department of the requesting HOD
    pub async fn create_course(
        db: &DatabaseConnection,
        principal: &Principal,
        course: NewCourse,
    ) -> Result<courses::Model, ServiceError> {
        let Principal::Hod { department_id, .. } = principal else {
            return Err(ServiceError::unauthorized(
                "User is not associated with a department.",
            ));
        };

        let txn = db.begin().await?;
        let created = Self::insert_course(&txn, *department_id, course).await?;
        txn.commit().await?;

        Ok(created)
    }

    /// Validates and inserts a course with its batch links
    pub async fn insert_course<C: ConnectionTrait>(
        db: &C,
        department_id: i32,
        course: NewCourse,
    ) -> Result<courses::Model, ServiceError> {
        let name = course.name.trim();
        let code = course.code.trim();
        if name.is_empty() || code.is_empty() {
            return Err(ServiceError::validation("Course name and code are required."));
        }
        if course.credit <= 0 {
            return Err(ServiceError::validation("Course credit must be positive."));
        }

        let program = DirectoryService::get_program(db, course.program_id).await?;
        if program.department_id != department_id {
            return Err(ServiceError::validation(format!(
                "Program {} does not belong to this department.",
                program.id
            )));
        }

        for &batch_id in &course.batch_ids {
            DirectoryService::get_batch(db, batch_id).await?;
        }

        let code_taken = courses::Entity::find()
            .filter(courses::Column::Code.eq(code))
            .one(db)
            .await?
            .is_some();
        let code_taken_error = || ServiceError::validation(format!("Course code {code} already exists."));
        if code_taken {
            return Err(code_taken_error());
        }

        let created = courses::ActiveModel {
            id: NotSet,
            name: Set(name.to_string()),
            code: Set(code.to_string()),
            is_elective: Set(course.is_elective),
            credit: Set(course.credit),
            semester: Set(course.semester),
            department_id: Set(department_id),
            program_id: Set(program.id),
        }
        .insert(db)
        .await
        .map_err(|err| {
            if is_unique_violation(&err) {
                code_taken_error()
            } else {
                err.into()
            }
        })?;

        let mut batch_ids = course.batch_ids;
        batch_ids.sort_unstable();
        batch_ids.dedup();

        let links: Vec<_> = batch_ids
            .into_iter()
            .map(|batch_id| course_batches::ActiveModel {
                id: NotSet,
                course_id: Set(created.id),
                batch_id: Set(batch_id),
            })
            .collect();
        if !links.is_empty() {
            course_batches::Entity::insert_many(links)
                .exec_without_returning(db)
                .await?;
        }

        info!(
            "Created course {} ({}) in department {}",
            created.code, created.id, department_id
        );
        Ok(created)
    }
}
