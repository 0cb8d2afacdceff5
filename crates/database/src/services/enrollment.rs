use crate::{
    entities::{course_statuses, courses, sem_reports, students},
    error::ServiceError,
    services::{
        catalog::{CatalogService, CourseFilter},
        identity::IdentityService,
    },
};
use chrono::Utc;
use log::{debug, info};
use models::{
    course_status::CourseStatusKind,
    enrollment::{EnrollmentAction, ItemResults, ReportState},
    identity::Principal,
    semester::Semester,
};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr,
    EntityTrait, IntoActiveModel, JoinType, NotSet, QueryFilter, QueryOrder, QuerySelect,
    RelationTrait, TransactionTrait,
    sea_query::{Expr, OnConflict},
};
use serde::Serialize;
use std::collections::HashSet;

/// A semester report with its course statuses and their courses
#[derive(Debug, Clone, Serialize)]
pub struct ReportDetail {
    pub report: sem_reports::Model,
    pub entries: Vec<(course_statuses::Model, courses::Model)>,
}

impl ReportDetail {
    pub fn state(&self) -> ReportState {
        ReportState::of(self.report.is_approved, self.entries.len())
    }
}

/// Result of an enroll or unenroll request
#[derive(Debug, Clone, Serialize)]
pub struct EnrollmentResult {
    pub report: ReportDetail,
    pub results: ItemResults,
}

pub struct EnrollmentService;

impl EnrollmentService {
    pub async fn find_report<C: ConnectionTrait>(
        db: &C,
        student_id: i32,
        semester: Semester,
    ) -> Result<Option<sem_reports::Model>, ServiceError> {
        let report = sem_reports::Entity::find()
            .filter(sem_reports::Column::StudentId.eq(student_id))
            .filter(sem_reports::Column::Semester.eq(semester))
            .one(db)
            .await?;

        Ok(report)
    }

    pub async fn get_report<C: ConnectionTrait>(
        db: &C,
        report_id: i32,
    ) -> Result<sem_reports::Model, ServiceError> {
        sem_reports::Entity::find_by_id(report_id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::not_found("Report", report_id))
    }

    /// Returns the report for `(student, semester)`, creating an empty one if needed.
    ///
    /// Concurrent callers race on the `(student_id, semester)` unique index;
    /// the loser's insert is skipped and it reads the winner's row.
    pub async fn get_or_create_report<C: ConnectionTrait>(
        db: &C,
        student_id: i32,
        semester: Semester,
    ) -> Result<sem_reports::Model, ServiceError> {
        if let Some(report) = Self::find_report(db, student_id, semester).await? {
            return Ok(report);
        }

        let report = sem_reports::ActiveModel {
            id: NotSet,
            student_id: Set(student_id),
            semester: Set(semester),
            is_approved: Set(false),
            rejection_reason: Set(None),
        };
        let inserted = sem_reports::Entity::insert(report)
            .on_conflict(
                OnConflict::columns([sem_reports::Column::StudentId, sem_reports::Column::Semester])
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(db)
            .await;
        match inserted {
            Ok(_) | Err(DbErr::RecordNotInserted) => {}
            Err(err) => return Err(err.into()),
        }

        debug!(
            "Created semester {} report for student {}",
            semester.as_str(),
            student_id
        );
        Self::find_report(db, student_id, semester)
            .await?
            .ok_or_else(|| ServiceError::not_found("Report", student_id))
    }

    pub async fn report_detail<C: ConnectionTrait>(
        db: &C,
        report: sem_reports::Model,
    ) -> Result<ReportDetail, ServiceError> {
        let entries = course_statuses::Entity::find()
            .filter(course_statuses::Column::SemReportId.eq(report.id))
            .find_also_related(courses::Entity)
            .order_by_asc(course_statuses::Column::Id)
            .all(db)
            .await?
            .into_iter()
            .filter_map(|(status, course)| course.map(|course| (status, course)))
            .collect();

        Ok(ReportDetail { report, entries })
    }

    pub async fn enroll(
        db: &DatabaseConnection,
        student: &students::Model,
        semester: Semester,
        course_ids: &[i32],
    ) -> Result<EnrollmentResult, ServiceError> {
        Self::apply(db, student, semester, course_ids, EnrollmentAction::Enroll).await
    }

    pub async fn unenroll(
        db: &DatabaseConnection,
        student: &students::Model,
        semester: Semester,
        course_ids: &[i32],
    ) -> Result<EnrollmentResult, ServiceError> {
        Self::apply(db, student, semester, course_ids, EnrollmentAction::Unenroll).await
    }

    /// Applies one action to every course id inside a single transaction.
    ///
    /// Item errors are collected; any other error aborts and rolls back.
    pub async fn apply(
        db: &DatabaseConnection,
        student: &students::Model,
        semester: Semester,
        course_ids: &[i32],
        action: EnrollmentAction,
    ) -> Result<EnrollmentResult, ServiceError> {
        if semester != student.semester {
            return Err(ServiceError::validation(format!(
                "Semester {} is not the current semester.",
                semester.as_str()
            )));
        }
        if course_ids.is_empty() {
            return Err(ServiceError::validation("No courses selected."));
        }

        let txn = db.begin().await?;

        let report = Self::get_or_create_report(&txn, student.id, semester).await?;
        if report.is_approved {
            return Err(ServiceError::ReportLocked(semester));
        }

        let mut results = ItemResults::default();
        for &course_id in course_ids {
            let applied = match action {
                EnrollmentAction::Enroll => Self::enroll_one(&txn, &report, course_id).await,
                EnrollmentAction::Unenroll => Self::unenroll_one(&txn, &report, course_id).await,
            };

            match applied {
                Ok(course) => results.succeed(course.name),
                Err(err) if err.is_item_error() => results.fail(err.to_string()),
                Err(err) => return Err(err),
            }
        }

        let report = Self::report_detail(&txn, report).await?;
        txn.commit().await?;

        info!(
            "Student {} {:?} semester {}: {} applied, {} rejected",
            student.id,
            action,
            semester.as_str(),
            results.message.len(),
            results.errors.len()
        );
        Ok(EnrollmentResult { report, results })
    }

    async fn enroll_one<C: ConnectionTrait>(
        db: &C,
        report: &sem_reports::Model,
        course_id: i32,
    ) -> Result<courses::Model, ServiceError> {
        let course = CatalogService::get_course(db, course_id).await?;

        let existing = course_statuses::Entity::find()
            .filter(course_statuses::Column::SemReportId.eq(report.id))
            .filter(course_statuses::Column::CourseId.eq(course.id))
            .filter(course_statuses::Column::Status.eq(CourseStatusKind::Enrolled))
            .one(db)
            .await?;
        if existing.is_some() {
            return Err(ServiceError::AlreadyEnrolled(course.name));
        }

        let status = course_statuses::ActiveModel {
            id: NotSet,
            sem_report_id: Set(report.id),
            course_id: Set(course.id),
            status: Set(CourseStatusKind::Enrolled),
            semester: Set(report.semester),
            enrolled_on: Set(Utc::now().date_naive()),
            completed_on: Set(None),
        };
        // Conflict target must repeat the partial index predicate as a literal
        let active = Expr::col(course_statuses::Column::Status).eq(Expr::cust("'Enrolled'"));
        let inserted = course_statuses::Entity::insert(status)
            .on_conflict(
                OnConflict::columns([
                    course_statuses::Column::SemReportId,
                    course_statuses::Column::CourseId,
                ])
                .target_and_where(active)
                .do_nothing()
                .to_owned(),
            )
            .exec_without_returning(db)
            .await;

        match inserted {
            Ok(0) | Err(DbErr::RecordNotInserted) => Err(ServiceError::AlreadyEnrolled(course.name)),
            Ok(_) => Ok(course),
            Err(err) => Err(err.into()),
        }
    }

    async fn unenroll_one<C: ConnectionTrait>(
        db: &C,
        report: &sem_reports::Model,
        course_id: i32,
    ) -> Result<courses::Model, ServiceError> {
        let course = CatalogService::get_course(db, course_id).await?;

        let Some(status) = course_statuses::Entity::find()
            .filter(course_statuses::Column::SemReportId.eq(report.id))
            .filter(course_statuses::Column::CourseId.eq(course.id))
            .filter(course_statuses::Column::Status.eq(CourseStatusKind::Enrolled))
            .one(db)
            .await?
        else {
            return Err(ServiceError::NotEnrolled(course.name));
        };

        course_statuses::Entity::delete_by_id(status.id)
            .exec(db)
            .await?;

        Ok(course)
    }

    /// Courses of the student's department and program not currently enrolled in
    pub async fn available_courses<C: ConnectionTrait>(
        db: &C,
        student: &students::Model,
    ) -> Result<Vec<courses::Model>, ServiceError> {
        let enrolled: HashSet<i32> = match Self::find_report(db, student.id, student.semester).await? {
            Some(report) => course_statuses::Entity::find()
                .filter(course_statuses::Column::SemReportId.eq(report.id))
                .filter(course_statuses::Column::Status.eq(CourseStatusKind::Enrolled))
                .all(db)
                .await?
                .into_iter()
                .map(|status| status.course_id)
                .collect(),
            None => HashSet::new(),
        };

        let filter = CourseFilter::department(student.department_id).program(student.program_id);
        let courses = CatalogService::find_courses(db, filter)
            .await?
            .into_iter()
            .filter(|course| !enrolled.contains(&course.id))
            .collect();

        Ok(courses)
    }

    /// Every report of the student, in semester order
    pub async fn semester_history<C: ConnectionTrait>(
        db: &C,
        student_id: i32,
    ) -> Result<Vec<ReportDetail>, ServiceError> {
        let mut reports = sem_reports::Entity::find()
            .filter(sem_reports::Column::StudentId.eq(student_id))
            .all(db)
            .await?;
        reports.sort_by_key(|report| report.semester);

        let mut history = Vec::with_capacity(reports.len());
        for report in reports {
            history.push(Self::report_detail(db, report).await?);
        }

        Ok(history)
    }

    /// Unapproved reports of every student in a department
    pub async fn pending_reports<C: ConnectionTrait>(
        db: &C,
        department_id: i32,
    ) -> Result<Vec<sem_reports::Model>, ServiceError> {
        let reports = sem_reports::Entity::find()
            .join(JoinType::InnerJoin, sem_reports::Relation::Student.def())
            .filter(students::Column::DepartmentId.eq(department_id))
            .filter(sem_reports::Column::IsApproved.eq(false))
            .order_by_asc(sem_reports::Column::Id)
            .all(db)
            .await?;

        Ok(reports)
    }

    /// Loads a report and checks the principal may act on its student
    async fn managed_report<C: ConnectionTrait>(
        db: &C,
        principal: &Principal,
        report_id: i32,
    ) -> Result<sem_reports::Model, ServiceError> {
        let report = Self::get_report(db, report_id).await?;
        let student = IdentityService::get_student(db, report.student_id).await?;
        if !principal.manages_department(student.department_id) {
            return Err(ServiceError::unauthorized(
                "Report belongs to a student outside your department.",
            ));
        }

        Ok(report)
    }

    /// Locks a report. Approving twice is a no-op.
    pub async fn approve_report(
        db: &DatabaseConnection,
        principal: &Principal,
        report_id: i32,
    ) -> Result<sem_reports::Model, ServiceError> {
        let report = Self::managed_report(db, principal, report_id).await?;
        if report.is_approved {
            return Ok(report);
        }

        let mut report = report.into_active_model();
        report.is_approved = Set(true);
        report.rejection_reason = Set(None);
        let report = report.update(db).await?;

        info!(
            "Report {} of student {} approved by user {}",
            report.id,
            report.student_id,
            principal.user_id()
        );
        Ok(report)
    }

    /// Records why a report was sent back; the report stays open for changes
    pub async fn reject_report(
        db: &DatabaseConnection,
        principal: &Principal,
        report_id: i32,
        reason: &str,
    ) -> Result<sem_reports::Model, ServiceError> {
        let reason = reason.trim();
        if reason.is_empty() {
            return Err(ServiceError::validation("A rejection reason is required."));
        }

        let report = Self::managed_report(db, principal, report_id).await?;
        if report.is_approved {
            return Err(ServiceError::ReportLocked(report.semester));
        }

        let mut report = report.into_active_model();
        report.rejection_reason = Set(Some(reason.to_string()));
        let report = report.update(db).await?;

        info!("Report {} rejected: {}", report.id, reason);
        Ok(report)
    }

    /// Records the final result of one course attempt
    pub async fn grade_course(
        db: &DatabaseConnection,
        principal: &Principal,
        status_id: i32,
        grade: CourseStatusKind,
    ) -> Result<course_statuses::Model, ServiceError> {
        if !grade.is_final() {
            return Err(ServiceError::validation(format!(
                "Cannot grade a course as {}.",
                grade.as_str()
            )));
        }

        let status = course_statuses::Entity::find_by_id(status_id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::not_found("Course status", status_id))?;
        Self::managed_report(db, principal, status.sem_report_id).await?;

        let mut status = status.into_active_model();
        status.status = Set(grade);
        status.completed_on = Set(Some(Utc::now().date_naive()));
        let status = status.update(db).await?;

        info!(
            "Course status {} graded {}",
            status.id,
            status.status.as_str()
        );
        Ok(status)
    }
}
