use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Usernames are unique
        manager
            .create_index(
                Index::create()
                    .name("idx_users_username")
                    .table(Users::Table)
                    .col(Users::Username)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // A program name is unique within its department
        manager
            .create_index(
                Index::create()
                    .name("idx_programs_name_department_id")
                    .table(Programs::Table)
                    .col(Programs::Name)
                    .col(Programs::DepartmentId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // No two batches share both start and end year
        manager
            .create_index(
                Index::create()
                    .name("idx_batches_start_year_end_year")
                    .table(Batches::Table)
                    .col(Batches::StartYear)
                    .col(Batches::EndYear)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Course codes are globally unique
        manager
            .create_index(
                Index::create()
                    .name("idx_courses_code")
                    .table(Courses::Table)
                    .col(Courses::Code)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Catalog lookups by department, program and semester
        manager
            .create_index(
                Index::create()
                    .name("idx_courses_department_program_semester")
                    .table(Courses::Table)
                    .col(Courses::DepartmentId)
                    .col(Courses::ProgramId)
                    .col(Courses::Semester)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_course_batches_course_id_batch_id")
                    .table(CourseBatches::Table)
                    .col(CourseBatches::CourseId)
                    .col(CourseBatches::BatchId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // A department has at most one HOD and a user heads at most one department
        manager
            .create_index(
                Index::create()
                    .name("idx_hods_user_id")
                    .table(Hods::Table)
                    .col(Hods::UserId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_hods_department_id")
                    .table(Hods::Table)
                    .col(Hods::DepartmentId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_students_user_id")
                    .table(Students::Table)
                    .col(Students::UserId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_students_department_id")
                    .table(Students::Table)
                    .col(Students::DepartmentId)
                    .to_owned(),
            )
            .await?;

        // Exactly one report per student and semester
        manager
            .create_index(
                Index::create()
                    .name("idx_sem_reports_student_id_semester")
                    .table(SemReports::Table)
                    .col(SemReports::StudentId)
                    .col(SemReports::Semester)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // A course is actively enrolled at most once per report; graded attempts may repeat
        manager
            .create_index(
                Index::create()
                    .name("idx_course_statuses_enrolled")
                    .table(CourseStatuses::Table)
                    .col(CourseStatuses::SemReportId)
                    .col(CourseStatuses::CourseId)
                    .and_where(Expr::col(CourseStatuses::Status).eq("Enrolled"))
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_auth_tokens_user_id")
                    .table(AuthTokens::Table)
                    .col(AuthTokens::UserId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_auth_tokens_user_id").to_owned())
            .await?;

        manager
            .drop_index(Index::drop().name("idx_course_statuses_enrolled").to_owned())
            .await?;

        manager
            .drop_index(Index::drop().name("idx_sem_reports_student_id_semester").to_owned())
            .await?;

        manager
            .drop_index(Index::drop().name("idx_students_department_id").to_owned())
            .await?;

        manager
            .drop_index(Index::drop().name("idx_students_user_id").to_owned())
            .await?;

        manager
            .drop_index(Index::drop().name("idx_hods_department_id").to_owned())
            .await?;

        manager
            .drop_index(Index::drop().name("idx_hods_user_id").to_owned())
            .await?;

        manager
            .drop_index(Index::drop().name("idx_course_batches_course_id_batch_id").to_owned())
            .await?;

        manager
            .drop_index(Index::drop().name("idx_courses_department_program_semester").to_owned())
            .await?;

        manager
            .drop_index(Index::drop().name("idx_courses_code").to_owned())
            .await?;

        manager
            .drop_index(Index::drop().name("idx_batches_start_year_end_year").to_owned())
            .await?;

        manager
            .drop_index(Index::drop().name("idx_programs_name_department_id").to_owned())
            .await?;

        manager
            .drop_index(Index::drop().name("idx_users_username").to_owned())
            .await?;

        Ok(())
    }
}

#[derive(Iden)]
enum Users {
    Table,
    Username,
}

#[derive(Iden)]
enum Programs {
    Table,
    Name,
    DepartmentId,
}

#[derive(Iden)]
enum Batches {
    Table,
    StartYear,
    EndYear,
}

#[derive(Iden)]
enum Courses {
    Table,
    Code,
    DepartmentId,
    ProgramId,
    Semester,
}

#[derive(Iden)]
enum CourseBatches {
    Table,
    CourseId,
    BatchId,
}

#[derive(Iden)]
enum Hods {
    Table,
    UserId,
    DepartmentId,
}

#[derive(Iden)]
enum Students {
    Table,
    UserId,
    DepartmentId,
}

#[derive(Iden)]
enum SemReports {
    Table,
    StudentId,
    Semester,
}

#[derive(Iden)]
enum CourseStatuses {
    Table,
    SemReportId,
    CourseId,
    Status,
}

#[derive(Iden)]
enum AuthTokens {
    Table,
    UserId,
}
