use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create users table
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Users::Username).string().not_null())
                    .col(ColumnDef::new(Users::Email).string().not_null().default(""))
                    .col(ColumnDef::new(Users::FirstName).string().not_null().default(""))
                    .col(ColumnDef::new(Users::LastName).string().not_null().default(""))
                    .col(ColumnDef::new(Users::PasswordHash).string().not_null())
                    .col(ColumnDef::new(Users::CreatedAt).timestamp().not_null())
                    .to_owned(),
            )
            .await?;

        // Create departments table
        manager
            .create_table(
                Table::create()
                    .table(Departments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Departments::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Departments::Name).string().not_null())
                    .to_owned(),
            )
            .await?;

        // Create programs table
        manager
            .create_table(
                Table::create()
                    .table(Programs::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Programs::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Programs::Name).string().not_null())
                    .col(ColumnDef::new(Programs::DepartmentId).integer().not_null())
                    .col(ColumnDef::new(Programs::Duration).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-programs-department_id")
                            .from(Programs::Table, Programs::DepartmentId)
                            .to(Departments::Table, Departments::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create batches table
        manager
            .create_table(
                Table::create()
                    .table(Batches::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Batches::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Batches::StartYear).integer().not_null())
                    .col(ColumnDef::new(Batches::EndYear).integer().not_null())
                    .to_owned(),
            )
            .await?;

        // Create courses table
        manager
            .create_table(
                Table::create()
                    .table(Courses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Courses::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Courses::Name).string().not_null())
                    .col(ColumnDef::new(Courses::Code).string().not_null())
                    .col(
                        ColumnDef::new(Courses::IsElective)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Courses::Credit).integer().not_null())
                    .col(ColumnDef::new(Courses::Semester).string_len(2).not_null())
                    .col(ColumnDef::new(Courses::DepartmentId).integer().not_null())
                    .col(ColumnDef::new(Courses::ProgramId).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-courses-department_id")
                            .from(Courses::Table, Courses::DepartmentId)
                            .to(Departments::Table, Departments::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-courses-program_id")
                            .from(Courses::Table, Courses::ProgramId)
                            .to(Programs::Table, Programs::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create course_batches junction table (many-to-many)
        manager
            .create_table(
                Table::create()
                    .table(CourseBatches::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CourseBatches::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(CourseBatches::CourseId).integer().not_null())
                    .col(ColumnDef::new(CourseBatches::BatchId).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-course_batches-course_id")
                            .from(CourseBatches::Table, CourseBatches::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-course_batches-batch_id")
                            .from(CourseBatches::Table, CourseBatches::BatchId)
                            .to(Batches::Table, Batches::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create hods table
        manager
            .create_table(
                Table::create()
                    .table(Hods::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Hods::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Hods::UserId).integer().not_null())
                    .col(ColumnDef::new(Hods::DepartmentId).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-hods-user_id")
                            .from(Hods::Table, Hods::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-hods-department_id")
                            .from(Hods::Table, Hods::DepartmentId)
                            .to(Departments::Table, Departments::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create students table
        manager
            .create_table(
                Table::create()
                    .table(Students::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Students::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Students::UserId).integer().not_null())
                    .col(ColumnDef::new(Students::DepartmentId).integer().not_null())
                    .col(ColumnDef::new(Students::ProgramId).integer().not_null())
                    .col(ColumnDef::new(Students::BatchId).integer().not_null())
                    .col(ColumnDef::new(Students::Semester).string_len(2).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-students-user_id")
                            .from(Students::Table, Students::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-students-department_id")
                            .from(Students::Table, Students::DepartmentId)
                            .to(Departments::Table, Departments::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-students-program_id")
                            .from(Students::Table, Students::ProgramId)
                            .to(Programs::Table, Programs::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-students-batch_id")
                            .from(Students::Table, Students::BatchId)
                            .to(Batches::Table, Batches::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create sem_reports table
        manager
            .create_table(
                Table::create()
                    .table(SemReports::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SemReports::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(SemReports::StudentId).integer().not_null())
                    .col(ColumnDef::new(SemReports::Semester).string_len(2).not_null())
                    .col(
                        ColumnDef::new(SemReports::IsApproved)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(SemReports::RejectionReason).text())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-sem_reports-student_id")
                            .from(SemReports::Table, SemReports::StudentId)
                            .to(Students::Table, Students::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create course_statuses table
        manager
            .create_table(
                Table::create()
                    .table(CourseStatuses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CourseStatuses::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(CourseStatuses::SemReportId).integer().not_null())
                    .col(ColumnDef::new(CourseStatuses::CourseId).integer().not_null())
                    .col(ColumnDef::new(CourseStatuses::Status).string_len(10).not_null())
                    .col(ColumnDef::new(CourseStatuses::Semester).string_len(2).not_null())
                    .col(ColumnDef::new(CourseStatuses::EnrolledOn).date().not_null())
                    .col(ColumnDef::new(CourseStatuses::CompletedOn).date())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-course_statuses-sem_report_id")
                            .from(CourseStatuses::Table, CourseStatuses::SemReportId)
                            .to(SemReports::Table, SemReports::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-course_statuses-course_id")
                            .from(CourseStatuses::Table, CourseStatuses::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create auth_tokens table
        manager
            .create_table(
                Table::create()
                    .table(AuthTokens::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AuthTokens::Key)
                            .string_len(64)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(AuthTokens::UserId).integer().not_null())
                    .col(ColumnDef::new(AuthTokens::CreatedAt).timestamp().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-auth_tokens-user_id")
                            .from(AuthTokens::Table, AuthTokens::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop tables in reverse order due to foreign key constraints
        manager
            .drop_table(Table::drop().table(AuthTokens::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(CourseStatuses::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(SemReports::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Students::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Hods::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(CourseBatches::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Courses::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Batches::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Programs::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Departments::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
    Username,
    Email,
    FirstName,
    LastName,
    PasswordHash,
    CreatedAt,
}

#[derive(Iden)]
enum Departments {
    Table,
    Id,
    Name,
}

#[derive(Iden)]
enum Programs {
    Table,
    Id,
    Name,
    DepartmentId,
    Duration,
}

#[derive(Iden)]
enum Batches {
    Table,
    Id,
    StartYear,
    EndYear,
}

#[derive(Iden)]
enum Courses {
    Table,
    Id,
    Name,
    Code,
    IsElective,
    Credit,
    Semester,
    DepartmentId,
    ProgramId,
}

#[derive(Iden)]
enum CourseBatches {
    Table,
    Id,
    CourseId,
    BatchId,
}

#[derive(Iden)]
enum Hods {
    Table,
    Id,
    UserId,
    DepartmentId,
}

#[derive(Iden)]
enum Students {
    Table,
    Id,
    UserId,
    DepartmentId,
    ProgramId,
    BatchId,
    Semester,
}

#[derive(Iden)]
enum SemReports {
    Table,
    Id,
    StudentId,
    Semester,
    IsApproved,
    RejectionReason,
}

#[derive(Iden)]
enum CourseStatuses {
    Table,
    Id,
    SemReportId,
    CourseId,
    Status,
    Semester,
    EnrolledOn,
    CompletedOn,
}

#[derive(Iden)]
enum AuthTokens {
    Table,
    Key,
    UserId,
    CreatedAt,
}
