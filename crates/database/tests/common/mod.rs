#![allow(dead_code)]

use database::{
    entities::{batches, courses, departments, programs, students, users},
    services::{
        catalog::{CatalogService, NewCourse},
        directory::DirectoryService,
        identity::{IdentityService, NewAccount},
    },
};
use migration::{Migrator, MigratorTrait};
use models::{identity::Principal, semester::Semester};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};

pub const ADMIN: Principal = Principal::Admin { user_id: 0 };

/// Fresh in-memory database with the schema applied.
///
/// A single pooled connection keeps every query on the same sqlite memory db.
pub async fn setup() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);

    let db = Database::connect(options).await.unwrap();
    Migrator::up(&db, None).await.unwrap();
    db
}

pub fn account(username: &str) -> NewAccount {
    NewAccount {
        username: username.to_string(),
        password: format!("{username}-secret"),
        email: format!("{username}@example.edu"),
        first_name: username.to_string(),
        last_name: "Tester".to_string(),
    }
}

/// A department with one program, one batch, a head and a first semester student
pub struct Fixture {
    pub department: departments::Model,
    pub program: programs::Model,
    pub batch: batches::Model,
    pub hod: Principal,
    pub hod_user: users::Model,
    pub student: students::Model,
    pub student_user: users::Model,
}

impl Fixture {
    pub async fn new(db: &DatabaseConnection) -> Self {
        let department = DirectoryService::create_department(db, &ADMIN, "Computer Science")
            .await
            .unwrap();
        let program = DirectoryService::create_program(db, &ADMIN, department.id, "B.Tech", 4)
            .await
            .unwrap();
        let batch = DirectoryService::create_batch(db, &ADMIN, 2020, 2024)
            .await
            .unwrap();

        let (_, hod_user) = IdentityService::register_hod(db, &ADMIN, account("hod"), department.id)
            .await
            .unwrap();
        let hod = IdentityService::resolve_principal(db, hod_user.id)
            .await
            .unwrap();

        let (student, student_user) = IdentityService::register_student(
            db,
            &ADMIN,
            account("student"),
            program.id,
            batch.id,
            Semester::First,
        )
        .await
        .unwrap();

        Self {
            department,
            program,
            batch,
            hod,
            hod_user,
            student,
            student_user,
        }
    }

    pub async fn course(&self, db: &DatabaseConnection, code: &str) -> courses::Model {
        CatalogService::create_course(
            db,
            &self.hod,
            NewCourse {
                name: format!("Course {code}"),
                code: code.to_string(),
                is_elective: false,
                credit: 4,
                semester: Semester::First,
                program_id: self.program.id,
                batch_ids: vec![self.batch.id],
            },
        )
        .await
        .unwrap()
    }
}
