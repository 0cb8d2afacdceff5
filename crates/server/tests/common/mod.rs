#![allow(dead_code)]

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use database::{
    entities::{courses, students},
    services::{
        catalog::{CatalogService, NewCourse},
        directory::DirectoryService,
        identity::{IdentityService, NewAccount},
    },
};
use migration::{Migrator, MigratorTrait};
use models::{identity::Principal, semester::Semester};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use serde_json::Value;
use server::{app, state::AppState};
use tower::util::ServiceExt; // for oneshot

pub const BOUNDARY: &str = "enrollment-test-boundary";

/// Router over a migrated in-memory database with one department,
/// program, batch, head of department and student
pub struct TestApp {
    pub db: DatabaseConnection,
    pub router: Router,
    pub program_id: i32,
    pub batch_id: i32,
    pub student: students::Model,
    pub hod: Principal,
}

fn account(username: &str) -> NewAccount {
    NewAccount {
        username: username.to_string(),
        password: format!("{username}-secret"),
        email: format!("{username}@example.edu"),
        first_name: username.to_string(),
        last_name: "Tester".to_string(),
    }
}

impl TestApp {
    pub async fn new() -> Self {
        let mut options = ConnectOptions::new("sqlite::memory:");
        options
            .max_connections(1)
            .min_connections(1)
            .sqlx_logging(false);
        let db = Database::connect(options).await.unwrap();
        Migrator::up(&db, None).await.unwrap();

        let admin = Principal::Admin { user_id: 0 };
        IdentityService::ensure_admin(&db, "admin", "admin-secret")
            .await
            .unwrap();
        let department = DirectoryService::create_department(&db, &admin, "Computer Science")
            .await
            .unwrap();
        let program = DirectoryService::create_program(&db, &admin, department.id, "B.Tech", 4)
            .await
            .unwrap();
        let batch = DirectoryService::create_batch(&db, &admin, 2020, 2024)
            .await
            .unwrap();
        let (_, hod_user) = IdentityService::register_hod(&db, &admin, account("hod"), department.id)
            .await
            .unwrap();
        let hod = IdentityService::resolve_principal(&db, hod_user.id)
            .await
            .unwrap();
        let (student, _) = IdentityService::register_student(
            &db,
            &admin,
            account("student"),
            program.id,
            batch.id,
            Semester::First,
        )
        .await
        .unwrap();

        Self {
            router: app(AppState::new(db.clone())),
            db,
            program_id: program.id,
            batch_id: batch.id,
            student,
            hod,
        }
    }

    pub async fn course(&self, code: &str) -> courses::Model {
        CatalogService::create_course(
            &self.db,
            &self.hod,
            NewCourse {
                name: format!("Course {code}"),
                code: code.to_string(),
                is_elective: false,
                credit: 4,
                semester: Semester::First,
                program_id: self.program_id,
                batch_ids: vec![self.batch_id],
            },
        )
        .await
        .unwrap()
    }

    /// Logs in through the API and returns the token
    pub async fn token(&self, username: &str) -> String {
        let (status, body) = self
            .json(
                "POST",
                "/login",
                None,
                serde_json::json!({
                    "username": username,
                    "password": format!("{username}-secret"),
                }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "login failed: {body}");
        body["token"].as_str().unwrap().to_string()
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
        (status, body)
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        let mut request = Request::builder().uri(uri);
        if let Some(token) = token {
            request = request.header(header::AUTHORIZATION, format!("Token {token}"));
        }
        self.send(request.body(Body::empty()).unwrap()).await
    }

    pub async fn json(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Value,
    ) -> (StatusCode, Value) {
        let mut request = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            request = request.header(header::AUTHORIZATION, format!("Token {token}"));
        }
        self.send(request.body(Body::from(body.to_string())).unwrap())
            .await
    }

    /// Posts a multipart form with text fields and one file part
    pub async fn upload(
        &self,
        uri: &str,
        token: &str,
        fields: &[(&str, &str)],
        file_name: &str,
        file: &str,
    ) -> (StatusCode, Value) {
        let mut body = String::new();
        for (name, value) in fields {
            body.push_str(&format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            ));
        }
        body.push_str(&format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\nContent-Type: text/csv\r\n\r\n{file}\r\n--{BOUNDARY}--\r\n"
        ));

        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap();
        self.send(request).await
    }
}
