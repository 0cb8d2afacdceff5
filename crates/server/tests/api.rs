mod common;

use axum::http::StatusCode;
use common::TestApp;
use database::entities::{course_statuses, courses};
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};
use serde_json::json;

#[tokio::test]
async fn test_health_and_docs() {
    let app = TestApp::new().await;

    let (status, body) = app.get("/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "OK");

    let (status, _) = app.get("/", None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, doc) = app.get("/api-docs/openapi.json", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(doc["paths"]["/student/dashboard"].is_object());
}

#[tokio::test]
async fn test_login() {
    let app = TestApp::new().await;

    let (status, body) = app
        .json(
            "POST",
            "/login",
            None,
            json!({"username": "hod", "password": "hod-secret"}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user_type"], "HOD");
    assert_eq!(body["username"], "hod");
    assert!(body["token"].as_str().is_some_and(|token| !token.is_empty()));

    let (status, body) = app
        .json(
            "POST",
            "/login",
            None,
            json!({"username": "hod", "password": "wrong"}),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Invalid credentials."}));

    let token = app.token("admin").await;
    let (_, body) = app
        .json(
            "POST",
            "/login",
            None,
            json!({"username": "admin", "password": "admin-secret"}),
        )
        .await;
    assert_eq!(body["user_type"], "Admin");
    assert_eq!(body["token"], token.as_str());
}

#[tokio::test]
async fn test_authentication_and_roles() {
    let app = TestApp::new().await;

    let (status, _) = app.get("/student/dashboard", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app.get("/student/dashboard", Some("bogus")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let hod = app.token("hod").await;
    let (status, _) = app.get("/student/dashboard", Some(&hod)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let student = app.token("student").await;
    let (status, _) = app.get("/hod/dashboard", Some(&student)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_student_dashboard() {
    let app = TestApp::new().await;
    app.course("CS101").await;
    let token = app.token("student").await;

    let (status, body) = app.get("/student/dashboard", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["username"], "student");
    assert_eq!(body["semester"], "1");
    assert_eq!(body["department"]["name"], "Computer Science");
    assert_eq!(body["batch"]["start_year"], 2020);
    assert!(body["report"].is_null());
    assert_eq!(body["available_courses"].as_array().unwrap().len(), 1);
    assert_eq!(
        body["status"],
        "You have not enrolled in any course this semester."
    );
}

#[tokio::test]
async fn test_enroll_partial_success() {
    let app = TestApp::new().await;
    let first = app.course("CS101").await;
    let second = app.course("CS102").await;
    let token = app.token("student").await;

    let (status, body) = app
        .json(
            "POST",
            "/student/dashboard",
            Some(&token),
            json!({"type": "enroll", "CourseIDs": [first.id]}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], json!([first.name]));

    let (status, body) = app
        .json(
            "POST",
            "/student/dashboard",
            Some(&token),
            json!({"type": "enroll", "CourseIDs": [second.id, first.id]}),
        )
        .await;
    assert_eq!(status, StatusCode::MULTI_STATUS);
    assert_eq!(body["message"], json!([second.name]));
    assert_eq!(
        body["errors"],
        json!([format!("Already enrolled in {}", first.name)])
    );
    assert_eq!(body["report"]["courses"].as_array().unwrap().len(), 2);

    let report_id = body["report"]["id"].as_i64().unwrap() as i32;
    let rows = course_statuses::Entity::find()
        .filter(course_statuses::Column::SemReportId.eq(report_id))
        .filter(course_statuses::Column::CourseId.eq(first.id))
        .count(&app.db)
        .await
        .unwrap();
    assert_eq!(rows, 1);

    let (status, body) = app
        .json(
            "POST",
            "/student/dashboard",
            Some(&token),
            json!({"type": "unenroll", "CourseIDs": [second.id], "semester": "1"}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["report"]["courses"].as_array().unwrap().len(), 1);

    let (status, _) = app
        .json(
            "POST",
            "/student/dashboard",
            Some(&token),
            json!({"type": "drop", "CourseIDs": [second.id]}),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = app
        .json(
            "POST",
            "/student/dashboard",
            Some(&token),
            json!({"CourseIDs": [second.id]}),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing request type.");
    let rows = course_statuses::Entity::find()
        .filter(course_statuses::Column::SemReportId.eq(report_id))
        .count(&app.db)
        .await
        .unwrap();
    assert_eq!(rows, 1);

    let (status, body) = app
        .json(
            "POST",
            "/student/dashboard",
            Some(&token),
            json!({"type": "enroll", "CourseIDs": [first.id]}),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], json!([]));
}

#[tokio::test]
async fn test_approval_locks_report() {
    let app = TestApp::new().await;
    let first = app.course("CS101").await;
    let second = app.course("CS102").await;
    let student = app.token("student").await;
    let hod = app.token("hod").await;

    let (_, body) = app
        .json(
            "POST",
            "/student/dashboard",
            Some(&student),
            json!({"type": "enroll", "CourseIDs": [first.id]}),
        )
        .await;
    let report_id = body["report"]["id"].as_i64().unwrap();

    let (_, dashboard) = app.get("/hod/dashboard", Some(&hod)).await;
    assert_eq!(dashboard["pending_reports"][0]["id"], report_id);
    assert_eq!(dashboard["students"][0]["username"], "student");

    let (status, body) = app
        .json(
            "POST",
            &format!("/hod/reports/{report_id}/approve"),
            Some(&hod),
            json!({}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["is_approved"], true);

    let (status, body) = app
        .json(
            "POST",
            "/student/dashboard",
            Some(&student),
            json!({"type": "enroll", "CourseIDs": [second.id]}),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"],
        "Semester 1 report is approved and can no longer be changed"
    );

    let (_, dashboard) = app.get("/student/dashboard", Some(&student)).await;
    assert_eq!(dashboard["report"]["courses"].as_array().unwrap().len(), 1);
    assert_eq!(dashboard["status"], "Your course selection has been approved.");

    let status_id = dashboard["report"]["courses"][0]["id"].as_i64().unwrap();
    let (status, body) = app
        .json(
            "POST",
            &format!("/hod/course-status/{status_id}/grade"),
            Some(&hod),
            json!({"status": "Pass"}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "Pass");

    let (status, history) = app.get("/student/reports", Some(&student)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(history[0]["courses"][0]["status"], "Pass");
}

#[tokio::test]
async fn test_bulk_course_upload() {
    let app = TestApp::new().await;
    let hod = app.token("hod").await;

    let csv = format!(
        "Program,Semester,Batch,Subject Name,Subject Code,Course Credit,Is Optional\n\
         {program},1,2020-2024,Data Structures,CS201,4,No\n\
         999,1,2020-2024,Ghost Course,CS999,3,No\n\
         {program},2,2020-2024,Operating Systems,CS202,3,Yes\n",
        program = app.program_id
    );

    let (status, body) = app
        .upload(
            "/hod/dashboard",
            &hod,
            &[("type", "BulkCourseUpload")],
            "courses.csv",
            &csv,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["created"], json!(["CS201", "CS202"]));
    assert_eq!(body["errors"].as_array().unwrap().len(), 1);
    assert!(body["errors"][0].as_str().unwrap().starts_with("CS999"));

    let ghost = courses::Entity::find()
        .filter(courses::Column::Code.eq("CS999"))
        .one(&app.db)
        .await
        .unwrap();
    assert!(ghost.is_none());

    let (status, _) = app
        .upload("/hod/dashboard", &hod, &[("type", "Other")], "courses.csv", &csv)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = app
        .upload(
            "/hod/dashboard",
            &hod,
            &[("type", "BulkCourseUpload")],
            "courses.xlsx",
            &csv,
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Only CSV files are supported.");
}

#[tokio::test]
async fn test_bulk_student_upload() {
    let app = TestApp::new().await;
    let hod = app.token("hod").await;
    let program = app.program_id.to_string();
    let batch = app.batch_id.to_string();

    let csv = "Username,Email,Password,First Name,Last Name\n\
               alice,alice@example.edu,alice-secret,Alice,Smith\n\
               student,dup@example.edu,pw,Dup,Licate\n";

    let (status, body) = app
        .upload(
            "/hod/students/bulk-upload",
            &hod,
            &[
                ("program", program.as_str()),
                ("batch", batch.as_str()),
                ("semester", "1"),
            ],
            "students.csv",
            csv,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["created"], json!(["alice"]));
    assert_eq!(body["errors"].as_array().unwrap().len(), 1);

    let token = app.token("alice").await;
    let (status, body) = app.get("/student/dashboard", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["first_name"], "Alice");
}

#[tokio::test]
async fn test_directory_endpoints() {
    let app = TestApp::new().await;
    let admin = app.token("admin").await;
    let hod = app.token("hod").await;

    let (status, _) = app
        .json(
            "POST",
            "/batches",
            Some(&admin),
            json!({"start_year": 2021, "end_year": 2025}),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = app
        .json(
            "POST",
            "/batches",
            Some(&hod),
            json!({"start_year": 2021, "end_year": 2025}),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "A batch for 2021-2025 already exists");

    let (status, _) = app
        .json("POST", "/departments", Some(&hod), json!({"name": "Physics"}))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, department) = app
        .json("POST", "/departments", Some(&admin), json!({"name": "Physics"}))
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = app
        .json(
            "POST",
            "/hod/register",
            Some(&admin),
            json!({
                "username": "physics-hod",
                "password": "secret",
                "department": department["id"],
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["department"], "Physics");

    let (_, departments) = app.get("/departments", Some(&hod)).await;
    assert_eq!(departments.as_array().unwrap().len(), 2);

    let (status, programs) = app
        .get(&format!("/programs?department={}", department["id"]), Some(&hod))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(programs, json!([]));
}

#[tokio::test]
async fn test_course_endpoints() {
    let app = TestApp::new().await;
    let hod = app.token("hod").await;
    let student = app.token("student").await;

    let (status, course) = app
        .json(
            "POST",
            "/courses",
            Some(&hod),
            json!({
                "name": "Compiler Design",
                "code": "CS301",
                "credit": 4,
                "semester": "3",
                "program": app.program_id,
                "batches": [app.batch_id],
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(course["batches"][0]["id"], app.batch_id);

    let (status, _) = app
        .json(
            "POST",
            "/courses",
            Some(&student),
            json!({
                "name": "Sneaky",
                "code": "CS302",
                "credit": 4,
                "semester": "3",
                "program": app.program_id,
            }),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, listed) = app.get("/courses?semester=3", Some(&student)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().unwrap().len(), 1);

    let (status, found) = app
        .get(&format!("/courses/{}", course["id"]), Some(&student))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(found["code"], "CS301");

    let (status, _) = app.get("/courses/9999", Some(&student)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
