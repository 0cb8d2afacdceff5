mod common;

use common::{ADMIN, Fixture, account, setup};
use database::{error::ServiceError, password::verify_password, services::identity::IdentityService};
use models::identity::{Principal, Role};

#[tokio::test]
async fn test_login_issues_reusable_token() {
    let db = setup().await;
    let fixture = Fixture::new(&db).await;

    let first = IdentityService::login(&db, "student", "student-secret")
        .await
        .unwrap();
    assert_eq!(first.user.id, fixture.student_user.id);
    assert_eq!(first.principal.role(), Role::Student);

    let second = IdentityService::login(&db, "student", "student-secret")
        .await
        .unwrap();
    assert_eq!(first.token, second.token);

    let principal = IdentityService::authenticate(&db, &first.token)
        .await
        .unwrap();
    assert_eq!(principal, Some(first.principal));

    let unknown = IdentityService::authenticate(&db, "not-a-token").await.unwrap();
    assert!(unknown.is_none());
}

#[tokio::test]
async fn test_passwords_stored_as_argon2() {
    let db = setup().await;
    let fixture = Fixture::new(&db).await;

    let stored = &fixture.student_user.password_hash;
    assert!(stored.starts_with("$argon2id$"));
    assert!(!stored.contains("student-secret"));
    assert!(verify_password("student-secret", stored));
    assert!(!verify_password("student-secre", stored));
}

#[tokio::test]
async fn test_login_rejects_bad_credentials() {
    let db = setup().await;
    Fixture::new(&db).await;

    let wrong_password = IdentityService::login(&db, "student", "guess").await;
    assert!(matches!(wrong_password, Err(ServiceError::InvalidCredentials)));

    let unknown_user = IdentityService::login(&db, "nobody", "student-secret").await;
    assert!(matches!(unknown_user, Err(ServiceError::InvalidCredentials)));
}

#[tokio::test]
async fn test_principal_resolution() {
    let db = setup().await;
    let fixture = Fixture::new(&db).await;

    assert!(matches!(
        fixture.hod,
        Principal::Hod { department_id, .. } if department_id == fixture.department.id
    ));

    let student = IdentityService::resolve_principal(&db, fixture.student_user.id)
        .await
        .unwrap();
    assert_eq!(
        student,
        Principal::Student {
            user_id: fixture.student_user.id,
            student_id: fixture.student.id,
            department_id: fixture.department.id,
            program_id: fixture.program.id,
            batch_id: fixture.batch.id,
        }
    );

    assert!(IdentityService::ensure_admin(&db, "root", "root-secret").await.unwrap());
    assert!(!IdentityService::ensure_admin(&db, "root", "root-secret").await.unwrap());
    let session = IdentityService::login(&db, "root", "root-secret").await.unwrap();
    assert_eq!(session.principal.role(), Role::Admin);
}

#[tokio::test]
async fn test_registration_rules() {
    let db = setup().await;
    let fixture = Fixture::new(&db).await;

    let taken = IdentityService::register_student(
        &db,
        &ADMIN,
        account("student"),
        fixture.program.id,
        fixture.batch.id,
        models::semester::Semester::First,
    )
    .await;
    assert!(matches!(taken, Err(ServiceError::Validation(_))));

    let second_head =
        IdentityService::register_hod(&db, &ADMIN, account("deputy"), fixture.department.id).await;
    assert!(matches!(second_head, Err(ServiceError::Validation(_))));

    let by_hod =
        IdentityService::register_hod(&db, &fixture.hod, account("usurper"), fixture.department.id)
            .await;
    assert!(matches!(by_hod, Err(ServiceError::Unauthorized(_))));

    // Rolled back registrations leave no user behind
    let login = IdentityService::login(&db, "deputy", "deputy-secret").await;
    assert!(matches!(login, Err(ServiceError::InvalidCredentials)));

    let students = IdentityService::students_of_department(&db, fixture.department.id)
        .await
        .unwrap();
    assert_eq!(students.len(), 1);
    assert_eq!(students[0].1.username, "student");
}
