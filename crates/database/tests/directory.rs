mod common;

use common::{ADMIN, Fixture, setup};
use database::{error::ServiceError, services::directory::DirectoryService};
use models::{identity::Principal, import::BatchSpan};

#[tokio::test]
async fn test_duplicate_batch() {
    let db = setup().await;

    let batch = DirectoryService::create_batch(&db, &ADMIN, 2020, 2024)
        .await
        .unwrap();
    assert_eq!((batch.start_year, batch.end_year), (2020, 2024));

    let second = DirectoryService::create_batch(&db, &ADMIN, 2020, 2024).await;
    assert!(matches!(
        second,
        Err(ServiceError::DuplicateBatch {
            start: 2020,
            end: 2024
        })
    ));

    assert_eq!(DirectoryService::list_batches(&db).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_batch_years_must_increase() {
    let db = setup().await;

    let result = DirectoryService::create_batch(&db, &ADMIN, 2024, 2020).await;
    assert!(matches!(result, Err(ServiceError::Validation(_))));
}

#[tokio::test]
async fn test_find_batch_by_span() {
    let db = setup().await;
    let created = DirectoryService::create_batch(&db, &ADMIN, 2021, 2025)
        .await
        .unwrap();

    let found = DirectoryService::find_batch_by_span(&db, BatchSpan::new(2021, 2025).unwrap())
        .await
        .unwrap();
    assert_eq!(found.map(|batch| batch.id), Some(created.id));

    let missing = DirectoryService::find_batch_by_span(&db, BatchSpan::new(2019, 2023).unwrap())
        .await
        .unwrap();
    assert!(missing.is_none());
}

#[tokio::test]
async fn test_program_rules() {
    let db = setup().await;
    let fixture = Fixture::new(&db).await;

    let too_long =
        DirectoryService::create_program(&db, &ADMIN, fixture.department.id, "PhD", 6).await;
    assert!(matches!(too_long, Err(ServiceError::Validation(_))));

    let duplicate =
        DirectoryService::create_program(&db, &ADMIN, fixture.department.id, "B.Tech", 4).await;
    assert!(matches!(duplicate, Err(ServiceError::Validation(_))));

    let own = DirectoryService::create_program(&db, &fixture.hod, fixture.department.id, "M.Tech", 2)
        .await
        .unwrap();
    assert_eq!(own.department_id, fixture.department.id);

    let other = DirectoryService::create_department(&db, &ADMIN, "Physics")
        .await
        .unwrap();
    let foreign = DirectoryService::create_program(&db, &fixture.hod, other.id, "B.Sc", 3).await;
    assert!(matches!(foreign, Err(ServiceError::Unauthorized(_))));

    let programs = DirectoryService::list_programs(&db, Some(fixture.department.id))
        .await
        .unwrap();
    assert_eq!(programs.len(), 2);
}

#[tokio::test]
async fn test_only_admins_create_departments() {
    let db = setup().await;
    let fixture = Fixture::new(&db).await;

    let result = DirectoryService::create_department(&db, &fixture.hod, "Chemistry").await;
    assert!(matches!(result, Err(ServiceError::Unauthorized(_))));

    let student = Principal::Student {
        user_id: fixture.student_user.id,
        student_id: fixture.student.id,
        department_id: fixture.department.id,
        program_id: fixture.program.id,
        batch_id: fixture.batch.id,
    };
    let batch = DirectoryService::create_batch(&db, &student, 2022, 2026).await;
    assert!(matches!(batch, Err(ServiceError::Unauthorized(_))));

    let missing = DirectoryService::get_department(&db, 404).await;
    assert!(matches!(missing, Err(ServiceError::NotFound { .. })));
}
