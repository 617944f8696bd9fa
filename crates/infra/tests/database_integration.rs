//! End-to-end coverage for the directory repositories against a real SQLite
//! file with migrations applied.

mod support;

use std::sync::Arc;

use doctorfinder_core::{DirectoryService, DoctorRepository, UserRepository};
use doctorfinder_domain::DoctorFinderError;
use doctorfinder_infra::database::{SqliteDoctorRepository, SqliteUserRepository};
use doctorfinder_infra::security::Argon2CredentialHasher;
use support::{new_doctor, new_user, TestDatabase};

#[tokio::test(flavor = "multi_thread")]
async fn created_doctor_is_listed_with_identical_fields() {
    let db = TestDatabase::new();
    let repo = SqliteDoctorRepository::new(Arc::clone(&db.manager));

    let created = repo.insert(new_doctor("ada@example.com")).await.expect("insert doctor");
    let listed = repo.list().await.expect("list doctors");

    assert_eq!(listed, vec![created.clone()]);
    assert!(new_doctor("ada@example.com").matches(&created));
    assert!(created.id > 0);
}

#[tokio::test(flavor = "multi_thread")]
async fn doctors_are_listed_in_creation_order() {
    let db = TestDatabase::new();
    let repo = SqliteDoctorRepository::new(Arc::clone(&db.manager));

    for email in ["a@example.com", "b@example.com", "c@example.com"] {
        repo.insert(new_doctor(email)).await.expect("insert doctor");
    }

    let emails: Vec<String> =
        repo.list().await.expect("list doctors").into_iter().map(|d| d.email).collect();
    assert_eq!(emails, vec!["a@example.com", "b@example.com", "c@example.com"]);
}

#[tokio::test(flavor = "multi_thread")]
async fn duplicate_doctor_email_is_rejected() {
    let db = TestDatabase::new();
    let repo = SqliteDoctorRepository::new(Arc::clone(&db.manager));

    repo.insert(new_doctor("ada@example.com")).await.expect("first insert");
    let err = repo.insert(new_doctor("ada@example.com")).await.unwrap_err();

    match err {
        DoctorFinderError::Database(message) => {
            assert!(message.contains("unique constraint violation"), "got {message}");
        }
        other => panic!("expected database error, got {other:?}"),
    }
    assert_eq!(repo.list().await.expect("list doctors").len(), 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn users_round_trip_and_reject_duplicates() {
    let db = TestDatabase::new();
    let repo = SqliteUserRepository::new(Arc::clone(&db.manager));

    let created = repo.insert(new_user("sam@example.com")).await.expect("insert user");
    assert_eq!(repo.list().await.expect("list users"), vec![created]);

    let err = repo.insert(new_user("sam@example.com")).await.unwrap_err();
    assert!(matches!(err, DoctorFinderError::Database(_)));
}

#[tokio::test(flavor = "multi_thread")]
async fn users_are_listed_in_creation_order() {
    let db = TestDatabase::new();
    let repo = SqliteUserRepository::new(Arc::clone(&db.manager));

    assert!(repo.list().await.expect("list empty users").is_empty());
    for email in ["x@example.com", "y@example.com"] {
        repo.insert(new_user(email)).await.expect("insert user");
    }

    let emails: Vec<String> =
        repo.list().await.expect("list users").into_iter().map(|u| u.email).collect();
    assert_eq!(emails, vec!["x@example.com", "y@example.com"]);
}

#[tokio::test(flavor = "multi_thread")]
async fn directory_service_stores_only_the_password_hash() {
    let db = TestDatabase::new();
    let service = DirectoryService::new(
        Arc::new(SqliteDoctorRepository::new(Arc::clone(&db.manager))),
        Arc::new(SqliteUserRepository::new(Arc::clone(&db.manager))),
        Arc::new(Argon2CredentialHasher::new()),
    );

    let mut doctor = new_doctor("ada@example.com");
    doctor.password = "plain-secret".into();
    service.create_doctor(doctor).await.expect("create doctor");

    let mut user = new_user("sam@example.com");
    user.password = "other-secret".into();
    service.create_user(user).await.expect("create user");

    let conn = db.manager.get_connection().expect("connection");
    let doctor_hash: String = conn
        .query_row("SELECT password FROM doctors WHERE email = ?1", ["ada@example.com"], |row| {
            row.get(0)
        })
        .expect("stored doctor");
    let user_hash: String = conn
        .query_row("SELECT password FROM users WHERE email = ?1", ["sam@example.com"], |row| {
            row.get(0)
        })
        .expect("stored user");

    assert!(Argon2CredentialHasher::verify("plain-secret", &doctor_hash).unwrap());
    assert!(Argon2CredentialHasher::verify("other-secret", &user_hash).unwrap());
}

#[tokio::test(flavor = "multi_thread")]
async fn migrations_are_idempotent_and_data_survives() {
    let db = TestDatabase::new();
    let repo = SqliteDoctorRepository::new(Arc::clone(&db.manager));
    repo.insert(new_doctor("ada@example.com")).await.expect("insert doctor");

    db.manager.run_migrations().expect("second migration run");
    db.manager.health_check().expect("healthy database");

    assert_eq!(repo.list().await.expect("list doctors").len(), 1);
}
