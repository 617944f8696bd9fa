#![allow(dead_code)]

use std::sync::Arc;

use doctorfinder_domain::{NewDoctor, NewUser, ServiceConfig};
use doctorfinder_infra::database::DbManager;
use doctorfinder_infra::storage::LocalStore;
use tempfile::TempDir;

pub const TEST_API_KEY: &str = "test-api-key";
pub const TEST_PROJECT: &str = "demo-project";

/// Temporary database wrapper that keeps the underlying file alive for the
/// duration of a test run.
pub struct TestDatabase {
    pub manager: Arc<DbManager>,
    _temp_dir: TempDir,
}

impl TestDatabase {
    /// Create a new temporary database with migrations applied.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("temp dir should be created");
        let db_path = temp_dir.path().join("test.db");

        let manager = DbManager::new(&db_path, 4).expect("db manager should be created");
        manager.run_migrations().expect("schema migrations should apply");

        Self { manager: Arc::new(manager), _temp_dir: temp_dir }
    }
}

impl Default for TestDatabase {
    fn default() -> Self {
        Self::new()
    }
}

/// Local storage file inside its own temporary directory.
pub struct TestStorage {
    pub store: Arc<LocalStore>,
    temp_dir: TempDir,
}

impl TestStorage {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("temp dir should be created");
        let store = Arc::new(LocalStore::new(temp_dir.path().join("storage.json")));
        Self { store, temp_dir }
    }

    /// A second handle on the same file, as a restarted client would open.
    pub fn reopen(&self) -> Arc<LocalStore> {
        Arc::new(LocalStore::new(self.store.path()))
    }

    pub fn raw(&self) -> serde_json::Value {
        match std::fs::read_to_string(self.store.path()) {
            Ok(contents) => serde_json::from_str(&contents).expect("storage should be JSON"),
            Err(_) => serde_json::Value::Null,
        }
    }
}

impl Default for TestStorage {
    fn default() -> Self {
        Self::new()
    }
}

/// Service settings pointing every endpoint at a mock server.
pub fn service_config(base: &str) -> Arc<ServiceConfig> {
    Arc::new(ServiceConfig::new(TEST_API_KEY, TEST_PROJECT).with_endpoint(base))
}

pub fn new_doctor(email: &str) -> NewDoctor {
    NewDoctor {
        name: "Dr. Ada Stone".into(),
        email: email.into(),
        password: "hashed-elsewhere".into(),
        specialty: "Cardiology".into(),
        services: "Checkups, ECG".into(),
        location: "Springfield".into(),
        availability: "Mon-Fri".into(),
    }
}

pub fn new_user(email: &str) -> NewUser {
    NewUser { name: "Sam Reed".into(), email: email.into(), password: "hashed-elsewhere".into() }
}
