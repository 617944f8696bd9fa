//! Application context - dependency injection container

use std::sync::Arc;

use doctorfinder_core::{CredentialHasher, DirectoryService, DoctorRepository, UserRepository};
use doctorfinder_domain::{Config, Environment, Result};
use doctorfinder_infra::{
    Argon2CredentialHasher, DbManager, SqliteDoctorRepository, SqliteUserRepository,
};
use tracing::info;

/// Services shared by every request handler
pub struct ApiContext {
    pub directory: Arc<DirectoryService>,
    pub environment: Environment,
    db: Option<Arc<DbManager>>,
}

impl ApiContext {
    /// Open the record store named by `config`, apply migrations and wire
    /// the directory service over it.
    ///
    /// # Errors
    /// Returns `DoctorFinderError::Database` if the store cannot be opened
    /// or migrated.
    pub fn open(config: &Config) -> Result<Self> {
        let db = Arc::new(DbManager::new(&config.database.path, config.database.pool_size)?);
        db.run_migrations()?;
        db.health_check()?;
        info!(path = %config.database.path, "record store ready");

        let doctors: Arc<dyn DoctorRepository> =
            Arc::new(SqliteDoctorRepository::new(Arc::clone(&db)));
        let users: Arc<dyn UserRepository> = Arc::new(SqliteUserRepository::new(Arc::clone(&db)));
        let hasher: Arc<dyn CredentialHasher> = Arc::new(Argon2CredentialHasher::new());

        Ok(Self {
            directory: Arc::new(DirectoryService::new(doctors, users, hasher)),
            environment: config.server.environment,
            db: Some(db),
        })
    }

    /// Context over an already wired directory service.
    pub fn with_directory(directory: Arc<DirectoryService>, environment: Environment) -> Self {
        Self { directory, environment, db: None }
    }

    /// The record store, when this context opened one.
    pub fn db(&self) -> Option<&Arc<DbManager>> {
        self.db.as_ref()
    }
}
