//! User repository implementation using SQLite

use std::sync::Arc;

use async_trait::async_trait;
use doctorfinder_core::UserRepository;
use doctorfinder_domain::{NewUser, Result as DomainResult, User};
use rusqlite::{params, Row};
use tokio::task;
use tracing::debug;

use super::manager::{map_join_error, map_sql_error, DbManager};
use super::{created_now, format_timestamp, parse_timestamp};

/// SQLite-backed implementation of `UserRepository`
pub struct SqliteUserRepository {
    db: Arc<DbManager>,
}

impl SqliteUserRepository {
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for SqliteUserRepository {
    async fn list(&self) -> DomainResult<Vec<User>> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> DomainResult<Vec<User>> {
            let conn = db.get_connection()?;
            let mut stmt = conn
                .prepare("SELECT id, name, email, created_at FROM users ORDER BY id")
                .map_err(map_sql_error)?;

            let users = stmt
                .query_map([], map_user_row)
                .map_err(map_sql_error)?
                .collect::<rusqlite::Result<Vec<_>>>()
                .map_err(map_sql_error)?;
            debug!(count = users.len(), "listed users");
            Ok(users)
        })
        .await
        .map_err(map_join_error)?
    }

    async fn insert(&self, user: NewUser) -> DomainResult<User> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> DomainResult<User> {
            let conn = db.get_connection()?;
            let created_at = created_now();

            conn.execute(
                "INSERT INTO users (name, email, password, created_at) VALUES (?1, ?2, ?3, ?4)",
                params![
                    user.name,
                    user.email,
                    user.password,
                    format_timestamp(&created_at),
                ],
            )
            .map_err(map_sql_error)?;

            Ok(User { id: conn.last_insert_rowid(), name: user.name, email: user.email, created_at })
        })
        .await
        .map_err(map_join_error)?
    }
}

fn map_user_row(row: &Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        created_at: parse_timestamp(3, &row.get::<_, String>(3)?)?,
    })
}
