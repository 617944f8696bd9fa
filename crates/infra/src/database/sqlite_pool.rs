//! SQLite pool helpers
//!
//! Builds the r2d2 pool used by [`super::DbManager`] and applies the
//! per-connection pragmas.

use std::path::Path;
use std::time::Duration;

use doctorfinder_domain::{DoctorFinderError, Result as DomainResult};
use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::Connection;
use tracing::warn;

pub type SqlitePool = Pool<SqliteConnectionManager>;
pub type SqliteConnection = PooledConnection<SqliteConnectionManager>;

/// Pool configuration
#[derive(Debug, Clone)]
pub struct SqlitePoolConfig {
    /// Maximum number of connections in the pool
    pub max_size: u32,

    /// How long to wait for a free connection
    pub connection_timeout: Duration,

    /// Busy timeout for SQLite operations
    pub busy_timeout: Duration,

    /// Enable WAL journal mode
    pub enable_wal: bool,

    /// Enable foreign key constraints
    pub enable_foreign_keys: bool,
}

impl Default for SqlitePoolConfig {
    fn default() -> Self {
        Self {
            max_size: 8,
            connection_timeout: Duration::from_secs(5),
            busy_timeout: Duration::from_millis(5000),
            enable_wal: true,
            enable_foreign_keys: true,
        }
    }
}

/// Create a pool for the database file at `path`.
///
/// One connection is opened eagerly so a bad path fails here rather than on
/// the first request.
pub fn create_sqlite_pool<P: AsRef<Path>>(
    path: P,
    config: SqlitePoolConfig,
) -> DomainResult<SqlitePool> {
    let pragmas = config.clone();
    let manager = SqliteConnectionManager::file(path.as_ref())
        .with_init(move |conn| apply_connection_pragmas(conn, &pragmas));

    Pool::builder()
        .max_size(config.max_size.max(1))
        .connection_timeout(config.connection_timeout)
        .build(manager)
        .map_err(|err| {
            warn!(error = %err, "failed to create connection pool");
            DoctorFinderError::Database(format!("failed to create pool: {err}"))
        })
}

fn apply_connection_pragmas(conn: &mut Connection, config: &SqlitePoolConfig) -> rusqlite::Result<()> {
    conn.busy_timeout(config.busy_timeout)?;
    if config.enable_wal {
        conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get::<_, String>(0))?;
    }
    if config.enable_foreign_keys {
        conn.pragma_update(None, "foreign_keys", true)?;
    }
    Ok(())
}
